use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;

use tokyometro_lib::{load_network, plan_grand_tour, plan_route, Network, RouteRequest};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

static NETWORK: Lazy<Network> = Lazy::new(|| {
    let dir = fixture_dir();
    load_network(&dir.join("network.json"), &dir.join("stations.json"), None)
        .expect("fixture loads")
});

static ROUTE_REQUEST: Lazy<RouteRequest> = Lazy::new(|| RouteRequest::new("Shibuya", "Ginza"));

fn benchmark_pathfinding(c: &mut Criterion) {
    let network = &*NETWORK;

    c.bench_function("route_shibuya_ginza", |b| {
        let request = &*ROUTE_REQUEST;
        b.iter(|| {
            let plan = plan_route(network, request).expect("route exists");
            black_box(plan.hop_count())
        });
    });

    c.bench_function("grand_tour_fixture", |b| {
        b.iter(|| {
            let plan = plan_grand_tour(network).expect("tour plans");
            black_box(plan.steps.len())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
