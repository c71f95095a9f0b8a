use tracing::debug;

use crate::error::{Error, Result};
use crate::network::{Network, NodeId};
use crate::path::{shortest_path_tree, PathTree};

/// Planned grand tour: an approximate minimum-cost open path visiting one
/// representative node per station.
#[derive(Debug, Clone, PartialEq)]
pub struct TourPlan {
    /// Required nodes in visiting order, as chosen by the heuristic.
    pub waypoints: Vec<NodeId>,
    /// Full station-by-station walk, with shortest paths spliced in between
    /// consecutive waypoints. Nodes may repeat where the walk backtracks.
    pub steps: Vec<NodeId>,
    /// Total `weight` cost of the walk.
    pub cost: f64,
}

/// Compute an approximate grand tour over every station in the network.
///
/// The required set is one representative node per station name (lowest node
/// code). The underlying graph is far from complete, so pairwise shortest
/// path distances form the metric: nearest-neighbour orderings from every
/// candidate start, the cheapest kept, then a 2-opt improvement pass, and
/// finally expansion of the waypoint order into a full walk.
pub fn plan_grand_tour(network: &Network) -> Result<TourPlan> {
    let targets = network.representatives();
    if targets.is_empty() {
        return Err(Error::EmptyNetwork);
    }
    if targets.len() == 1 {
        return Ok(TourPlan {
            waypoints: targets.clone(),
            steps: targets,
            cost: 0.0,
        });
    }

    let metric = TourMetric::build(network, targets)?;
    debug!(targets = metric.len(), "built grand tour distance matrix");

    let mut order = best_nearest_neighbour_order(&metric);
    two_opt(&mut order, &metric);

    let waypoints: Vec<NodeId> = order.iter().map(|&i| metric.target(i)).collect();
    let steps = metric.expand(&order);
    let cost = metric.order_cost(&order);

    debug!(
        waypoints = waypoints.len(),
        steps = steps.len(),
        cost,
        "planned grand tour"
    );

    Ok(TourPlan {
        waypoints,
        steps,
        cost,
    })
}

/// Complete auxiliary metric over the required nodes: pairwise shortest path
/// distances plus the path trees used to expand waypoint hops.
struct TourMetric {
    targets: Vec<NodeId>,
    trees: Vec<PathTree>,
    distances: Vec<Vec<f64>>,
}

impl TourMetric {
    fn build(network: &Network, targets: Vec<NodeId>) -> Result<Self> {
        let mut trees = Vec::with_capacity(targets.len());
        let mut distances = Vec::with_capacity(targets.len());

        for &from in &targets {
            let tree = shortest_path_tree(network, from)?;
            let mut row = Vec::with_capacity(targets.len());
            for &to in &targets {
                let distance =
                    tree.distance_to(to)
                        .ok_or_else(|| Error::DisconnectedTour {
                            code: to.to_string(),
                            from: from.to_string(),
                        })?;
                row.push(distance);
            }
            trees.push(tree);
            distances.push(row);
        }

        Ok(Self {
            targets,
            trees,
            distances,
        })
    }

    fn len(&self) -> usize {
        self.targets.len()
    }

    fn target(&self, index: usize) -> NodeId {
        self.targets[index]
    }

    fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances[from][to]
    }

    fn order_cost(&self, order: &[usize]) -> f64 {
        order
            .windows(2)
            .map(|pair| self.distance(pair[0], pair[1]))
            .sum()
    }

    /// Expand a waypoint order into the full walk by splicing pairwise
    /// shortest paths, dropping the duplicated junction node of each
    /// segment.
    fn expand(&self, order: &[usize]) -> Vec<NodeId> {
        let mut steps: Vec<NodeId> = vec![self.target(order[0])];
        for pair in order.windows(2) {
            let segment = self.trees[pair[0]]
                .path_to(self.target(pair[1]))
                .expect("reachability validated when building the metric");
            steps.extend(segment.into_iter().skip(1));
        }
        steps
    }
}

/// Greedy nearest-neighbour ordering from every candidate start, keeping the
/// cheapest result. Ties resolve to the lower target index so the outcome is
/// deterministic.
fn best_nearest_neighbour_order(metric: &TourMetric) -> Vec<usize> {
    let mut best: Option<(f64, Vec<usize>)> = None;
    for start in 0..metric.len() {
        let order = nearest_neighbour_order(metric, start);
        let cost = metric.order_cost(&order);
        let better = match &best {
            Some((best_cost, _)) => cost < *best_cost,
            None => true,
        };
        if better {
            best = Some((cost, order));
        }
    }
    best.map(|(_, order)| order).unwrap_or_default()
}

fn nearest_neighbour_order(metric: &TourMetric, start: usize) -> Vec<usize> {
    let n = metric.len();
    let mut order = Vec::with_capacity(n);
    let mut remaining: Vec<bool> = vec![true; n];

    let mut current = start;
    remaining[start] = false;
    order.push(start);

    for _ in 1..n {
        let mut next = None;
        let mut next_distance = f64::INFINITY;
        for candidate in 0..n {
            if remaining[candidate] && metric.distance(current, candidate) < next_distance {
                next = Some(candidate);
                next_distance = metric.distance(current, candidate);
            }
        }
        let next = next.expect("unvisited target remains");
        remaining[next] = false;
        order.push(next);
        current = next;
    }

    order
}

/// 2-opt improvement pass for an open path: reverse any segment whose
/// boundary edges become cheaper. Distances are symmetric, so the interior
/// of a reversed segment costs the same.
fn two_opt(order: &mut [usize], metric: &TourMetric) {
    let n = order.len();
    let mut improved = true;
    while improved {
        improved = false;
        for i in 0..n - 1 {
            for j in i + 1..n {
                let left = (i > 0).then(|| order[i - 1]);
                let right = (j + 1 < n).then(|| order[j + 1]);

                let before = left.map_or(0.0, |l| metric.distance(l, order[i]))
                    + right.map_or(0.0, |r| metric.distance(order[j], r));
                let after = left.map_or(0.0, |l| metric.distance(l, order[j]))
                    + right.map_or(0.0, |r| metric.distance(order[i], r));

                if after + 1e-9 < before {
                    order[i..=j].reverse();
                    improved = true;
                }
            }
        }
    }
}
