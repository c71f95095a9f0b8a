//! Route command handler for computing itineraries between two stations.

use anyhow::Result;
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use tracing::debug;

use tokyometro_lib::{
    plan_route, Error as LibError, Network, RouteRequest, RouteSummary,
};

use crate::output::OutputFormat;

/// Handle the route subcommand.
///
/// Resolves the endpoint names (either may be the literal `random`),
/// computes the itinerary, and renders it in the requested format.
pub fn handle_route(
    network: &Network,
    format: OutputFormat,
    from: &str,
    to: &str,
    verbose: bool,
) -> Result<()> {
    let from = resolve_endpoint(network, from)?;
    let to = resolve_endpoint(network, to)?;
    debug!(%from, %to, "handling route command");

    let request = RouteRequest::new(from, to);
    let plan = match plan_route(network, &request) {
        Ok(plan) => plan,
        Err(err) => return Err(route_failure(&request, err)),
    };

    let summary = RouteSummary::from_plan(network, &plan)?;
    format.render_route(&summary, verbose)
}

/// Resolve an endpoint argument, expanding the literal `random` to a
/// uniformly chosen station name.
fn resolve_endpoint(network: &Network, name: &str) -> Result<String> {
    if !name.eq_ignore_ascii_case("random") {
        return Ok(name.to_string());
    }
    let mut rng = SmallRng::from_entropy();
    network
        .station_list()
        .choose(&mut rng)
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("network has no stations to choose from"))
}

fn route_failure(request: &RouteRequest, err: LibError) -> anyhow::Error {
    match err {
        LibError::UnknownStation { name, suggestions } => {
            anyhow::anyhow!(format_unknown_station_message(&name, &suggestions))
        }
        LibError::NoPathFound { .. } => anyhow::anyhow!(
            "No route found between {} and {}.",
            request.from,
            request.to
        ),
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_station_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown station '{}'.", name);
    if !suggestions.is_empty() {
        let formatted = if suggestions.len() == 1 {
            let suggestion = suggestions.first().expect("len checked above");
            format!("Did you mean '{suggestion}'?")
        } else {
            let joined = suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            format!("Did you mean one of: {}?", joined)
        };
        message.push(' ');
        message.push_str(&formatted);
    }
    message
}
