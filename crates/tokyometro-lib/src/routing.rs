use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::itinerary::path_totals;
use crate::network::{Network, NodeId};
use crate::path::shortest_path;

/// High-level route planning request: two station display names.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub from: String,
    pub to: String,
}

impl RouteRequest {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub start: NodeId,
    pub goal: NodeId,
    /// Total link `weight` along the route (the optimization metric).
    pub distance: f64,
    /// Total physical distance along the route, in kilometres.
    pub kilometres: f64,
    pub steps: Vec<NodeId>,
}

impl RoutePlan {
    /// Number of links in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Resolve a station display name to its representative node, with fuzzy
/// suggestions attached on failure.
pub fn resolve_station(network: &Network, name: &str) -> Result<NodeId> {
    network.node_by_station(name).ok_or_else(|| {
        let suggestions = network.fuzzy_station_matches(name, 3);
        Error::UnknownStation {
            name: name.to_string(),
            suggestions,
        }
    })
}

/// Compute a route between two station names.
///
/// Resolves names to representative nodes, runs the shortest path engine
/// over link weights, and totals the physical distance along the result so
/// callers get both figures.
pub fn plan_route(network: &Network, request: &RouteRequest) -> Result<RoutePlan> {
    let start = resolve_station(network, &request.from)?;
    let goal = resolve_station(network, &request.to)?;
    debug!(%start, %goal, "planning route");

    let found = shortest_path(network, start, goal)?;
    let (distance, kilometres) = path_totals(network, &found.nodes)?;

    Ok(RoutePlan {
        start,
        goal,
        distance,
        kilometres,
        steps: found.nodes,
    })
}
