//! Tokyo Metro planner library entry points.
//!
//! This crate exposes helpers to load the transit network and its lookup
//! tables, run shortest path queries, plan the approximate grand tour over
//! every station, and narrate results as step-by-step itineraries.
//! Higher-level consumers (the CLI, visualizers) should only depend on the
//! functions exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod error;
pub mod itinerary;
pub mod network;
pub mod output;
pub mod path;
pub mod routing;
pub mod tour;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use error::{Error, Result};
pub use itinerary::{narrate, ItineraryEvent};
pub use network::{load_network, parse_network, Link, LineTag, Network, NodeId};
pub use output::{RouteSummary, TourSummary};
pub use path::{shortest_path, shortest_path_tree, PathFound, PathTree};
pub use routing::{plan_route, resolve_station, RoutePlan, RouteRequest};
pub use tour::{plan_grand_tour, TourPlan};
