use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::itinerary::{narrate, path_totals, ItineraryEvent};
use crate::network::Network;
use crate::routing::RoutePlan;
use crate::tour::TourPlan;

/// Structured representation of a planned route that consumers can
/// serialise or render as text.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    /// Total link `weight` along the route.
    pub distance: f64,
    /// Total physical distance in kilometres.
    pub kilometres: f64,
    /// Node codes along the route, start first.
    pub path: Vec<String>,
    pub narrative: Vec<ItineraryEvent>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with narrated events.
    pub fn from_plan(network: &Network, plan: &RoutePlan) -> Result<Self> {
        if plan.steps.is_empty() {
            return Err(Error::EmptyRoute);
        }
        let narrative = narrate(network, &plan.steps)?;
        Ok(Self {
            distance: plan.distance,
            kilometres: plan.kilometres,
            path: plan.steps.iter().map(ToString::to_string).collect(),
            narrative,
        })
    }

    /// Render the itinerary as step-by-step text.
    pub fn render(&self, verbose: bool) -> String {
        render_events(&self.narrative, verbose)
    }
}

/// Structured representation of a planned grand tour.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TourSummary {
    /// Total link `weight` along the walk.
    pub distance: f64,
    /// Total physical distance in kilometres.
    pub kilometres: f64,
    /// Required nodes in visiting order.
    pub waypoints: Vec<String>,
    /// Full expanded walk.
    pub path: Vec<String>,
    pub narrative: Vec<ItineraryEvent>,
}

impl TourSummary {
    /// Convert a [`TourPlan`] into a summary with narrated events.
    pub fn from_plan(network: &Network, plan: &TourPlan) -> Result<Self> {
        if plan.steps.is_empty() {
            return Err(Error::EmptyRoute);
        }
        let narrative = narrate(network, &plan.steps)?;
        let (distance, kilometres) = path_totals(network, &plan.steps)?;
        Ok(Self {
            distance,
            kilometres,
            waypoints: plan.waypoints.iter().map(ToString::to_string).collect(),
            path: plan.steps.iter().map(ToString::to_string).collect(),
            narrative,
        })
    }

    /// Render the tour as step-by-step text.
    pub fn render(&self, verbose: bool) -> String {
        let mut buffer = String::from("Grand Tour Route:\n");
        buffer.push_str(&render_events(&self.narrative, verbose));
        buffer
    }
}

fn render_events(events: &[ItineraryEvent], verbose: bool) -> String {
    let mut buffer = String::new();
    for event in events {
        match event {
            ItineraryEvent::Board { line, station } => {
                let _ = writeln!(buffer, "Board the {line} line at {station} Station");
            }
            ItineraryEvent::Transfer {
                line,
                station,
                after_stations,
            } => {
                let _ = writeln!(
                    buffer,
                    "Transfer to the {line} line at {station} Station{}",
                    after_suffix(verbose, *after_stations)
                );
            }
            ItineraryEvent::UTurn {
                station,
                after_stations,
            } => {
                let _ = writeln!(
                    buffer,
                    "U-turn at {station} Station{}",
                    after_suffix(verbose, *after_stations)
                );
            }
            ItineraryEvent::Arrive { station } => {
                let _ = writeln!(buffer, "Arrive at {station} Station");
            }
            ItineraryEvent::TotalDistance { value, kilometres } => {
                let _ = writeln!(
                    buffer,
                    "Total distance traveled: {value:.2} min ({kilometres:.2} km)"
                );
            }
        }
    }
    buffer
}

fn after_suffix(verbose: bool, stations: usize) -> String {
    if !verbose || stations == 0 {
        return String::new();
    }
    let plural = if stations > 1 { "s" } else { "" };
    format!(" after {stations} station{plural}")
}
