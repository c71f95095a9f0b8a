use serde::Serialize;

use crate::error::{Error, Result};
use crate::network::{LineTag, Network, NodeId};

/// Narrative event within an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ItineraryEvent {
    /// Emitted once at the start of the journey.
    Board { line: String, station: String },
    /// Emitted whenever consecutive path nodes change line.
    Transfer {
        line: String,
        station: String,
        /// Stations passed since the previous event.
        after_stations: usize,
    },
    /// Emitted when the path backtracks without net progress. Takes
    /// precedence over a transfer at the same node.
    UTurn {
        station: String,
        after_stations: usize,
    },
    /// Emitted once for the final node.
    Arrive { station: String },
    /// Path totals: `value` sums link `weight` (the optimization metric, in
    /// minutes-equivalent), `kilometres` sums physical `real_distance`.
    /// Both rounded to two decimal places.
    TotalDistance { value: f64, kilometres: f64 },
}

/// Convert an ordered node sequence into narrative events.
///
/// When the first two nodes map to the same physical station, the journey is
/// a same-station transfer at departure: boarding is attributed to the
/// second node's line and the first node is treated as the pre-boarding
/// platform rather than a travel step.
pub fn narrate(network: &Network, path: &[NodeId]) -> Result<Vec<ItineraryEvent>> {
    match path {
        [] => Err(Error::EmptyRoute),
        [only] => Ok(vec![
            ItineraryEvent::Arrive {
                station: network.station_display_name(*only),
            },
            ItineraryEvent::TotalDistance {
                value: 0.0,
                kilometres: 0.0,
            },
        ]),
        _ => narrate_journey(network, path),
    }
}

fn narrate_journey(network: &Network, path: &[NodeId]) -> Result<Vec<ItineraryEvent>> {
    let mut events = Vec::new();

    let start_index = if network.station_display_name(path[0])
        == network.station_display_name(path[1])
    {
        1
    } else {
        0
    };
    let boarding = path[start_index];
    events.push(ItineraryEvent::Board {
        line: network.line_display_name(boarding.line()),
        station: network.station_display_name(boarding),
    });

    let mut since_event = 0usize;
    for i in start_index..path.len() - 1 {
        let current = path[i];
        let next = path[i + 1];

        // U-turn test at `next`: its following node equals its previous one.
        if path.get(i + 2) == Some(&current) {
            events.push(ItineraryEvent::UTurn {
                station: network.station_display_name(next),
                after_stations: since_event,
            });
            since_event = 0;
            continue;
        }

        if next.line() != current.line() {
            events.push(ItineraryEvent::Transfer {
                line: transfer_label(network, current, next)?,
                station: network.station_display_name(next),
                after_stations: since_event,
            });
            since_event = 0;
        } else {
            since_event += 1;
        }
    }

    events.push(ItineraryEvent::Arrive {
        station: network.station_display_name(path[path.len() - 1]),
    });

    let (value, kilometres) = path_totals(network, path)?;
    events.push(ItineraryEvent::TotalDistance { value, kilometres });

    Ok(events)
}

/// Line label narrated for a transfer. Hops riding a non-metro connection
/// (JR, bus) are labelled with that operator rather than the arrival node's
/// metro line.
fn transfer_label(network: &Network, from: NodeId, to: NodeId) -> Result<String> {
    let link = network.link(from, to)?;
    Ok(match &link.line {
        LineTag::External(label) => label.clone(),
        LineTag::Metro(_) | LineTag::Transfer => network.line_display_name(to.line()),
    })
}

/// Sum link `weight` and `real_distance` along the full path, rounded to
/// two decimal places.
pub fn path_totals(network: &Network, path: &[NodeId]) -> Result<(f64, f64)> {
    let mut weight = 0.0;
    let mut real_distance = 0.0;
    for pair in path.windows(2) {
        let link = network.link(pair[0], pair[1])?;
        weight += link.weight;
        real_distance += link.real_distance;
    }
    Ok((round2(weight), round2(real_distance)))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
