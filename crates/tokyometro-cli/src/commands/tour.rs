//! Tour command handler for the grand tour over every station.

use anyhow::Result;
use tracing::debug;

use tokyometro_lib::{plan_grand_tour, Error as LibError, Network, TourSummary};

use crate::output::OutputFormat;

/// Handle the tour subcommand: visit every station once, approximately
/// minimizing total travel cost, and narrate the walk.
pub fn handle_tour(network: &Network, format: OutputFormat, verbose: bool) -> Result<()> {
    debug!(stations = network.node_count(), "handling tour command");

    let plan = match plan_grand_tour(network) {
        Ok(plan) => plan,
        Err(LibError::DisconnectedTour { code, from }) => {
            return Err(anyhow::anyhow!(
                "The network is not fully connected: {code} cannot be reached from {from}."
            ));
        }
        Err(other) => return Err(anyhow::Error::new(other)),
    };

    let summary = TourSummary::from_plan(network, &plan)?;
    format.render_tour(&summary, verbose)
}
