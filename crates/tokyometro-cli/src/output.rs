//! Output formatting for itinerary rendering.

use anyhow::Result;
use clap::ValueEnum;

use tokyometro_lib::{RouteSummary, TourSummary};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Step-by-step narrated text.
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputFormat {
    pub fn render_route(self, summary: &RouteSummary, verbose: bool) -> Result<()> {
        match self {
            OutputFormat::Text => print!("{}", summary.render(verbose)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        }
        Ok(())
    }

    pub fn render_tour(self, summary: &TourSummary, verbose: bool) -> Result<()> {
        match self {
            OutputFormat::Text => print!("{}", summary.render(verbose)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        }
        Ok(())
    }
}
