// Module exports for CLI subcommands.
//
// Each module handles one subcommand; main.rs stays focused on parsing and
// coordination.

pub mod route;
pub mod tour;
