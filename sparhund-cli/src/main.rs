//! ## sparhund-cli
//! **Operational interface for the activity simulator**
//!
//! Executes one scripted simulation run (file, process, and network
//! activity) and reports where the event log landed.

use clap::Parser;
use sparhund_telemetry::EventLogger;

mod commands;

use commands::Cli;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    EventLogger::init();
    let cli = Cli::parse();
    commands::run_command(cli)
}
