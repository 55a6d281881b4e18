use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::error;

use sparhund_config::SimulationConfig;
use sparhund_simulator::SimulationRun;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute one full simulation run
    Run(RunArgs),
    /// Check a configuration file without running anything
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Configuration file; defaults plus config/sparhund.yaml when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Scratch directory for generated files
    #[arg(long)]
    pub directory: Option<PathBuf>,
    /// Extension for generated files (without the dot)
    #[arg(long)]
    pub extension: Option<String>,
    /// Endpoint fetched by the network stage
    #[arg(long)]
    pub endpoint: Option<String>,
    /// Executable spawned by the process stage
    #[arg(long)]
    pub executable: Option<String>,
    /// Arguments for the executable, passed through unsanitized
    #[arg(long, num_args = 0.., requires = "executable")]
    pub args: Vec<String>,
    /// Directory receiving the persisted event log
    #[arg(long)]
    pub report_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Configuration file to check
    pub config: PathBuf,
}

pub fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match cli.command {
        Commands::Run(run_args) => run_simulation(run_args),
        Commands::Validate(validate_args) => validate_config(validate_args),
    }
}

fn run_simulation(args: RunArgs) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load_from_path(path)?,
        None => SimulationConfig::load()?,
    };
    apply_overrides(&mut config, &args);

    let mut run = SimulationRun::new(config);
    match run.execute() {
        Ok(message) => {
            println!("{message}");
            Ok(())
        }
        Err(err) => {
            error!(run_id = run.id(), stage = %err.stage, "simulation run aborted");
            Err(err.into())
        }
    }
}

fn validate_config(args: ValidateArgs) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = SimulationConfig::load_from_path(&args.config)?;
    println!(
        "{} is valid (endpoint: {}, scratch: {})",
        args.config.display(),
        config.network.endpoint,
        config.scratch.directory.display()
    );
    Ok(())
}

fn apply_overrides(config: &mut SimulationConfig, args: &RunArgs) {
    if let Some(directory) = &args.directory {
        config.scratch.directory = directory.clone();
    }
    if let Some(extension) = &args.extension {
        config.scratch.extension = extension.clone();
    }
    if let Some(endpoint) = &args.endpoint {
        config.network.endpoint = endpoint.clone();
    }
    if let Some(executable) = &args.executable {
        config.executable.program = executable.clone();
        config.executable.args = args.args.clone();
    }
    if let Some(report_dir) = &args.report_dir {
        config.report.directory = report_dir.clone();
    }
}
