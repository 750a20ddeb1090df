//! RingKeys - circular gesture keyboard decoder
//!
//! Command-line front end for classifying points, inspecting layouts and
//! decoding scripted or recorded gestures.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ringkeys::cli::common::load_config;
use ringkeys::cli::{
    ClassifyArgs, CliResult, ConfigArgs, ExitCode, InspectArgs, ReplayArgs, TypeArgs,
};
use ringkeys::constants::APP_BINARY_NAME;

/// RingKeys - circular gesture keyboard decoder
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a point into the dead zone or a sector
    Classify(ClassifyArgs),
    /// Show a layout's layers and entries
    Inspect(InspectArgs),
    /// Decode scripted gestures and print the resulting text
    Type(TypeArgs),
    /// Decode a recorded touch trace
    Replay(ReplayArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> CliResult<()> {
    let config_path = cli.config.as_deref();
    let config = || load_config(config_path);

    match &cli.command {
        Command::Classify(args) => args.execute(&config()?),
        Command::Inspect(args) => args.execute(&config()?),
        Command::Type(args) => args.execute(&config()?),
        Command::Replay(args) => args.execute(&config()?),
        Command::Config(args) => args.execute(config_path),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code().code());
    }
    std::process::exit(ExitCode::Success.code());
}
