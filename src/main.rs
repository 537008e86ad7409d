use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use olympic_stats::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Dataset location (file path or http(s) URL), overrides the configuration
    #[arg(short, long, global = true)]
    source: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for olympic_stats::AppCommand {
    fn from(cmd: Commands) -> olympic_stats::AppCommand {
        match cmd {
            Commands::Overview => olympic_stats::AppCommand::Overview,
            Commands::Detail { country } => olympic_stats::AppCommand::Detail { country },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display medals per country
    Overview,
    /// Display a country's participation history
    Detail {
        /// Country name, case-insensitive, may be percent-encoded
        country: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => olympic_stats::cli::setup::setup(),
        Some(cmd) => {
            olympic_stats::run_command(
                cmd.into(),
                cli.config_path.as_deref(),
                cli.source.as_deref(),
            )
            .await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
