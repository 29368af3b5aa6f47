mod commands_cmd;
mod config_cmd;
mod run_cmd;
mod wiring;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "Parley: slash-command chat bot")]
#[command(version)]
struct Cli {
    /// Config file to load (default: PARLEY_CONFIG, ~/.parley/parley.yaml, ./config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the platform, register commands and serve invocations
    Run,
    /// Print the command registration payload as JSON
    Commands,
    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Load and validate the config, then print it with secrets masked
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = parley_config::resolve_config_path(cli.config.as_deref());

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            if let Err(e) = run_cmd::run(&path).await {
                error!(error = %format!("{e:#}"), "Parley stopped");
                return Err(e);
            }
        }
        Commands::Commands => println!("{}", commands_cmd::wire_json()?),
        Commands::Config {
            action: ConfigAction::Check,
        } => config_cmd::check(&path).await?,
    }

    Ok(())
}
