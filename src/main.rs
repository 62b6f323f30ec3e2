use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use stockcmp::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for stockcmp::AppCommand {
    fn from(cmd: Commands) -> stockcmp::AppCommand {
        match cmd {
            Commands::Serve { bind } => stockcmp::AppCommand::Serve { bind },
            Commands::Compare {
                symbol1,
                symbol2,
                start,
                end,
                json,
            } => stockcmp::AppCommand::Compare {
                symbol1,
                symbol2,
                start,
                end,
                json,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Serve the comparison web page and API
    Serve {
        /// Address to listen on, overrides the configured one
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Compare two symbols in the terminal
    Compare {
        symbol1: String,
        symbol2: String,
        /// First date to include (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// Last date to include (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Print the chart description as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => stockcmp::cli::setup::setup(),
        Some(cmd) => stockcmp::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
