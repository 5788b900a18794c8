//! student-roster: command-line client for the student roster API
//!
//! Lists, searches, adds, edits, deletes and exports student records held
//! by a remote roster service.

mod cli;

use std::path::Path;

use clap::Parser;
use tracing::info;

use student_roster::{Config, RosterClient, RosterSession};

#[derive(Parser)]
#[command(name = "student-roster")]
#[command(about = "Manage the student roster from the command line")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "student-roster.toml")]
    config: String,

    /// Roster API base URL (overrides config file)
    #[arg(long, env = "ROSTER_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: cli::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("student_roster=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(Path::new(&cli.config))?;

    // Apply CLI overrides
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }

    info!("API: {}", config.api.base_url);

    let client = RosterClient::new(config.client_config())?;
    let mut session = RosterSession::new(client);

    match cli::execute_command(&mut session, cli.command, config.export.output_dir).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
