//! Annotator CLI
//!
//! Imports PGN transcripts into game blobs, prints positions from stored
//! blobs and exports them back to PGN.

use annotator::commands::{self, Command, USAGE};
use annotator::config::Config;
use annotator::error::AppError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(AppError::Usage(msg)) => {
            eprintln!("{msg}\n\n{USAGE}");
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    let config = Config::from_env();
    tracing::debug!(locale = %config.locale, pretty = config.pretty, "Config loaded");

    let output = commands::run(&config, command).await?;
    println!("{output}");
    Ok(())
}
