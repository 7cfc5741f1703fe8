use clap::Parser;
use triage_cal::actions;
use triage_cal::cli::Cli;
use triage_cal::config::Config;
use triage_cal::error::Error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Environment(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let config = Config::load()?;

    match actions::run(cli, config).await {
        Ok(()) => Ok(()),
        // No report for a stale credential, just tell the user what to do
        Err(Error::AuthExpired) => {
            eprintln!(
                "The credentials have been revoked or expired, \
                 please re-authorize the application and try again"
            );
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
