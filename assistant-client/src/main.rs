use anyhow::{Context, Result};
use assistant_client::{Cli, ClientConfig, EnvFile, HttpAssistantApi, repl};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // BACKEND_API_URL_BASE may come from .env; clap reads it after this.
    let env_file = EnvFile::from(dotenvy::dotenv());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    env_file.log();

    let cli = Cli::parse();
    let config = ClientConfig::from(&cli);
    debug!(base_url = %config.base_url, "client configured");

    let api = HttpAssistantApi::new(config).context("failed to build HTTP client")?;

    if let Some(question) = cli.question.as_deref() {
        if !repl::ask_once(&api, question).await {
            std::process::exit(1);
        }
        return Ok(());
    }

    repl::run(&api).await
}
