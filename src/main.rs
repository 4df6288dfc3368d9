use std::error::Error;

use ai_llm_service::telemetry;
use tracing::{Level, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; real deployments pass variables directly.
    let dotenv = dotenvy::dotenv();

    telemetry::init("info", Level::INFO)?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => info!("no .env file, using process environment"),
        Err(e) => warn!(error = %e, "ignoring unreadable .env file"),
    }

    api::start().await?;

    Ok(())
}
