use std::error::Error;

use tracing::{debug, error};

mod telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file when one exists.
    let dotenv = dotenvy::dotenv();

    telemetry::init()?;

    if let Err(err) = dotenv {
        debug!(error = %err, "no .env file loaded");
    }

    if let Err(err) = api::start().await {
        error!(error = %err, "review bridge stopped");
        return Err(err.into());
    }

    Ok(())
}
