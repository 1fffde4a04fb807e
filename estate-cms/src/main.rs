use std::process::ExitCode;

use thiserror::Error;
use tracing::{error, info};

use estate_cms::{census, config::StoreConfig, error::RepositoryError, logging};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Store(#[from] RepositoryError),
    #[error("failed to listen for shutdown signal: {0}")]
    Signal(#[from] std::io::Error),
}

async fn run(config: StoreConfig) -> Result<(), StartupError> {
    let store = config.connect().await?;
    let counts = census::collection_counts(&store).await?;

    info!(
        collections = counts.len(),
        documents = counts.iter().map(|(_, count)| count).sum::<u64>(),
        "document store ready, press Ctrl-C to stop"
    );

    tokio::signal::ctrl_c().await?;
    info!("shutting down");

    store.shutdown().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = StoreConfig::load();
    logging::init(&config.log_level);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "estate-cms stopped");
            ExitCode::FAILURE
        }
    }
}
