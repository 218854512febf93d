use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use arthra_lambda::config::{AppConfig, StorageBackend};
use arthra_lambda::router;
use arthra_lambda::state::AppState;
use arthra_storage::{MemoryStore, PatientStore, S3Store};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        storage = ?config.storage,
        report_format = %config.report_format,
        listen = config.listen.as_deref().unwrap_or("lambda"),
        "starting arthra api"
    );

    match config.storage {
        StorageBackend::Memory => serve(MemoryStore::new(), config).await,
        StorageBackend::S3 => {
            let client = arthra_storage::client::build_client().await;
            let store = S3Store::new(client, config.bucket.clone());
            serve(store, config).await
        }
    }
}

async fn serve<S: PatientStore + 'static>(store: S, config: AppConfig) -> eyre::Result<()> {
    let state = AppState {
        store: Arc::new(store),
        styles: Arc::new(config.styles),
        report_format: config.report_format,
    };
    let app = router(state);

    match config.listen {
        Some(addr) => {
            let listener = TcpListener::bind(&addr).await?;
            tracing::info!(%addr, "listening");
            axum::serve(listener, app).await?;
            Ok(())
        }
        None => lambda_http::run(app).await.map_err(|e| eyre::eyre!(e)),
    }
}
