use std::sync::Arc;

use lambda_runtime::{Error, service_fn};
use linksum::core::config::AppConfig;
use linksum::worker::{WorkerServices, handler};
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    linksum::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let services = Arc::new(WorkerServices::from_config(&config)?);

    lambda_runtime::run(service_fn(move |event| {
        let services = Arc::clone(&services);
        async move { handler(&services, event).await }
    }))
    .await
}
