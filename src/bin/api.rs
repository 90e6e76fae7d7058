use std::sync::Arc;

use lambda_runtime::{Error, service_fn};
use linksum::api::{SqsTaskQueue, handler};
use linksum::core::config::AppConfig;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    linksum::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let queue = SqsTaskQueue::from_env(config.processing_queue_url.clone()).await;
    let state = Arc::new((config, queue));

    lambda_runtime::run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move {
            let (config, queue) = &*state;
            handler(config, queue, event).await
        }
    }))
    .await
}
