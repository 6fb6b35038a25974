use std::time::Duration;

use mongodb::{Client, bson::doc, options::ClientOptions};

use crate::config::Config;

pub async fn connect(config: &Config) -> Result<Client, mongodb::error::Error> {
    let mut options = ClientOptions::parse(&config.mongodb_uri).await?;
    options.app_name = Some(config.otel_service_name.clone());
    options.max_pool_size = Some(25);
    options.min_pool_size = Some(5);
    options.server_selection_timeout = Some(Duration::from_secs(5));

    let client = Client::with_options(options)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;

    tracing::info!(database = %config.mongodb_database, "MongoDB client connected");

    Ok(client)
}
