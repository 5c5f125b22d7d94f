use anyhow::Context;
use serde_json::json;

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::database::DatabaseManager;

async fn connect() -> anyhow::Result<DatabaseManager> {
    DatabaseManager::connect(&config().database)
        .await
        .context("Failed to connect to the database")
}

pub async fn migrate(output_format: OutputFormat) -> anyhow::Result<()> {
    let db = connect().await?;
    db.migrate().await.context("Failed to apply migrations")?;
    db.close().await;
    output_success(&output_format, "Migrations applied", None)
}

pub async fn health(output_format: OutputFormat) -> anyhow::Result<()> {
    let db = connect().await?;
    let result = db.health_check().await;
    db.close().await;

    match result {
        Ok(()) => output_success(&output_format, "Database is reachable", Some(json!({ "database": "ok" }))),
        Err(e) => {
            output_error(&output_format, &e.to_string(), Some("DATABASE_UNAVAILABLE"))?;
            Err(e).context("Health check failed")
        }
    }
}
