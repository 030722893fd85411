mod error;
mod schema;

use crate::types::Schema;
use sqlx::{Connection, PgConnection};
use std::time::Instant;
use tokio::runtime::{Builder, Runtime};
use tracing::{info, warn};

pub use error::{describe_error, CatalogStep, ExtractError};
pub use schema::{load_schema, SchemaBuilder};

/// Synchronous schema extractor.
///
/// Owns a single-threaded runtime so callers can stay blocking. Each call to
/// [`Extractor::extract`] opens its own connection and closes it before
/// returning, whether the catalog queries succeeded or not.
pub struct Extractor {
    runtime: Runtime,
}

impl Extractor {
    pub fn new() -> std::io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { runtime })
    }

    /// Extract the full schema reachable through `connection_string`
    pub fn extract(&self, connection_string: &str) -> Result<Schema, ExtractError> {
        self.runtime.block_on(extract_async(connection_string))
    }
}

async fn extract_async(connection_string: &str) -> Result<Schema, ExtractError> {
    let start = Instant::now();

    let mut conn = PgConnection::connect(connection_string)
        .await
        .map_err(ExtractError::Connection)?;

    let result = load_schema(&mut conn).await;

    if let Err(e) = conn.close().await {
        warn!(error = %e, "Failed to close catalog connection");
    }

    let schema = result?;
    info!(
        tables = schema.len(),
        relationships = schema.relationships.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Extracted schema"
    );
    Ok(schema)
}
