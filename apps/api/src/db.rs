use std::sync::Arc;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::store::{DocumentStore, MemoryDocumentStore, PgDocumentStore};

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Opens the document store for the process lifetime.
/// Without a database URL the store lives in memory and is lost on exit.
pub async fn connect_store(database_url: Option<&str>) -> Result<Arc<dyn DocumentStore>> {
    match database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            Ok(Arc::new(PgDocumentStore::new(pool).await?))
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory document store");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
    }
}
