use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;

use super::{document_id, DocumentStore, Filter, StoreError, UNIQUE_KEYS};
use crate::mapper::Document;

/// Documents kept as JSONB rows of a single `documents` table.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Wraps a pool and brings the schema up to date.
    pub async fn new(pool: PgPool) -> Result<Self, StoreError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Document schema migrations applied");
        Ok(Self { pool })
    }
}

/// Maps a unique index violation back to the field it guards.
fn duplicate_field(collection: &str, constraint: Option<&str>) -> String {
    match constraint {
        Some("documents_pkey") | None => "id".to_string(),
        Some(name) => UNIQUE_KEYS
            .iter()
            .find(|(c, field)| *c == collection && name == format!("{c}_{field}_key"))
            .map(|(_, field)| field.to_string())
            .unwrap_or_else(|| name.to_string()),
    }
}

fn map_insert_error(collection: &str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Duplicate {
                collection: collection.to_string(),
                field: duplicate_field(collection, db_err.constraint()),
            };
        }
    }
    StoreError::Database(err)
}

fn into_document(body: Value) -> Option<Document> {
    match body {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<(), StoreError> {
        let id = document_id(collection, &doc)?;
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(&id)
            .bind(Value::Object(doc))
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_error(collection, e))?;
        Ok(())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let body: Option<Value> = sqlx::query_scalar(
            "SELECT body FROM documents WHERE collection = $1 AND body @> $2 ORDER BY seq LIMIT 1",
        )
        .bind(collection)
        .bind(filter.to_json())
        .fetch_optional(&self.pool)
        .await?;
        Ok(body.and_then(into_document))
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Document>, StoreError> {
        let bodies: Vec<Value> = sqlx::query_scalar(
            "SELECT body FROM documents WHERE collection = $1 AND body @> $2 \
             ORDER BY seq OFFSET $3 LIMIT $4",
        )
        .bind(collection)
        .bind(filter.to_json())
        .bind(i64::try_from(skip).unwrap_or(i64::MAX))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;
        Ok(bodies.into_iter().filter_map(into_document).collect())
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        set: Document,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE documents SET body = body || $3
            WHERE collection = $1 AND id = (
                SELECT id FROM documents
                WHERE collection = $1 AND body @> $2
                ORDER BY seq
                LIMIT 1
            )
            "#,
        )
        .bind(collection)
        .bind(filter.to_json())
        .bind(Value::Object(set))
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(collection, e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        info!("Closing PostgreSQL connection pool");
        self.pool.close().await;
    }
}
