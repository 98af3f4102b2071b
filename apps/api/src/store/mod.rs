//! Document store, the persistence seam behind every route.
//!
//! Two backends share one contract: `PgDocumentStore` (JSONB documents in PostgreSQL)
//! and `MemoryDocumentStore` (process memory). `AppState` carries an
//! `Arc<dyn DocumentStore>` chosen at startup.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::mapper::{from_document, to_document, to_patch, Document, Entity, MapperError};

pub mod memory;
pub mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Fields that must be unique within a collection, besides `id`.
/// Mirrored by the partial unique indexes in `migrations/`.
pub const UNIQUE_KEYS: &[(&str, &str)] = &[
    ("users", "email"),
    ("candidates", "user_id"),
    ("companies", "user_id"),
];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("duplicate {field} in {collection}")]
    Duplicate {
        collection: String,
        field: String,
    },

    #[error("document in {collection} has no string id")]
    MissingId { collection: String },

    #[error(transparent)]
    Mapper(#[from] MapperError),
}

/// Conjunction of field equality tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push((field.into(), value.into()));
        self
    }

    /// True when every clause holds for `doc`.
    pub fn matches(&self, doc: &Document) -> bool {
        self.clauses
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }

    /// The filter as a JSON object, suitable for JSONB containment.
    pub fn to_json(&self) -> Value {
        Value::Object(self.clauses.iter().cloned().collect())
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a document. Violating `id` or a `UNIQUE_KEYS` entry yields `StoreError::Duplicate`.
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<(), StoreError>;

    async fn find_one(&self, collection: &str, filter: &Filter)
        -> Result<Option<Document>, StoreError>;

    /// Matching documents in insertion order, windowed by `skip`/`limit`.
    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Document>, StoreError>;

    /// Merges `set` into the first matching document. Returns whether one matched.
    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        set: Document,
    ) -> Result<bool, StoreError>;

    /// Releases the underlying connection(s).
    async fn close(&self);
}

/// Maps and inserts an entity into its collection.
pub async fn insert_entity<E: Entity>(
    store: &dyn DocumentStore,
    entity: &E,
) -> Result<(), StoreError> {
    store.insert_one(E::COLLECTION, to_document(entity)?).await
}

pub async fn find_entity<E: Entity>(
    store: &dyn DocumentStore,
    filter: &Filter,
) -> Result<Option<E>, StoreError> {
    match store.find_one(E::COLLECTION, filter).await? {
        Some(doc) => Ok(Some(from_document(doc)?)),
        None => Ok(None),
    }
}

pub async fn find_entities<E: Entity>(
    store: &dyn DocumentStore,
    filter: &Filter,
    skip: u64,
    limit: u64,
) -> Result<Vec<E>, StoreError> {
    store
        .find_many(E::COLLECTION, filter, skip, limit)
        .await?
        .into_iter()
        .map(|doc| from_document(doc).map_err(StoreError::from))
        .collect()
}

/// Applies a partial update to the first `E` matching `filter`.
pub async fn update_entity<E: Entity>(
    store: &dyn DocumentStore,
    filter: &Filter,
    fields: Document,
) -> Result<bool, StoreError> {
    store
        .update_one(E::COLLECTION, filter, to_patch::<E>(fields)?)
        .await
}

pub(crate) fn document_id(collection: &str, doc: &Document) -> Result<String, StoreError> {
    doc.get("id")
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| StoreError::MissingId {
            collection: collection.to_string(),
        })
}
