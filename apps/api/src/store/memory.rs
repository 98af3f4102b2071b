use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{document_id, DocumentStore, Filter, StoreError, UNIQUE_KEYS};
use crate::mapper::Document;

/// In-process document store. Collections keep insertion order.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn unique_fields(collection: &str) -> impl Iterator<Item = &'static str> + '_ {
    std::iter::once("id").chain(
        UNIQUE_KEYS
            .iter()
            .filter(move |(c, _)| *c == collection)
            .map(|(_, field)| *field),
    )
}

fn check_unique(collection: &str, existing: &[Document], doc: &Document) -> Result<(), StoreError> {
    for field in unique_fields(collection) {
        let Some(value) = doc.get(field) else {
            continue;
        };
        if existing.iter().any(|d| d.get(field) == Some(value)) {
            return Err(StoreError::Duplicate {
                collection: collection.to_string(),
                field: field.to_string(),
            });
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<(), StoreError> {
        document_id(collection, &doc)?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        check_unique(collection, docs, &doc)?;
        docs.push(doc);
        Ok(())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)))
            .cloned())
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| filter.matches(d))
                    .skip(usize::try_from(skip).unwrap_or(usize::MAX))
                    .take(usize::try_from(limit).unwrap_or(usize::MAX))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        set: Document,
    ) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let Some(index) = docs.iter().position(|d| filter.matches(d)) else {
            return Ok(false);
        };

        // only fields in `set` can change
        for field in unique_fields(collection) {
            let Some(value) = set.get(field) else {
                continue;
            };
            let taken = docs
                .iter()
                .enumerate()
                .any(|(i, d)| i != index && d.get(field) == Some(value));
            if taken {
                return Err(StoreError::Duplicate {
                    collection: collection.to_string(),
                    field: field.to_string(),
                });
            }
        }

        docs[index].extend(set);
        Ok(true)
    }

    async fn close(&self) {
        self.collections.write().await.clear();
    }
}
