//! Entity Mapper: converts entities to and from their stored document form.
//!
//! Date-time fields are stored as RFC 3339 strings. Which fields are date-times is
//! declared per entity in `Entity::DATETIME_FIELDS`; nothing is inferred from field
//! names, so a `bio` that happens to look like a timestamp is left alone.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// The stored form of an entity: a JSON object keyed by field name.
pub type Document = Map<String, Value>;

/// A persisted record type.
pub trait Entity: Serialize + DeserializeOwned {
    /// Collection (table partition) the entity lives in.
    const COLLECTION: &'static str;
    /// Fields holding date-time values. Only these are (de)serialized as timestamps.
    const DATETIME_FIELDS: &'static [&'static str];
}

#[derive(Debug, Error)]
pub enum MapperError {
    #[error("{collection} entity did not serialize to an object")]
    NotAnObject { collection: &'static str },

    #[error("field '{field}' is not a valid ISO-8601 timestamp: {value}")]
    Timestamp { field: String, value: String },

    #[error("document does not match {collection} shape: {source}")]
    Shape {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Serializes an entity into its document form.
pub fn to_document<E: Entity>(entity: &E) -> Result<Document, MapperError> {
    let value = serde_json::to_value(entity).map_err(|source| MapperError::Shape {
        collection: E::COLLECTION,
        source,
    })?;

    let Value::Object(mut doc) = value else {
        return Err(MapperError::NotAnObject {
            collection: E::COLLECTION,
        });
    };

    normalize_datetime_fields(&mut doc, E::DATETIME_FIELDS)?;
    Ok(doc)
}

/// Rehydrates an entity from a stored document.
/// A declared date-time field that does not parse is an error, never silently kept.
pub fn from_document<E: Entity>(mut doc: Document) -> Result<E, MapperError> {
    normalize_datetime_fields(&mut doc, E::DATETIME_FIELDS)?;
    serde_json::from_value(Value::Object(doc)).map_err(|source| MapperError::Shape {
        collection: E::COLLECTION,
        source,
    })
}

/// Builds a partial document for an in-place update of `E`.
pub fn to_patch<E: Entity>(fields: Document) -> Result<Document, MapperError> {
    let mut patch = fields;
    normalize_datetime_fields(&mut patch, E::DATETIME_FIELDS)?;
    Ok(patch)
}

/// Renders a timestamp the way every document stores it.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn normalize_datetime_fields(doc: &mut Document, fields: &[&str]) -> Result<(), MapperError> {
    for field in fields {
        if let Some(value) = doc.get_mut(*field) {
            *value = canonical_timestamp(field, value)?;
        }
    }
    Ok(())
}

fn canonical_timestamp(field: &str, value: &Value) -> Result<Value, MapperError> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::String(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|ts| Value::String(format_timestamp(&ts.with_timezone(&Utc))))
            .map_err(|_| MapperError::Timestamp {
                field: field.to_string(),
                value: raw.clone(),
            }),
        other => Err(MapperError::Timestamp {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}
