use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::mapper::{format_timestamp, Document};
use crate::models::candidate::Candidate;
use crate::profiles::candidates::get_candidate;
use crate::profiles::next_update_stamp;
use crate::store::{update_entity, DocumentStore, Filter};

/// Stores `contents` base64-encoded inside the user's candidate profile,
/// replacing any earlier CV.
pub async fn store_cv(
    store: &dyn DocumentStore,
    user_id: &str,
    contents: &[u8],
) -> Result<(), AppError> {
    let existing = get_candidate(store, user_id).await?;

    let mut fields = Document::new();
    fields.insert("cv_file".to_string(), Value::String(STANDARD.encode(contents)));
    fields.insert(
        "updated_at".to_string(),
        Value::String(format_timestamp(&next_update_stamp(existing.updated_at))),
    );

    let filter = Filter::new().eq("user_id", user_id);
    if !update_entity::<Candidate>(store, &filter, fields).await? {
        return Err(AppError::NotFound(
            "Candidate profile not found".to_string(),
        ));
    }

    info!(user_id, bytes = contents.len(), "CV stored");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::CandidateInput;
    use crate::store::{find_entity, insert_entity, MemoryDocumentStore};

    #[tokio::test]
    async fn test_cv_is_base64_and_overwrites() {
        let store = MemoryDocumentStore::new();
        let candidate = Candidate::new("u1".into(), CandidateInput::default());
        insert_entity(&store, &candidate).await.unwrap();

        store_cv(&store, "u1", b"first").await.unwrap();
        store_cv(&store, "u1", b"%PDF-1.7 second").await.unwrap();

        let stored: Candidate = find_entity(&store, &Filter::new().eq("user_id", "u1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.cv_file.as_deref(), Some("JVBERi0xLjcgc2Vjb25k"));
        assert!(stored.updated_at > candidate.updated_at);
    }

    #[tokio::test]
    async fn test_cv_upload_advances_stamp_past_future_clock() {
        let store = MemoryDocumentStore::new();
        let mut candidate = Candidate::new("u1".into(), CandidateInput::default());
        candidate.updated_at = chrono::Utc::now() + chrono::Duration::hours(2);
        insert_entity(&store, &candidate).await.unwrap();

        store_cv(&store, "u1", b"cv").await.unwrap();

        let stored: Candidate = find_entity(&store, &Filter::new().eq("user_id", "u1"))
            .await
            .unwrap()
            .unwrap();
        assert!(stored.updated_at > candidate.updated_at);
        assert_eq!(stored.cv_file.as_deref(), Some("Y3Y="));
    }

    #[tokio::test]
    async fn test_cv_without_profile_not_found() {
        let store = MemoryDocumentStore::new();
        assert!(matches!(
            store_cv(&store, "ghost", b"x").await,
            Err(AppError::NotFound(_))
        ));
    }
}
