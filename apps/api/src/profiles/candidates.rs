use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::mapper::format_timestamp;
use crate::models::candidate::{Candidate, CandidateInput};
use crate::profiles::{next_update_stamp, require_user};
use crate::store::{find_entity, insert_entity, update_entity, DocumentStore, Filter, StoreError};

const NOT_FOUND: &str = "Candidate profile not found";

pub async fn create_candidate(
    store: &dyn DocumentStore,
    user_id: &str,
    input: CandidateInput,
) -> Result<Candidate, AppError> {
    require_user(store, user_id).await?;

    let candidate = Candidate::new(user_id.to_string(), input);
    match insert_entity(store, &candidate).await {
        Ok(()) => {}
        Err(StoreError::Duplicate { .. }) => {
            return Err(AppError::Conflict(
                "Candidate profile already exists".to_string(),
            ))
        }
        Err(e) => return Err(e.into()),
    }

    info!(user_id, candidate_id = %candidate.id, "Candidate profile created");
    Ok(candidate)
}

pub async fn get_candidate(store: &dyn DocumentStore, user_id: &str) -> Result<Candidate, AppError> {
    find_entity(store, &Filter::new().eq("user_id", user_id))
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

/// Replaces every mutable field of the user's candidate profile and returns the stored result.
pub async fn update_candidate(
    store: &dyn DocumentStore,
    user_id: &str,
    input: CandidateInput,
) -> Result<Candidate, AppError> {
    let existing = get_candidate(store, user_id).await?;

    let Value::Object(mut fields) = serde_json::to_value(&input)
        .map_err(|e| AppError::Internal(e.into()))?
    else {
        return Err(AppError::Internal(anyhow::anyhow!(
            "candidate input did not serialize to an object"
        )));
    };
    fields.insert(
        "updated_at".to_string(),
        Value::String(format_timestamp(&next_update_stamp(existing.updated_at))),
    );

    let filter = Filter::new().eq("user_id", user_id);
    if !update_entity::<Candidate>(store, &filter, fields).await? {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }

    info!(user_id, candidate_id = %existing.id, "Candidate profile updated");
    get_candidate(store, user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::registration::register_user;
    use crate::models::user::{Role, UserCreate};
    use crate::store::MemoryDocumentStore;

    async fn registered(store: &MemoryDocumentStore) -> String {
        register_user(
            store,
            UserCreate {
                email: "a@x.com".into(),
                name: "An".into(),
                role: Role::Candidate,
            },
        )
        .await
        .unwrap()
        .id
    }

    fn skills(list: &[&str]) -> CandidateInput {
        CandidateInput {
            skills: list.iter().map(|s| s.to_string()).collect(),
            location: "Đà Nẵng".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_requires_user() {
        let store = MemoryDocumentStore::new();
        let err = create_candidate(&store, "ghost", skills(&["Go"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "User not found"));
    }

    #[tokio::test]
    async fn test_second_profile_for_user_conflicts() {
        let store = MemoryDocumentStore::new();
        let user_id = registered(&store).await;
        create_candidate(&store, &user_id, skills(&["Go"])).await.unwrap();
        let err = create_candidate(&store, &user_id, skills(&["Rust"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_advances_stamp() {
        let store = MemoryDocumentStore::new();
        let user_id = registered(&store).await;
        let created = create_candidate(&store, &user_id, skills(&["Go"])).await.unwrap();

        let mut input = skills(&["Go", "Rust"]);
        input.bio = "Backend developer".into();
        input.desired_salary = Some(30_000_000);
        let updated = update_candidate(&store, &user_id, input).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.user_id, user_id);
        assert_eq!(updated.skills, vec!["Go", "Rust"]);
        assert_eq!(updated.bio, "Backend developer");
        assert_eq!(updated.desired_salary, Some(30_000_000));
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(get_candidate(&store, &user_id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_clears_omitted_fields() {
        let store = MemoryDocumentStore::new();
        let user_id = registered(&store).await;
        let mut input = skills(&["Go"]);
        input.desired_salary = Some(10);
        create_candidate(&store, &user_id, input).await.unwrap();

        let updated = update_candidate(&store, &user_id, CandidateInput::default())
            .await
            .unwrap();
        assert!(updated.skills.is_empty());
        assert_eq!(updated.desired_salary, None);
        assert_eq!(updated.location, "");
    }

    #[tokio::test]
    async fn test_update_missing_profile_not_found() {
        let store = MemoryDocumentStore::new();
        let err = update_candidate(&store, "ghost", skills(&["Go"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == NOT_FOUND));
    }
}
