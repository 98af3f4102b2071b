use tracing::info;

use crate::errors::AppError;
use crate::models::company::{Company, CompanyInput};
use crate::profiles::require_user;
use crate::store::{find_entity, insert_entity, DocumentStore, Filter, StoreError};

pub async fn create_company(
    store: &dyn DocumentStore,
    user_id: &str,
    input: CompanyInput,
) -> Result<Company, AppError> {
    require_user(store, user_id).await?;

    let company = Company::new(user_id.to_string(), input);
    match insert_entity(store, &company).await {
        Ok(()) => {}
        Err(StoreError::Duplicate { .. }) => {
            return Err(AppError::Conflict(
                "Company profile already exists".to_string(),
            ))
        }
        Err(e) => return Err(e.into()),
    }

    info!(user_id, company_id = %company.id, "Company profile created");
    Ok(company)
}

pub async fn get_company(store: &dyn DocumentStore, user_id: &str) -> Result<Company, AppError> {
    find_entity(store, &Filter::new().eq("user_id", user_id))
        .await?
        .ok_or_else(|| AppError::NotFound("Company profile not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::registration::register_user;
    use crate::models::user::{Role, UserCreate};
    use crate::store::MemoryDocumentStore;

    fn techviet() -> CompanyInput {
        CompanyInput {
            name: "TechViet".into(),
            description: "Phần mềm doanh nghiệp".into(),
            industry: "Software".into(),
            size: "50-200".into(),
            location: "TP. Hồ Chí Minh".into(),
            website: Some("https://techviet.vn".into()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_company() {
        let store = MemoryDocumentStore::new();
        let user = register_user(
            &store,
            UserCreate {
                email: "hr@techviet.com".into(),
                name: "HR".into(),
                role: Role::Employer,
            },
        )
        .await
        .unwrap();

        let company = create_company(&store, &user.id, techviet()).await.unwrap();
        assert_eq!(company.user_id, user.id);
        assert_eq!(company.logo, None);
        assert_eq!(get_company(&store, &user.id).await.unwrap(), company);

        let err = create_company(&store, &user.id, techviet()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_company_for_unknown_user() {
        let store = MemoryDocumentStore::new();
        assert!(matches!(
            create_company(&store, "ghost", techviet()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            get_company(&store, "ghost").await,
            Err(AppError::NotFound(_))
        ));
    }
}
