//! # Identity 리포지토리 (MongoDB)
//!
//! `identities` 컬렉션에 Identity를 저장합니다.
//!
//! ## 특징
//!
//! - **원자적 생성**: `find_one_and_update` + `$setOnInsert` + upsert
//! - **데이터 무결성**: `(provider, external_id)` 유니크 인덱스
//!
//! UUID는 문자열로 저장합니다.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthProvider;
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::identity::{Email, ExternalAccount, Identity};
use crate::repositories::identities::IdentityRepository;

const COLLECTION: &str = "identities";

/// `identities` 컬렉션의 문서 형태
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IdentityDocument {
    #[serde(rename = "_id")]
    id: String,
    full_name: String,
    image_url: String,
    #[serde(default)]
    emails: Vec<Email>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    provider: Option<AuthProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    external_id: Option<String>,
}

impl From<&Identity> for IdentityDocument {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            full_name: identity.full_name.clone(),
            image_url: identity.image_url.clone(),
            emails: identity.emails.clone(),
            provider: identity.external.as_ref().map(|ext| ext.provider),
            external_id: identity.external.as_ref().map(|ext| ext.external_id.clone()),
        }
    }
}

impl TryFrom<IdentityDocument> for Identity {
    type Error = AppError;

    fn try_from(document: IdentityDocument) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&document.id)
            .map_err(|e| AppError::DatabaseError(format!("identity _id '{}': {}", document.id, e)))?;

        let external = match (document.provider, document.external_id) {
            (Some(provider), Some(external_id)) => Some(ExternalAccount::new(provider, external_id)),
            _ => None,
        };

        Ok(Identity {
            id,
            full_name: document.full_name,
            image_url: document.image_url,
            emails: document.emails,
            external,
        })
    }
}

pub struct MongoIdentityRepository {
    db: Arc<Database>,
}

impl MongoIdentityRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<IdentityDocument> {
        self.db.collection::<IdentityDocument>(COLLECTION)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        // 외부 계정 유니크 인덱스 (외부 계정이 없는 Identity는 제외)
        let external_index = IndexModel::builder()
            .keys(doc! { "provider": 1, "external_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("provider_external_id_unique".to_string())
                .partial_filter_expression(doc! { "external_id": { "$exists": true } })
                .build())
            .build();

        self.collection()
            .create_indexes([external_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_one(&self, filter: Document) -> AppResult<Option<Identity>> {
        self.collection()
            .find_one(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .map(Identity::try_from)
            .transpose()
    }
}

#[async_trait]
impl IdentityRepository for MongoIdentityRepository {
    async fn load(&self, id: Uuid) -> AppResult<Option<Identity>> {
        self.find_one(doc! { "_id": id.to_string() }).await
    }

    async fn load_by_external_id(
        &self,
        provider: AuthProvider,
        external_id: &str,
    ) -> AppResult<Option<Identity>> {
        self.find_one(doc! { "provider": provider.as_str(), "external_id": external_id })
            .await
    }

    async fn create(&self, identity: Identity) -> AppResult<Identity> {
        let filter = match &identity.external {
            Some(ext) => doc! { "provider": ext.provider.as_str(), "external_id": &ext.external_id },
            None => doc! { "_id": identity.id.to_string() },
        };

        let mut insert = mongodb::bson::to_document(&IdentityDocument::from(&identity))
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        // 필터의 동등 조건 필드는 upsert 시 자동으로 채워집니다.
        for key in filter.keys() {
            insert.remove(key);
        }

        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let result = self.collection()
            .find_one_and_update(filter.clone(), doc! { "$setOnInsert": insert })
            .with_options(options)
            .await;

        match result {
            Ok(Some(stored)) => Identity::try_from(stored),
            Ok(None) => Err(AppError::DatabaseError("upsert returned no document".to_string())),
            Err(e) => {
                // 동시 upsert가 유니크 인덱스에서 충돌하면 먼저 저장된 문서를 사용
                log::warn!("Identity upsert 충돌, 기존 문서 재조회: {}", e);
                self.find_one(filter)
                    .await?
                    .ok_or_else(|| AppError::DatabaseError(e.to_string()))
            }
        }
    }
}
