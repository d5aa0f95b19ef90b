//! # 사용자 리포지토리 구현 (MongoDB)
//!
//! 외부 프로바이더 계정 레코드를 `users` 컬렉션에 저장합니다.
//!
//! ## 특징
//!
//! - **원자적 생성**: `(provider, external_id)` 기준 insert-if-absent
//! - **데이터 무결성**: 유니크 제약 조건 및 인덱스 관리

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::{doc, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthProvider;
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::user::User;
use crate::repositories::users::UserRepository;

const COLLECTION: &str = "users";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: String,
    identity_id: String,
    provider: AuthProvider,
    external_id: String,
    username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            identity_id: user.identity_id.to_string(),
            provider: user.provider,
            external_id: user.external_id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = AppError;

    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        let parse = |field: &str, raw: &str| {
            Uuid::parse_str(raw)
                .map_err(|e| AppError::DatabaseError(format!("user {} '{}': {}", field, raw, e)))
        };

        Ok(User {
            id: parse("_id", &document.id)?,
            identity_id: parse("identity_id", &document.identity_id)?,
            provider: document.provider,
            external_id: document.external_id,
            username: document.username,
            email: document.email,
            created_at: document.created_at,
        })
    }
}

pub struct MongoUserRepository {
    db: Arc<Database>,
}

impl MongoUserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<UserDocument> {
        self.db.collection::<UserDocument>(COLLECTION)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        // 외부 계정 유니크 인덱스
        let external_index = IndexModel::builder()
            .keys(doc! { "provider": 1, "external_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("provider_external_id_unique".to_string())
                .build())
            .build();

        // Identity 역방향 조회 인덱스
        let identity_index = IndexModel::builder()
            .keys(doc! { "identity_id": 1 })
            .options(IndexOptions::builder()
                .name("identity_id".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([external_index, identity_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_one(&self, filter: Document) -> AppResult<Option<User>> {
        self.collection()
            .find_one(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .map(User::try_from)
            .transpose()
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn load(&self, id: Uuid) -> AppResult<Option<User>> {
        self.find_one(doc! { "_id": id.to_string() }).await
    }

    async fn create(&self, user: User) -> AppResult<User> {
        let filter = doc! { "provider": user.provider.as_str(), "external_id": &user.external_id };

        let mut insert = mongodb::bson::to_document(&UserDocument::from(&user))
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        insert.remove("provider");
        insert.remove("external_id");

        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let result = self.collection()
            .find_one_and_update(filter.clone(), doc! { "$setOnInsert": insert })
            .with_options(options)
            .await;

        match result {
            Ok(Some(stored)) => User::try_from(stored),
            Ok(None) => Err(AppError::DatabaseError("upsert returned no document".to_string())),
            Err(e) => {
                log::warn!("User upsert 충돌, 기존 문서 재조회: {}", e);
                self.find_one(filter)
                    .await?
                    .ok_or_else(|| AppError::DatabaseError(e.to_string()))
            }
        }
    }
}
