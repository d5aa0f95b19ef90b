//! User 엔티티
//!
//! 외부 프로바이더 계정 하나를 나타내는 레코드입니다. `identity_id`로 [`Identity`]를 가리킵니다.
//!
//! [`Identity`]: crate::domain::entities::identity::Identity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthProvider;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub identity_id: Uuid,
    pub provider: AuthProvider,
    /// 프로바이더가 할당한 안정적인 계정 ID (GitHub의 숫자 ID)
    pub external_id: String,
    /// 프로바이더 로그인 이름
    pub username: String,
    /// 대표 이메일 (없을 수 있음)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new_oauth(
        identity_id: Uuid,
        provider: AuthProvider,
        external_id: String,
        username: String,
        email: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity_id,
            provider,
            external_id,
            username,
            email,
            created_at: Utc::now(),
        }
    }
}
