//! Identity 엔티티
//!
//! 외부 프로바이더 로그인에 성공하면 생성되는 로컬 주체입니다.
//! 한 번 할당된 `id`는 변경되지 않으며, 발급되는 모든 토큰의 `uuid` 클레임이 됩니다.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthProvider;

/// 로컬 주체
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub full_name: String,
    pub image_url: String,
    /// 프로바이더가 반환한 순서를 유지합니다.
    #[serde(default)]
    pub emails: Vec<Email>,
    /// 이 Identity를 만든 외부 계정. 토큰에서 복원한 Identity에는 없습니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalAccount>,
}

/// 외부 프로바이더 계정 키
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalAccount {
    pub provider: AuthProvider,
    pub external_id: String,
}

/// Identity에 연결된 이메일 주소
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub address: String,
    pub verified: bool,
    #[serde(default)]
    pub primary: bool,
}

impl Identity {
    /// 외부 계정으로부터 새 Identity를 만듭니다. `id`는 새로 할당됩니다.
    pub fn new_external(
        full_name: String,
        image_url: String,
        emails: Vec<Email>,
        provider: AuthProvider,
        external_id: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name,
            image_url,
            emails,
            external: Some(ExternalAccount { provider, external_id }),
        }
    }

    pub fn is_external(&self, provider: &AuthProvider, external_id: &str) -> bool {
        self.external
            .as_ref()
            .is_some_and(|ext| &ext.provider == provider && ext.external_id == external_id)
    }
}

impl ExternalAccount {
    pub fn new(provider: AuthProvider, external_id: impl Into<String>) -> Self {
        Self {
            provider,
            external_id: external_id.into(),
        }
    }
}
