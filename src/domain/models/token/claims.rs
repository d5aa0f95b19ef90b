//! JWT 클레임 구조체
//!
//! 발급되는 토큰의 페이로드와, 업스트림에서 서명 검증을 마친 토큰을 표현합니다.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `uuid` 클레임 이름
pub const UUID_CLAIM: &str = "uuid";

/// 발급 토큰의 클레임(Payload)
///
/// - `uuid`: Identity ID
/// - `fullName`, `imageURL`: 표시용 속성
/// - `iat`: 발급 시간 (Unix timestamp)
/// - `exp`: 만료 시간. 토큰 수명이 설정된 경우에만 포함됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub uuid: String,
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// 서명 검증을 통과한 토큰의 클레임 집합
///
/// 인증 미들웨어가 검증 후 request extension에 저장하며,
/// `TokenManager::locate`에 명시적으로 전달됩니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerifiedToken {
    claims: Map<String, Value>,
}

impl VerifiedToken {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self { claims }
    }

    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }
}

impl From<Map<String, Value>> for VerifiedToken {
    fn from(claims: Map<String, Value>) -> Self {
        Self::new(claims)
    }
}
