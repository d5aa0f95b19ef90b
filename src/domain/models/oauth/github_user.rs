//! # GitHub OAuth 응답 모델
//!
//! GitHub OAuth 2.0 및 REST API 응답을 매핑합니다.
//!
//! - `POST https://github.com/login/oauth/access_token` → [`GitHubTokenResponse`]
//! - `GET https://api.github.com/user` → [`GitHubUser`]
//! - `GET https://api.github.com/user/emails` → `Vec<GitHubEmail>`

use serde::Deserialize;

use crate::domain::entities::identity::Email;

/// 토큰 교환 응답
///
/// GitHub는 잘못된 code에 대해서도 200 OK와 함께 `error` 필드를 반환하므로
/// 두 형태를 모두 받을 수 있도록 모든 필드가 선택적입니다.
///
/// ```json
/// { "error": "bad_verification_code", "error_description": "The code passed is incorrect or expired." }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct GitHubTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl GitHubTokenResponse {
    /// 비어 있지 않은 액세스 토큰을 반환합니다.
    pub fn usable_access_token(&self) -> Option<&str> {
        match (&self.error, &self.access_token) {
            (None, Some(token)) if !token.trim().is_empty() => Some(token.as_str()),
            _ => None,
        }
    }
}

/// GitHub 사용자 프로필
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    /// 변하지 않는 숫자 계정 ID. 외부 식별자로 사용합니다.
    pub id: u64,
    /// 로그인 이름 (변경될 수 있음)
    pub login: String,
    /// 표시 이름. 설정하지 않은 사용자는 `null`입니다.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// 공개 이메일
    #[serde(default)]
    pub email: Option<String>,
}

impl GitHubUser {
    pub fn external_id(&self) -> String {
        self.id.to_string()
    }

    /// 표시 이름이 없으면 로그인 이름을 사용합니다.
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.login)
            .to_string()
    }
}

/// `/user/emails` 응답 항목
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubEmail {
    pub email: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub visibility: Option<String>,
}

impl From<GitHubEmail> for Email {
    fn from(email: GitHubEmail) -> Self {
        Email {
            address: email.email,
            verified: email.verified,
            primary: email.primary,
        }
    }
}
