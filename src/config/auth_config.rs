//! # Authentication Configuration Module
//!
//! GitHub OAuth 프로바이더, 로그인 플로우, JWT 서명 키 관련 설정을 관리하는 모듈입니다.
//!
//! 모든 설정은 시작 시점에 한 번 환경 변수에서 읽어 구조체로 만들고,
//! 이후에는 `AppServices`를 통해 주입됩니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### GitHub OAuth 설정
//! ```bash
//! export GITHUB_CLIENT_ID="your-github-client-id"
//! export GITHUB_CLIENT_SECRET="your-github-client-secret"
//! export GITHUB_REDIRECT_URI="http://localhost:8080/api/login/authorize"   # 선택
//! export GITHUB_SCOPES="user:email"                                        # 선택
//! ```
//!
//! ### JWT 서명 키 설정
//! ```bash
//! export JWT_PRIVATE_KEY_PATH="./keys/jwt_private_key.pem"
//! export JWT_PUBLIC_KEY_PATH="./keys/jwt_public_key.pem"
//! export JWT_EXPIRATION_HOURS="24"      # 설정하지 않으면 만료 없음
//! ```
//!
//! ### 로그인 플로우 설정
//! ```bash
//! export LOGIN_DEFAULT_REDIRECT="http://localhost:3000/"
//! export LOGIN_ALLOWED_REDIRECT_ORIGINS="http://localhost:3000,https://app.example.com"
//! export OAUTH_SESSION_TIMEOUT_MINUTES="10"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{GitHubOAuthConfig, LoginConfig, TokenKeyConfig};
//!
//! let github = GitHubOAuthConfig::from_env()?;
//! let login = LoginConfig::from_env()?;
//! let keys = TokenKeyConfig::from_env();
//! ```

use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::core::errors::{AppError, AppResult};

/// GitHub OAuth 2.0 설정
///
/// 엔드포인트 URL은 기본적으로 github.com을 가리키며, 테스트나 GitHub Enterprise
/// 환경에서는 환경 변수로 바꿀 수 있습니다.
#[derive(Debug, Clone)]
pub struct GitHubOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// 비어 있으면 GitHub 앱에 등록된 콜백 URL을 사용합니다.
    pub redirect_uri: Option<String>,
    pub auth_uri: String,
    pub token_uri: String,
    /// REST API 기본 URL (`/user`, `/user/emails`가 붙습니다)
    pub api_uri: String,
    pub scopes: String,
    /// 토큰 교환/프로필 조회 요청 타임아웃
    pub timeout: Duration,
}

impl GitHubOAuthConfig {
    pub const DEFAULT_AUTH_URI: &'static str = "https://github.com/login/oauth/authorize";
    pub const DEFAULT_TOKEN_URI: &'static str = "https://github.com/login/oauth/access_token";
    pub const DEFAULT_API_URI: &'static str = "https://api.github.com";
    pub const DEFAULT_SCOPES: &'static str = "user:email";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// 환경 변수에서 GitHub OAuth 설정을 읽습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigError` - `GITHUB_CLIENT_ID` 또는 `GITHUB_CLIENT_SECRET` 누락
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            client_id: required("GITHUB_CLIENT_ID")?,
            client_secret: required("GITHUB_CLIENT_SECRET")?,
            redirect_uri: optional("GITHUB_REDIRECT_URI"),
            auth_uri: optional("GITHUB_AUTH_URI").unwrap_or_else(|| Self::DEFAULT_AUTH_URI.to_string()),
            token_uri: optional("GITHUB_TOKEN_URI").unwrap_or_else(|| Self::DEFAULT_TOKEN_URI.to_string()),
            api_uri: optional("GITHUB_API_URI").unwrap_or_else(|| Self::DEFAULT_API_URI.to_string()),
            scopes: optional("GITHUB_SCOPES").unwrap_or_else(|| Self::DEFAULT_SCOPES.to_string()),
            timeout: Duration::from_secs(
                parse_or("OAUTH_PROVIDER_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS),
            ),
        })
    }
}

/// JWT 서명 키 설정
#[derive(Debug, Clone)]
pub struct TokenKeyConfig {
    pub private_key_path: String,
    pub public_key_path: String,
    /// 토큰 헤더의 `kid`
    pub key_id: String,
    /// `None`이면 `exp` 클레임 없이 발급합니다.
    pub expiration_hours: Option<i64>,
}

impl TokenKeyConfig {
    pub fn from_env() -> Self {
        let expiration_hours = optional("JWT_EXPIRATION_HOURS").and_then(|raw| {
            match raw.parse::<i64>() {
                Ok(hours) if hours > 0 => Some(hours),
                _ => {
                    log::warn!("JWT_EXPIRATION_HOURS='{}' 값을 무시합니다 (양의 정수가 아님)", raw);
                    None
                }
            }
        });

        Self {
            private_key_path: optional("JWT_PRIVATE_KEY_PATH")
                .unwrap_or_else(|| "./keys/jwt_private_key.pem".to_string()),
            public_key_path: optional("JWT_PUBLIC_KEY_PATH")
                .unwrap_or_else(|| "./keys/jwt_public_key.pem".to_string()),
            key_id: optional("JWT_KEY_ID").unwrap_or_else(|| "identity-auth-key-1".to_string()),
            expiration_hours,
        }
    }

    pub fn lifetime(&self) -> Option<chrono::Duration> {
        self.expiration_hours.map(chrono::Duration::hours)
    }
}

/// 로그인 플로우 설정
#[derive(Debug, Clone)]
pub struct LoginConfig {
    /// Referer가 없거나 허용되지 않은 경우 사용하는 최종 리다이렉트 대상
    pub default_redirect: Url,
    /// 리다이렉트를 허용하는 origin 목록 (`scheme://host[:port]`)
    pub allowed_redirect_origins: Vec<String>,
    /// `state` 레코드 유효 시간
    pub state_ttl: Duration,
}

impl LoginConfig {
    pub const DEFAULT_REDIRECT: &'static str = "http://localhost:3000/";
    pub const DEFAULT_STATE_TTL_MINUTES: u64 = 10;

    /// # Errors
    ///
    /// * `AppError::ConfigError` - `LOGIN_DEFAULT_REDIRECT`가 절대 URL이 아님
    pub fn from_env() -> AppResult<Self> {
        let raw_default =
            optional("LOGIN_DEFAULT_REDIRECT").unwrap_or_else(|| Self::DEFAULT_REDIRECT.to_string());
        let default_redirect = Url::parse(&raw_default).map_err(|e| {
            AppError::ConfigError(format!("LOGIN_DEFAULT_REDIRECT '{}': {}", raw_default, e))
        })?;

        let allowed_redirect_origins = optional("LOGIN_ALLOWED_REDIRECT_ORIGINS")
            .map(|raw| split_list(&raw))
            .unwrap_or_default();

        let minutes = parse_or("OAUTH_SESSION_TIMEOUT_MINUTES", Self::DEFAULT_STATE_TTL_MINUTES);

        Ok(Self::new(default_redirect, allowed_redirect_origins, Duration::from_secs(minutes * 60)))
    }

    /// 기본 리다이렉트 대상의 origin은 항상 허용 목록에 포함됩니다.
    pub fn new(default_redirect: Url, allowed_redirect_origins: Vec<String>, state_ttl: Duration) -> Self {
        let mut origins: Vec<String> = allowed_redirect_origins
            .into_iter()
            .map(|origin| origin.trim_end_matches('/').to_string())
            .collect();

        let default_origin = default_redirect.origin().ascii_serialization();
        if !origins.contains(&default_origin) {
            origins.push(default_origin);
        }

        Self {
            default_redirect,
            allowed_redirect_origins: origins,
            state_ttl,
        }
    }

    pub fn is_allowed_redirect(&self, url: &Url) -> bool {
        matches!(url.scheme(), "http" | "https")
            && self
                .allowed_redirect_origins
                .contains(&url.origin().ascii_serialization())
    }
}

/// 지원하는 외부 인증 프로바이더
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    GitHub,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::GitHub => "github",
        }
    }
}

fn required(key: &str) -> AppResult<String> {
    optional(key).ok_or_else(|| AppError::ConfigError(format!("{} must be set", key)))
}

/// 비어 있는 값은 설정되지 않은 것으로 취급합니다.
pub(crate) fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    optional(key).and_then(|raw| raw.parse().ok()).unwrap_or(default)
}

pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_config(allowed: &[&str]) -> LoginConfig {
        LoginConfig::new(
            Url::parse("http://localhost:3000/").unwrap(),
            allowed.iter().map(|s| s.to_string()).collect(),
            Duration::from_secs(600),
        )
    }

    #[test]
    fn test_auth_provider_serialization() {
        let json = serde_json::to_string(&AuthProvider::GitHub).unwrap();
        assert_eq!(json, "\"github\"");

        let deserialized: AuthProvider = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, AuthProvider::GitHub);
        assert_eq!(deserialized.as_str(), "github");
    }

    #[test]
    fn test_default_redirect_origin_is_always_allowed() {
        let config = login_config(&[]);

        assert!(config.is_allowed_redirect(&Url::parse("http://localhost:3000/spaces/42").unwrap()));
        assert!(!config.is_allowed_redirect(&Url::parse("http://localhost:3001/").unwrap()));
    }

    #[test]
    fn test_allowed_redirect_origins() {
        let config = login_config(&["https://app.example.com/", "https://admin.example.com"]);

        assert!(config.is_allowed_redirect(&Url::parse("https://app.example.com/home?x=1").unwrap()));
        assert!(config.is_allowed_redirect(&Url::parse("https://admin.example.com/").unwrap()));
        assert!(!config.is_allowed_redirect(&Url::parse("http://app.example.com/").unwrap()));
        assert!(!config.is_allowed_redirect(&Url::parse("https://evil.example.org/").unwrap()));
        assert!(!config.is_allowed_redirect(&Url::parse("javascript:alert(1)").unwrap()));
    }

    #[test]
    fn test_token_key_lifetime() {
        let config = TokenKeyConfig {
            private_key_path: String::new(),
            public_key_path: String::new(),
            key_id: "kid".to_string(),
            expiration_hours: Some(24),
        };
        assert_eq!(config.lifetime(), Some(chrono::Duration::hours(24)));

        let config = TokenKeyConfig { expiration_hours: None, ..config };
        assert_eq!(config.lifetime(), None);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" a, b ,,c "), vec!["a", "b", "c"]);
        assert!(split_list("").is_empty());
    }
}
