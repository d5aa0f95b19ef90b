//! # GitHub OAuth 클라이언트
//!
//! GitHub OAuth 2.0 Authorization Code 플로우의 HTTP 호출을 담당합니다.
//!
//! ```text
//! 1. authorize_url  → https://github.com/login/oauth/authorize?client_id=..&scope=..&state=..
//! 2. exchange_code  → POST https://github.com/login/oauth/access_token
//! 3. fetch_user     → GET  https://api.github.com/user
//! 4. fetch_emails   → GET  https://api.github.com/user/emails
//! ```
//!
//! 모든 요청은 설정된 타임아웃 안에서 끝나며, 재시도하지 않습니다.
//! 실패는 `AppError::ExternalServiceError`로 반환되고, 호출자가 리다이렉트 에러로 변환합니다.

use reqwest::header::ACCEPT;
use reqwest::{Client, Url};

use crate::config::GitHubOAuthConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::oauth::{GitHubEmail, GitHubTokenResponse, GitHubUser};

const USER_AGENT: &str = concat!("identity-auth-backend/", env!("CARGO_PKG_VERSION"));
const GITHUB_API_ACCEPT: &str = "application/vnd.github+json";

pub struct GitHubClient {
    http: Client,
    config: GitHubOAuthConfig,
}

impl GitHubClient {
    /// # Errors
    ///
    /// * `AppError::ConfigError` - HTTP 클라이언트 생성 실패
    pub fn new(config: GitHubOAuthConfig) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { http, config })
    }

    /// GitHub 인증 페이지 URL을 생성합니다.
    ///
    /// | 매개변수 | 값 |
    /// |----------|----|
    /// | `client_id` | GitHub OAuth App Client ID |
    /// | `scope` | `user:email` (기본값) |
    /// | `state` | CSRF 방지용 일회용 값 |
    /// | `redirect_uri` | 설정된 경우에만 포함 |
    pub fn authorize_url(&self, state: &str) -> AppResult<Url> {
        let mut params = vec![
            ("client_id", self.config.client_id.as_str()),
            ("scope", self.config.scopes.as_str()),
            ("state", state),
            ("allow_signup", "true"),
        ];
        if let Some(redirect_uri) = &self.config.redirect_uri {
            params.push(("redirect_uri", redirect_uri.as_str()));
        }

        Url::parse_with_params(&self.config.auth_uri, &params).map_err(|e| {
            AppError::ConfigError(format!("GITHUB_AUTH_URI '{}': {}", self.config.auth_uri, e))
        })
    }

    /// Authorization Code를 액세스 토큰으로 교환합니다.
    ///
    /// GitHub는 잘못된 code에도 200 OK와 `error` 필드를 반환하므로,
    /// 상태 코드와 본문을 모두 확인합니다.
    pub async fn exchange_code(&self, code: &str) -> AppResult<String> {
        let mut params = vec![
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("code", code),
        ];
        if let Some(redirect_uri) = &self.config.redirect_uri {
            params.push(("redirect_uri", redirect_uri.as_str()));
        }

        let response = self.http
            .post(&self.config.token_uri)
            .header(ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("GitHub 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "GitHub 토큰 교환 실패: HTTP {}",
                response.status()
            )));
        }

        let token = response
            .json::<GitHubTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("GitHub 토큰 응답 파싱 실패: {}", e)))?;

        match token.usable_access_token() {
            Some(access_token) => Ok(access_token.to_string()),
            None => Err(AppError::ExternalServiceError(format!(
                "GitHub 토큰 교환 거부: {}",
                token.error.as_deref().unwrap_or("empty access_token")
            ))),
        }
    }

    /// 인증된 사용자의 프로필을 조회합니다.
    pub async fn fetch_user(&self, access_token: &str) -> AppResult<GitHubUser> {
        self.get_json(access_token, "user").await
    }

    /// 인증된 사용자의 이메일 목록을 조회합니다. `user:email` 스코프가 필요합니다.
    pub async fn fetch_emails(&self, access_token: &str) -> AppResult<Vec<GitHubEmail>> {
        self.get_json(access_token, "user/emails").await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, access_token: &str, path: &str) -> AppResult<T> {
        let url = format!("{}/{}", self.config.api_uri.trim_end_matches('/'), path);

        let response = self.http
            .get(&url)
            .header(ACCEPT, GITHUB_API_ACCEPT)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("GitHub /{} 요청 실패: {}", path, e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "GitHub /{} 조회 실패: HTTP {}",
                path,
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("GitHub /{} 응답 파싱 실패: {}", path, e)))
    }
}
