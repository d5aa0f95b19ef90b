//! # Configuration Module
//!
//! 서비스 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값을 시작 시점에 한 번 읽어 타입이 있는 구조체로 만듭니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, Rate Limiting, CORS, 저장소 설정
//! - [`auth_config`] - GitHub OAuth, 로그인 플로우, JWT 서명 키 설정
//!
//! ## 설계 원칙
//!
//! - 민감한 정보(`GITHUB_CLIENT_SECRET`, 개인키 경로)는 환경 변수로만 제공
//! - 필수 값 누락은 `AppError::ConfigError`로 시작 시점에 실패
//! - 전역 상태 없이 `AppServices`가 설정 구조체를 소유하고 주입
//!
//! ## 환경 변수 설정 가이드
//!
//! `PROFILE` 값에 따라 `.env.dev`, `.env.prod`, `.env` 중 하나가 먼저 로딩됩니다.
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export ENVIRONMENT="development"      # development, test, staging, production
//!
//! # 저장소
//! export STORAGE_BACKEND="mongodb"      # mongodb | memory
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="identity_auth_dev"
//! export REDIS_URL="redis://127.0.0.1:6379"
//!
//! # GitHub OAuth
//! export GITHUB_CLIENT_ID="your-client-id"
//! export GITHUB_CLIENT_SECRET="your-client-secret"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::{AuthProvider, GitHubOAuthConfig, LoginConfig, TokenKeyConfig};

use crate::core::errors::AppResult;

/// 시작 시점에 읽은 전체 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub storage: StorageConfig,
    pub github: GitHubOAuthConfig,
    pub login: LoginConfig,
    pub token_keys: TokenKeyConfig,
}

impl AppConfig {
    /// # Errors
    ///
    /// * `AppError::ConfigError` - 필수 환경 변수 누락 또는 잘못된 값
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            environment: Environment::current(),
            storage: StorageConfig::from_env()?,
            github: GitHubOAuthConfig::from_env()?,
            login: LoginConfig::from_env()?,
            token_keys: TokenKeyConfig::from_env(),
        })
    }
}
