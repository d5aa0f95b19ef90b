//! Identity 인증 서비스 백엔드
//!
//! GitHub OAuth 2.0 로그인으로 로컬 Identity를 만들고,
//! RSA(RS256)로 서명한 Bearer 토큰을 발급/검증하는 서비스입니다.
//!
//! # Features
//!
//! - **GitHub 로그인**: Authorization Code 플로우, 일회용 state로 CSRF 방지
//! - **토큰 관리**: `generate` / `extract` / `locate`
//! - **Identity 조회**: Bearer 토큰으로 현재 Identity 반환
//! - **명시적 DI**: 시작 시점에 `AppServices`로 조립 후 `web::Data`로 주입
//! - **MongoDB / Redis**: Identity와 state 저장 (테스트와 로컬 실행은 메모리 저장소)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /api/login/authorize, /api/user
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← LoginService, GitHubClient, TokenManager
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← Identity, User, OAuth state
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use identity_auth_backend::config::AppConfig;
//! use identity_auth_backend::core::AppServices;
//!
//! let services = AppServices::build(&AppConfig::from_env()?).await?;
//!
//! let token = services.tokens.generate(&identity)?;
//! let restored = services.tokens.extract(&token)?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod middlewares;
