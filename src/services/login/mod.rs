//! GitHub OAuth 로그인
//!
//! - [`github_client`] - GitHub OAuth/REST API 호출
//! - [`login_service`] - authorize/callback 플로우 조율

pub mod github_client;
pub mod login_service;

pub use github_client::GitHubClient;
pub use login_service::{filter_primary_email, LoginService};
