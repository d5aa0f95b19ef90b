//! OAuth 로그인 관련 모델
//!
//! - [`github_user`] - GitHub API 응답 (토큰 교환, 프로필, 이메일)
//! - [`login_flow`] - 로그인 플로우 단계, state 레코드, 콜백 결과

pub mod github_user;
pub mod login_flow;

pub use github_user::*;
pub use login_flow::*;
