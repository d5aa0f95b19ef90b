//! # Domain Models Module
//!
//! 영속되지 않는 도메인 모델과 값 객체입니다.
//!
//! - [`token`] - JWT 클레임과 검증된 토큰
//! - [`oauth`] - GitHub 응답 모델, 로그인 플로우 상태

pub mod token;
pub mod oauth;

pub use token::*;
pub use oauth::*;
