//! # Data Transfer Objects (DTO) Module
//!
//! HTTP 경계에서 사용하는 요청/응답 객체입니다.
//!
//! - [`login`] - `/api/login/authorize` 쿼리 파라미터
//! - [`identity_response`] - `/api/user` 응답

pub mod login;
pub mod identity_response;

pub use login::*;
pub use identity_response::*;
