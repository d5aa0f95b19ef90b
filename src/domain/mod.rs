//! # Domain Module
//!
//! 인증 서비스의 도메인 계층입니다.
//!
//! ```text
//! domain/
//! ├── entities/   ← 영속성 엔티티 (Identity, User)
//! ├── models/     ← 토큰 클레임, OAuth 플로우 모델
//! └── dto/        ← HTTP 요청/응답 객체
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
