//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 인증 로직은 포함하지 않으며, 로그인 서비스가 trait 객체로 사용합니다.
//! `STORAGE_BACKEND` 설정에 따라 MongoDB 또는 메모리 구현체가 주입됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::identities::{IdentityRepository, InMemoryIdentityRepository};
//!
//! let identities: Arc<dyn IdentityRepository> = Arc::new(InMemoryIdentityRepository::default());
//! let identity = identities.load(id).await?;
//! ```

pub mod identities;
pub mod users;

pub use identities::IdentityRepository;
pub use users::UserRepository;
