//! Identity 데이터 액세스 계층
//!
//! [`IdentityRepository`] trait과 두 구현체를 제공합니다.
//!
//! - [`MongoIdentityRepository`](identity_repo::MongoIdentityRepository) - MongoDB
//! - [`InMemoryIdentityRepository`](memory::InMemoryIdentityRepository) - 프로세스 메모리
//!
//! # Examples
//!
//! ```rust,ignore
//! let stored = identities.create(Identity::new_external(...)).await?;
//! let same = identities.load_by_external_id(AuthProvider::GitHub, "583231").await?;
//! assert_eq!(same.map(|i| i.id), Some(stored.id));
//! ```

pub mod identity_repo;
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::AuthProvider;
use crate::core::errors::AppResult;
use crate::domain::entities::identity::Identity;

pub use identity_repo::MongoIdentityRepository;
pub use memory::InMemoryIdentityRepository;

#[async_trait]
pub trait IdentityRepository: Send + Sync {
    async fn load(&self, id: Uuid) -> AppResult<Option<Identity>>;

    async fn load_by_external_id(
        &self,
        provider: AuthProvider,
        external_id: &str,
    ) -> AppResult<Option<Identity>>;

    /// Identity를 저장합니다.
    ///
    /// 같은 외부 계정 `(provider, external_id)`의 Identity가 이미 있으면 새로 만들지 않고
    /// 기존 Identity를 반환합니다. 확인과 삽입은 하나의 원자적 연산입니다.
    async fn create(&self, identity: Identity) -> AppResult<Identity>;
}
