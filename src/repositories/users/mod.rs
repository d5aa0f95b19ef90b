//! 외부 계정(User) 데이터 액세스 계층
//!
//! - [`MongoUserRepository`](user_repo::MongoUserRepository) - MongoDB
//! - [`InMemoryUserRepository`](memory::InMemoryUserRepository) - 프로세스 메모리

pub mod user_repo;
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::errors::AppResult;
use crate::domain::entities::user::User;

pub use memory::InMemoryUserRepository;
pub use user_repo::MongoUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn load(&self, id: Uuid) -> AppResult<Option<User>>;

    /// 같은 `(provider, external_id)`의 User가 없을 때만 저장하고, 저장된 User를 반환합니다.
    async fn create(&self, user: User) -> AppResult<User>;
}
