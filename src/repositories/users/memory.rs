//! 메모리 기반 User 리포지토리

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::errors::{AppResult, ErrorContext};
use crate::domain::entities::user::User;
use crate::repositories::users::UserRepository;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    fn lock(&self) -> AppResult<MutexGuard<'_, HashMap<Uuid, User>>> {
        self.users
            .lock()
            .context("user store lock poisoned")
    }

    pub fn len(&self) -> usize {
        self.lock().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn load(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.lock()?;

        let existing = users
            .values()
            .find(|stored| stored.provider == user.provider && stored.external_id == user.external_id)
            .cloned();

        if let Some(existing) = existing {
            return Ok(existing);
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;

    #[actix_web::test]
    async fn test_create_is_insert_if_absent() {
        let repo = InMemoryUserRepository::default();
        let identity_id = Uuid::new_v4();

        let first = repo
            .create(User::new_oauth(identity_id, AuthProvider::GitHub, "7".to_string(), "octocat".to_string(), None))
            .await
            .unwrap();
        let second = repo
            .create(User::new_oauth(identity_id, AuthProvider::GitHub, "7".to_string(), "renamed".to_string(), None))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.username, "octocat");
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.load(first.id).await.unwrap(), Some(first));
    }
}
