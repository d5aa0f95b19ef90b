//! 메모리 기반 Identity 리포지토리
//!
//! 개발/테스트용입니다. 프로세스가 재시작되면 데이터가 사라집니다.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::AuthProvider;
use crate::core::errors::{AppResult, ErrorContext};
use crate::domain::entities::identity::Identity;
use crate::repositories::identities::IdentityRepository;

#[derive(Default)]
pub struct InMemoryIdentityRepository {
    identities: Mutex<HashMap<Uuid, Identity>>,
}

impl InMemoryIdentityRepository {
    fn lock(&self) -> AppResult<MutexGuard<'_, HashMap<Uuid, Identity>>> {
        self.identities
            .lock()
            .context("identity store lock poisoned")
    }

    pub fn len(&self) -> usize {
        self.lock().map(|identities| identities.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn load(&self, id: Uuid) -> AppResult<Option<Identity>> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn load_by_external_id(
        &self,
        provider: AuthProvider,
        external_id: &str,
    ) -> AppResult<Option<Identity>> {
        Ok(self
            .lock()?
            .values()
            .find(|identity| identity.is_external(&provider, external_id))
            .cloned())
    }

    async fn create(&self, identity: Identity) -> AppResult<Identity> {
        let mut identities = self.lock()?;

        let existing = match &identity.external {
            Some(ext) => identities
                .values()
                .find(|stored| stored.is_external(&ext.provider, &ext.external_id))
                .cloned(),
            None => identities.get(&identity.id).cloned(),
        };

        if let Some(existing) = existing {
            return Ok(existing);
        }

        identities.insert(identity.id, identity.clone());
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn github_identity(external_id: &str) -> Identity {
        Identity::new_external(
            "Mona Lisa".to_string(),
            "https://avatars.example.com/1".to_string(),
            vec![],
            AuthProvider::GitHub,
            external_id.to_string(),
        )
    }

    #[actix_web::test]
    async fn test_create_and_load() {
        let repo = InMemoryIdentityRepository::default();
        let created = repo.create(github_identity("1")).await.unwrap();

        assert_eq!(repo.load(created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(
            repo.load_by_external_id(AuthProvider::GitHub, "1").await.unwrap(),
            Some(created)
        );
        assert!(repo.load_by_external_id(AuthProvider::GitHub, "2").await.unwrap().is_none());
        assert!(repo.load(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_create_returns_existing_for_same_external_account() {
        let repo = InMemoryIdentityRepository::default();
        let first = repo.create(github_identity("42")).await.unwrap();
        let second = repo.create(github_identity("42")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(repo.len(), 1);
    }

    #[actix_web::test]
    async fn test_concurrent_create_yields_single_identity() {
        let repo = Arc::new(InMemoryIdentityRepository::default());

        let tasks = (0..16).map(|_| {
            let repo = repo.clone();
            actix_web::rt::spawn(async move { repo.create(github_identity("race")).await })
        });

        let results = futures_util::future::join_all(tasks).await;
        let ids: Vec<Uuid> = results
            .into_iter()
            .map(|joined| joined.unwrap().unwrap().id)
            .collect();

        assert!(ids.iter().all(|id| *id == ids[0]));
        assert_eq!(repo.len(), 1);
    }
}
