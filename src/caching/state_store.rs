//! # OAuth state 저장소
//!
//! authorize 요청과 콜백 요청 사이에서 `state` 값을 키로 [`PendingLogin`]을 보관합니다.
//!
//! - 레코드는 한 번만 꺼낼 수 있습니다 (`take`가 읽기와 삭제를 함께 수행).
//! - 저장 후 TTL이 지나면 `take`는 `None`을 반환합니다.
//!
//! 구현체:
//!
//! - [`InMemoryStateStore`] - 단일 프로세스용 (개발/테스트)
//! - [`RedisStateStore`] - 여러 인스턴스가 공유하는 운영용

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::caching::redis::RedisClient;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::models::oauth::PendingLogin;

#[async_trait]
pub trait OAuthStateStore: Send + Sync {
    /// `state`에 대한 레코드를 저장합니다.
    async fn save(&self, state: &str, pending: &PendingLogin) -> AppResult<()>;

    /// `state`에 대한 레코드를 꺼내고 삭제합니다.
    ///
    /// 존재하지 않거나, 만료되었거나, 이미 꺼낸 경우 `None`을 반환합니다.
    async fn take(&self, state: &str) -> AppResult<Option<PendingLogin>>;
}

pub struct InMemoryStateStore {
    ttl: Duration,
    entries: Mutex<HashMap<String, (PendingLogin, Instant)>>,
}

impl InMemoryStateStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<String, (PendingLogin, Instant)>>> {
        self.entries
            .lock()
            .context("state store lock poisoned")
    }
}

#[async_trait]
impl OAuthStateStore for InMemoryStateStore {
    async fn save(&self, state: &str, pending: &PendingLogin) -> AppResult<()> {
        let now = Instant::now();
        let mut entries = self.lock()?;

        // 만료된 레코드 정리
        entries.retain(|_, (_, expires_at)| *expires_at > now);
        entries.insert(state.to_string(), (pending.clone(), now + self.ttl));

        Ok(())
    }

    async fn take(&self, state: &str) -> AppResult<Option<PendingLogin>> {
        let removed = self.lock()?.remove(state);

        Ok(removed
            .filter(|(_, expires_at)| *expires_at > Instant::now())
            .map(|(pending, _)| pending))
    }
}

pub struct RedisStateStore {
    redis: Arc<RedisClient>,
    ttl: Duration,
}

impl RedisStateStore {
    const KEY_PREFIX: &'static str = "oauth_state";

    pub fn new(redis: Arc<RedisClient>, ttl: Duration) -> Self {
        Self { redis, ttl }
    }

    /// state 원문 대신 해시를 키로 사용합니다.
    fn key(state: &str) -> String {
        format!("{}:{:x}", Self::KEY_PREFIX, Sha256::digest(state.as_bytes()))
    }
}

#[async_trait]
impl OAuthStateStore for RedisStateStore {
    async fn save(&self, state: &str, pending: &PendingLogin) -> AppResult<()> {
        // EX 0은 Redis가 거부하므로 최소 1초
        let seconds = self.ttl.as_secs().max(1);

        self.redis
            .set_with_expiry(&Self::key(state), pending, seconds)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    async fn take(&self, state: &str) -> AppResult<Option<PendingLogin>> {
        self.redis
            .get_del::<PendingLogin>(&Self::key(state))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }
}

/// Redis 장애를 흉내 내는 저장소
#[cfg(test)]
pub(crate) struct UnavailableStateStore;

#[cfg(test)]
#[async_trait]
impl OAuthStateStore for UnavailableStateStore {
    async fn save(&self, _state: &str, _pending: &PendingLogin) -> AppResult<()> {
        Err(AppError::RedisError("connection refused".to_string()))
    }

    async fn take(&self, _state: &str) -> AppResult<Option<PendingLogin>> {
        Err(AppError::RedisError("connection refused".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;

    fn pending() -> PendingLogin {
        PendingLogin::new(&Url::parse("http://localhost:3000/spaces").unwrap())
    }

    #[actix_web::test]
    async fn test_take_is_single_use() {
        let store = InMemoryStateStore::new(Duration::from_secs(600));
        store.save("abc", &pending()).await.unwrap();

        let first = store.take("abc").await.unwrap();
        assert_eq!(first.unwrap().referrer, "http://localhost:3000/spaces");

        assert!(store.take("abc").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_unknown_state() {
        let store = InMemoryStateStore::new(Duration::from_secs(600));
        store.save("abc", &pending()).await.unwrap();

        assert!(store.take("xyz").await.unwrap().is_none());
        assert!(store.take("").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_expired_state() {
        let store = InMemoryStateStore::new(Duration::ZERO);
        store.save("abc", &pending()).await.unwrap();

        assert!(store.take("abc").await.unwrap().is_none());
    }

    #[test]
    fn test_redis_key_does_not_contain_raw_state() {
        let key = RedisStateStore::key("super-secret-state");

        assert!(key.starts_with("oauth_state:"));
        assert!(!key.contains("super-secret-state"));
        assert_eq!(key.len(), "oauth_state:".len() + 64);
        assert_eq!(key, RedisStateStore::key("super-secret-state"));
    }
}
