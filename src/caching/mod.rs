//! 캐싱 계층 모듈
//!
//! Redis 클라이언트와, 이를 이용한 OAuth state 저장소를 제공합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::{redis::RedisClient, state_store::{OAuthStateStore, RedisStateStore}};
//!
//! let redis = Arc::new(RedisClient::new("redis://localhost:6379").await?);
//! let store = RedisStateStore::new(redis, Duration::from_secs(600));
//!
//! store.save(&state, &pending).await?;
//! let pending = store.take(&state).await?;   // 두 번째 호출은 None
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
pub mod state_store;
