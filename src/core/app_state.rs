//! # 애플리케이션 서비스 컨테이너
//!
//! 시작 시점에 설정을 읽어 모든 서비스와 리포지토리를 한 번 생성하고,
//! `web::Data`로 감싸 핸들러에 주입합니다.
//!
//! ```text
//! AppConfig ──► AppServices::build
//!                 ├─ TokenManager          (키 파일 로딩)
//!                 ├─ IdentityRepository    (MongoDB | Memory)
//!                 ├─ UserRepository        (MongoDB | Memory)
//!                 ├─ OAuthStateStore       (Redis   | Memory)
//!                 └─ LoginService
//! ```
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! let services = AppServices::build(&AppConfig::from_env()?).await?;
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .configure(|cfg| services.register(cfg))
//!         .configure(configure_all_routes)
//! })
//! ```

use std::sync::Arc;

use actix_web::web;

use crate::caching::redis::RedisClient;
use crate::caching::state_store::{InMemoryStateStore, OAuthStateStore, RedisStateStore};
use crate::config::{AppConfig, StorageBackend};
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::repositories::identities::{InMemoryIdentityRepository, MongoIdentityRepository};
use crate::repositories::users::{InMemoryUserRepository, MongoUserRepository};
use crate::repositories::{IdentityRepository, UserRepository};
use crate::services::login::{GitHubClient, LoginService};
use crate::services::token::{load_key_pair, TokenManager};

/// 핸들러에 주입되는 공유 서비스
#[derive(Clone)]
pub struct AppServices {
    pub tokens: web::Data<TokenManager>,
    pub login: web::Data<LoginService>,
    pub identities: web::Data<dyn IdentityRepository>,
}

struct Stores {
    identities: Arc<dyn IdentityRepository>,
    users: Arc<dyn UserRepository>,
    states: Arc<dyn OAuthStateStore>,
}

impl AppServices {
    /// 설정에 따라 저장소에 연결하고 서비스를 생성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 키 로딩 실패
    /// * `AppError::DatabaseError` / `AppError::RedisError` - 저장소 연결 실패
    pub async fn build(config: &AppConfig) -> AppResult<Self> {
        let (public_key, private_key) = load_key_pair(&config.token_keys, &config.environment)?;
        let mut tokens = TokenManager::new(public_key, private_key)?
            .with_key_id(config.token_keys.key_id.clone());
        if let Some(lifetime) = config.token_keys.lifetime() {
            tokens = tokens.with_lifetime(lifetime);
        }
        log::info!("🔐 TokenManager 초기화 완료 (kid: {})", config.token_keys.key_id);

        let stores = match config.storage.backend {
            StorageBackend::MongoDb => Self::connect_stores(config).await?,
            StorageBackend::Memory => {
                log::warn!("⚠️ 메모리 저장소 사용 중 - 재시작 시 데이터가 사라집니다");
                Stores {
                    identities: Arc::new(InMemoryIdentityRepository::default()),
                    users: Arc::new(InMemoryUserRepository::default()),
                    states: Arc::new(InMemoryStateStore::new(config.login.state_ttl)),
                }
            }
        };

        let github = GitHubClient::new(config.github.clone())?;

        Ok(Self::assemble(Arc::new(tokens), github, stores.identities, stores.users, stores.states, config.login.clone()))
    }

    /// 이미 생성된 구성 요소로 컨테이너를 조립합니다.
    pub fn assemble(
        tokens: Arc<TokenManager>,
        github: GitHubClient,
        identities: Arc<dyn IdentityRepository>,
        users: Arc<dyn UserRepository>,
        states: Arc<dyn OAuthStateStore>,
        login_config: crate::config::LoginConfig,
    ) -> Self {
        let login = LoginService::new(github, states, identities.clone(), users, tokens.clone(), login_config);

        Self {
            tokens: web::Data::from(tokens),
            login: web::Data::new(login),
            identities: web::Data::from(identities),
        }
    }

    /// `App`에 공유 데이터를 등록합니다.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.tokens.clone())
            .app_data(self.login.clone())
            .app_data(self.identities.clone());
    }

    async fn connect_stores(config: &AppConfig) -> AppResult<Stores> {
        log::info!("📡 데이터베이스 연결 중...");

        let database = Arc::new(
            Database::new(&config.storage.mongodb_uri, &config.storage.database_name)
                .await
                .map_err(|e| AppError::DatabaseError(format!("MongoDB 연결 실패: {}", e)))?,
        );

        let identities = MongoIdentityRepository::new(database.clone());
        identities.create_indexes().await?;
        let users = MongoUserRepository::new(database);
        users.create_indexes().await?;

        let redis = Arc::new(
            RedisClient::new(&config.storage.redis_url)
                .await
                .map_err(|e| AppError::RedisError(format!("Redis 연결 실패: {}", e)))?,
        );

        Ok(Stores {
            identities: Arc::new(identities),
            users: Arc::new(users),
            states: Arc::new(RedisStateStore::new(redis, config.login.state_ttl)),
        })
    }
}
