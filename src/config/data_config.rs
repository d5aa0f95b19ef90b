//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 서버 바인딩, 요청 제한, CORS, 저장소 백엔드 설정을 관리합니다.

use std::env;

use crate::config::auth_config::{optional, parse_or, split_list};
use crate::core::errors::{AppError, AppResult};

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 키 파일이 없으면 자동 생성
    Development,
    /// 테스트 환경
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        parse_or("PORT", 8080)
    }

    pub fn host() -> String {
        optional("HOST").unwrap_or_else(|| "0.0.0.0".to_string())
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
    /// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
    pub fn from_env() -> Self {
        let config = Self {
            per_second: parse_or("RATE_LIMIT_PER_SECOND", 100),
            burst_size: parse_or("RATE_LIMIT_BURST_SIZE", 200),
        };

        log::info!("Rate Limiting 설정 로드됨: {:?}", config);
        config
    }
}

/// CORS 설정
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    const DEFAULT_ORIGINS: [&'static str; 4] = [
        "http://localhost:3000",
        "http://127.0.0.1:3000",
        "http://localhost:8080",
        "http://127.0.0.1:8080",
    ];

    /// `CORS_ALLOWED_ORIGINS`(쉼표 구분)를 읽습니다. 설정되지 않으면 로컬 개발 origin을 허용합니다.
    pub fn from_env() -> Self {
        let allowed_origins = optional("CORS_ALLOWED_ORIGINS")
            .map(|raw| split_list(&raw))
            .unwrap_or_else(|| Self::DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect());

        Self { allowed_origins }
    }
}

/// Identity/User 및 OAuth state 저장소 종류
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    /// MongoDB + Redis
    MongoDb,
    /// 프로세스 메모리 (개발/테스트용, 재시작 시 데이터 소실)
    Memory,
}

impl StorageBackend {
    pub fn from_str(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StorageBackend::MongoDb),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(AppError::ConfigError(format!(
                "STORAGE_BACKEND '{}' is not supported (mongodb | memory)",
                other
            ))),
        }
    }
}

/// 저장소 연결 설정
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub mongodb_uri: String,
    pub database_name: String,
    pub redis_url: String,
}

impl StorageConfig {
    pub fn from_env() -> AppResult<Self> {
        let backend = match optional("STORAGE_BACKEND") {
            Some(raw) => StorageBackend::from_str(&raw)?,
            None => StorageBackend::MongoDb,
        };

        Ok(Self {
            backend,
            mongodb_uri: optional("MONGODB_URI")
                .unwrap_or_else(|| "mongodb://localhost:27017".to_string()),
            database_name: optional("DATABASE_NAME")
                .unwrap_or_else(|| "identity_auth_dev".to_string()),
            redis_url: optional("REDIS_URL")
                .unwrap_or_else(|| "redis://127.0.0.1:6379".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(
            Environment::from_str("development"),
            Environment::Development
        );
        assert_eq!(Environment::from_str("dev"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("stage"), Environment::Staging);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_storage_backend_from_string() {
        assert_eq!(StorageBackend::from_str("mongodb").unwrap(), StorageBackend::MongoDb);
        assert_eq!(StorageBackend::from_str("Memory").unwrap(), StorageBackend::Memory);
        assert!(matches!(
            StorageBackend::from_str("postgres"),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }
        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "0.0.0.0");
        }
    }
}
