//! # 통합 에러 처리
//!
//! 애플리케이션 전역에서 사용하는 에러 타입과 HTTP 응답 변환을 정의합니다.
//! `thiserror`로 `Error` trait을 구현하고, `actix_web::ResponseError`를 구현하여
//! 핸들러에서 `?` 연산자만으로 일관된 JSON 에러 응답을 만들 수 있습니다.
//!
//! ## 응답 형식
//!
//! ```json
//! { "error": "Authentication error: token not found" }
//! ```
//!
//! ## 로그인 플로우와의 관계
//!
//! OAuth 콜백 처리 중 발생한 프로바이더/네트워크 에러는 이 타입으로 클라이언트에게
//! 전달되지 않습니다. 브라우저는 리다이렉트 도중이므로 `LoginService`가
//! `?error=...` 리다이렉트로 변환합니다. 이 타입은 그 밖의 API 경로에서 사용됩니다.

use thiserror::Error;

use crate::services::token::TokenError;

/// 애플리케이션 전역 에러 타입
///
/// ## 상태 코드 매핑
///
/// - `AuthenticationError` → 401 Unauthorized
/// - `NotFound` → 404 Not Found
/// - 나머지 → 500 Internal Server Error
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 관련 에러 (500)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 리소스 찾을 수 없음 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 인증 실패 (401)
    ///
    /// 토큰 누락, 서명 불일치, 클레임 누락 등 토큰 관련 실패가 여기에 해당합니다.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 외부 서비스 에러 (500)
    ///
    /// GitHub API 호출 실패 등. 로그인 플로우에서는 리다이렉트로 변환됩니다.
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 설정 오류 (500)
    ///
    /// 필수 환경 변수 누락, 잘못된 URL 등 시작 시점에 발견되는 오류입니다.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 에러는 서버 로그에만 상세 내용을 남기고, 클라이언트에는 에러 문자열만 전달합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        }

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::KeyMaterialInvalid(_) | TokenError::Signing(_) => {
                AppError::InternalError(err.to_string())
            }
            _ => AppError::AuthenticationError(err.to_string()),
        }
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// ```rust,ignore
/// let entries = self.entries.lock().context("state store lock poisoned")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
