//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 `web::Data`로 주입된 서비스만 사용하며, 비즈니스 로직은 `services`에 있습니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - LoginService, TokenManager         ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - Identity, User                 ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - **`login`**: GitHub OAuth 로그인 시작 및 콜백 (`GET /api/login/authorize`)
//! - **`users`**: 현재 토큰의 Identity 조회 (`GET /api/user`)
//!
//! ## 에러 처리
//!
//! 핸들러는 `Result<HttpResponse, AppError>`를 반환하고, `AppError`의
//! `ResponseError` 구현이 상태 코드와 JSON 본문을 결정합니다.
//! 로그인 콜백의 실패는 예외적으로 에러 응답이 아닌 `?error=` 리다이렉트로 전달됩니다.

pub mod login;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;
