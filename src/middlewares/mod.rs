//! 미들웨어 모듈
//!
//! ActixWeb 애플리케이션의 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Bearer 토큰 추출 및 RS256 서명 검증
//! - 검증된 클레임(`VerifiedToken`)을 request extension에 저장
//! - 토큰이 없거나 유효하지 않으면 JSON 401
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! App::new()
//!     .app_data(token_manager.clone())          // web::Data<TokenManager>
//!     .service(
//!         web::scope("/api/user")
//!             .wrap(AuthMiddleware::required())
//!             .route("", web::get().to(current_identity))
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
