//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! # Features
//!
//! - GitHub OAuth 2.0 로그인 플로우 ([`login`])
//! - RSA 서명 JWT 발급/검증 ([`token`])
//!
//! 서비스는 전역 인스턴스 없이 `AppServices`에서 생성되어 `web::Data`로 주입됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! let location = services.login.authorize(referer).await;
//! let identity = services.tokens.extract(&token)?;
//! ```

pub mod login;
pub mod token;
