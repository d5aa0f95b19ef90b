//! # Core Module
//!
//! 애플리케이션 전역에서 사용하는 기반 기능을 제공하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`app_state`] - 서비스 컨테이너
//! - **AppServices**: 시작 시점에 모든 서비스/리포지토리를 생성
//! - **명시적 주입**: 전역 상태 없이 `web::Data`로 핸들러에 전달
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입 정의
//! - **HTTP 통합**: Actix-Web ResponseError 구현
//! - **자동 변환**: thiserror 기반, `TokenError` → `AppError`

pub mod app_state;
pub mod errors;

pub use app_state::*;
pub use errors::*;
