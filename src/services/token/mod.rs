//! JWT 토큰 서비스
//!
//! RSA 키 로딩과 토큰 발급/검증/클레임 조회를 담당합니다.

pub mod errors;
pub mod key_loader;
pub mod token_manager;

pub use errors::TokenError;
pub use key_loader::{load_key_pair, parse_private_key, parse_public_key};
pub use token_manager::TokenManager;
