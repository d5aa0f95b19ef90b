//! JWT 토큰 모델

pub mod claims;

pub use claims::*;
