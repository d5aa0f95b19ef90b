//! # Domain Entities Module
//!
//! 저장소에 영속되는 엔티티를 정의합니다.
//!
//! - [`identity`] - 로컬 주체(`Identity`)와 이메일 목록. 토큰의 `uuid` 클레임이 가리키는 대상입니다.
//! - [`user`] - 외부 프로바이더 계정 레코드(`User`). `(provider, external_id)`로 고유합니다.
//!
//! 두 엔티티 모두 `(provider, external_id)`를 키로 조회되며, 이 키에 대한 생성은
//! 저장소에서 원자적인 insert-if-absent로 처리됩니다.

pub mod identity;
pub mod user;

pub use identity::*;
pub use user::*;
