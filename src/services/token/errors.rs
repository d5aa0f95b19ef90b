//! 토큰 관련 에러 타입

use thiserror::Error;

/// 토큰 발급/검증 과정에서 발생하는 에러
///
/// 호출자가 HTTP 상태 코드를 결정합니다. `AppError`로 변환하면
/// 키/서명 오류는 500, 나머지는 401이 됩니다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenError {
    /// 서명 불일치, 잘못된 구조, 필수 클레임 누락 등 검증 실패
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// 요청 컨텍스트에 검증된 토큰이 없음
    #[error("token not found")]
    TokenNotFound,

    /// 검증된 토큰에 필요한 클레임이 없음
    #[error("claim '{0}' is missing")]
    ClaimMissing(&'static str),

    /// 클레임 값의 형식이 잘못됨
    #[error("claim '{claim}' is malformed: {reason}")]
    ClaimMalformed { claim: &'static str, reason: String },

    /// PEM 파싱 실패 또는 키 쌍 불일치. 시작 시점에서만 발생해야 합니다.
    #[error("invalid key material: {0}")]
    KeyMaterialInvalid(String),

    /// 서명 라이브러리 오류
    #[error("failed to sign token: {0}")]
    Signing(String),
}
