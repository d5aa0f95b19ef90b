//! # 로그인 플로우 모델
//!
//! OAuth Authorization Code 플로우 한 번(authorize 요청 + 콜백 요청)의 상태를 표현합니다.
//!
//! ```text
//! Start ─► RedirectedToProvider ─► (GitHub 콜백)
//!                                    ├─► StateRejected                       → 401
//!                                    └─► StateValidated
//!                                          ├─► CodeExchangeFailed            → 307 ?error=invalid_code
//!                                          └─► CodeExchanged
//!                                                └─► IdentityResolved
//!                                                      └─► TokenIssued
//!                                                            └─► FinalRedirect → 307 ?token=...
//! ```
//!
//! 플로우 자체는 영속되지 않습니다. 두 요청을 잇는 것은 `state` 키로 저장된
//! 일회용 [`PendingLogin`] 레코드뿐입니다.

use std::fmt;

use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// 코드 교환 실패 시 리다이렉트에 붙는 `error` 값
pub const INVALID_CODE_ERROR: &str = "invalid_code";

/// 사용자가 GitHub 동의 화면에서 거부한 경우의 `error` 값
pub const ACCESS_DENIED_ERROR: &str = "access_denied";

/// 프로필 조회 실패 시의 `error` 값
pub const PROFILE_UNAVAILABLE_ERROR: &str = "profile_unavailable";

/// Identity 저장 또는 토큰 발급 실패 시의 `error` 값
pub const LOGIN_FAILED_ERROR: &str = "login_failed";

/// 로그인 플로우 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStage {
    Start,
    RedirectedToProvider,
    StateValidated,
    StateRejected,
    CodeExchanged,
    CodeExchangeFailed,
    IdentityResolved,
    TokenIssued,
    FinalRedirect,
}

impl LoginStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginStage::Start => "START",
            LoginStage::RedirectedToProvider => "REDIRECTED_TO_PROVIDER",
            LoginStage::StateValidated => "STATE_VALIDATED",
            LoginStage::StateRejected => "STATE_REJECTED",
            LoginStage::CodeExchanged => "CODE_EXCHANGED",
            LoginStage::CodeExchangeFailed => "CODE_EXCHANGE_FAILED",
            LoginStage::IdentityResolved => "IDENTITY_RESOLVED",
            LoginStage::TokenIssued => "TOKEN_ISSUED",
            LoginStage::FinalRedirect => "FINAL_REDIRECT",
        }
    }
}

impl fmt::Display for LoginStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// authorize 요청과 콜백 요청 사이에 보관되는 레코드
///
/// `state` 값을 키로 저장되며, 콜백에서 한 번 꺼내면 삭제됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingLogin {
    /// 최종 리다이렉트 대상 (authorize 요청의 Referer 또는 기본값)
    pub referrer: String,
    pub created_at: DateTime<Utc>,
}

impl PendingLogin {
    pub fn new(referrer: &Url) -> Self {
        Self {
            referrer: referrer.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn referrer_url(&self) -> Option<Url> {
        Url::parse(&self.referrer).ok()
    }
}

/// 콜백 요청의 쿼리 파라미터
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallbackParams {
    pub state: Option<String>,
    pub code: Option<String>,
    /// GitHub가 전달한 에러 (예: `access_denied`)
    pub error: Option<String>,
}

/// 콜백 처리 결과
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackOutcome {
    /// state 검증 실패. 리다이렉트 없이 401로 응답합니다.
    Rejected,
    /// 307 리다이렉트 대상
    Redirect(Url),
}

impl CallbackOutcome {
    pub fn location(&self) -> Option<&Url> {
        match self {
            CallbackOutcome::Rejected => None,
            CallbackOutcome::Redirect(url) => Some(url),
        }
    }
}
