//! # GitHub 로그인 서비스
//!
//! OAuth 2.0 Authorization Code 플로우 전체를 조율합니다.
//!
//! ```text
//! authorize(referer)
//!   └─ referrer 결정 → state 생성/저장 → GitHub 인증 URL
//!
//! callback(state, code)
//!   └─ state 소비 → code 교환 → 프로필/이메일 조회
//!        → Identity 조회 또는 생성 → 토큰 발급 → referrer?token=...
//! ```
//!
//! 콜백 처리 중의 실패는 에러로 반환하지 않고 referrer로의 리다이렉트(`?error=...`)로
//! 변환합니다. 예외는 state 검증 실패뿐이며, 이 경우 [`CallbackOutcome::Rejected`]입니다.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::Url;
use rsa::rand_core::{OsRng, RngCore};

use crate::caching::state_store::OAuthStateStore;
use crate::config::{AuthProvider, LoginConfig};
use crate::core::errors::AppResult;
use crate::domain::entities::identity::{Email, Identity};
use crate::domain::entities::user::User;
use crate::domain::models::oauth::{
    ACCESS_DENIED_ERROR, CallbackOutcome, CallbackParams, GitHubUser, INVALID_CODE_ERROR,
    LOGIN_FAILED_ERROR, LoginStage, PROFILE_UNAVAILABLE_ERROR, PendingLogin,
};
use crate::repositories::{IdentityRepository, UserRepository};
use crate::services::login::GitHubClient;
use crate::services::token::TokenManager;

/// state 원문 바이트 수 (256비트)
const STATE_BYTES: usize = 32;

pub struct LoginService {
    github: GitHubClient,
    states: Arc<dyn OAuthStateStore>,
    identities: Arc<dyn IdentityRepository>,
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenManager>,
    config: LoginConfig,
}

impl LoginService {
    pub fn new(
        github: GitHubClient,
        states: Arc<dyn OAuthStateStore>,
        identities: Arc<dyn IdentityRepository>,
        users: Arc<dyn UserRepository>,
        tokens: Arc<TokenManager>,
        config: LoginConfig,
    ) -> Self {
        Self {
            github,
            states,
            identities,
            users,
            tokens,
            config,
        }
    }

    /// 로그인을 시작합니다.
    ///
    /// # Arguments
    ///
    /// * `referer` - 요청의 `Referer` 헤더 값. 허용된 origin의 http(s) URL이 아니면 기본값을 사용합니다.
    ///
    /// # Returns
    ///
    /// * `Url` - 307 Location. 보통은 GitHub 인증 페이지이고, state를 저장하지 못하면
    ///   referrer에 `error=login_failed`를 붙인 주소입니다.
    pub async fn authorize(&self, referer: Option<&str>) -> Url {
        log::debug!("[login] {}", LoginStage::Start);

        let referrer = self.resolve_referrer(referer);
        let state = generate_state();

        if let Err(e) = self.states.save(&state, &PendingLogin::new(&referrer)).await {
            log::error!("[login] state 저장 실패: {}", e);
            return with_param(referrer, "error", LOGIN_FAILED_ERROR);
        }

        match self.github.authorize_url(&state) {
            Ok(url) => {
                log::debug!("[login] {} (referrer: {})", LoginStage::RedirectedToProvider, referrer);
                url
            }
            Err(e) => {
                log::error!("[login] GitHub 인증 URL 생성 실패: {}", e);
                with_param(referrer, "error", LOGIN_FAILED_ERROR)
            }
        }
    }

    /// GitHub 콜백을 처리합니다.
    pub async fn callback(&self, params: CallbackParams) -> CallbackOutcome {
        let Some(state) = params.state.as_deref().filter(|s| !s.is_empty()) else {
            log::warn!("[login] {}: state 없음", LoginStage::StateRejected);
            return CallbackOutcome::Rejected;
        };

        let pending = match self.states.take(state).await {
            Ok(Some(pending)) => pending,
            Ok(None) => {
                log::warn!("[login] {}: 알 수 없거나 만료/재사용된 state", LoginStage::StateRejected);
                return CallbackOutcome::Rejected;
            }
            Err(e) => {
                log::error!("[login] {}: state 저장소 오류: {}", LoginStage::StateRejected, e);
                return CallbackOutcome::Rejected;
            }
        };
        log::debug!("[login] {}", LoginStage::StateValidated);

        let referrer = pending
            .referrer_url()
            .unwrap_or_else(|| self.config.default_redirect.clone());

        if let Some(error) = params.error.as_deref() {
            log::info!("[login] GitHub 인증 거부: {}", error);
            return redirect_with(referrer, "error", ACCESS_DENIED_ERROR);
        }

        let Some(code) = params.code.as_deref().filter(|c| !c.trim().is_empty()) else {
            log::warn!("[login] {}: code 없음", LoginStage::CodeExchangeFailed);
            return redirect_with(referrer, "error", INVALID_CODE_ERROR);
        };

        let access_token = match self.github.exchange_code(code).await {
            Ok(token) => token,
            Err(e) => {
                log::warn!("[login] {}: {}", LoginStage::CodeExchangeFailed, e);
                return redirect_with(referrer, "error", INVALID_CODE_ERROR);
            }
        };
        log::debug!("[login] {}", LoginStage::CodeExchanged);

        let profile = match self.github.fetch_user(&access_token).await {
            Ok(profile) => profile,
            Err(e) => {
                log::warn!("[login] 프로필 조회 실패: {}", e);
                return redirect_with(referrer, "error", PROFILE_UNAVAILABLE_ERROR);
            }
        };

        // 이메일은 선택 정보이므로 실패해도 계속 진행
        let emails: Vec<Email> = match self.github.fetch_emails(&access_token).await {
            Ok(emails) => emails.into_iter().map(Email::from).collect(),
            Err(e) => {
                log::warn!("[login] 이메일 조회 실패, 빈 목록으로 계속: {}", e);
                Vec::new()
            }
        };

        let identity = match self.resolve_identity(&profile, emails).await {
            Ok(identity) => identity,
            Err(e) => {
                log::error!("[login] Identity 저장 실패: {}", e);
                return redirect_with(referrer, "error", LOGIN_FAILED_ERROR);
            }
        };
        log::debug!("[login] {} ({})", LoginStage::IdentityResolved, identity.id);

        let token = match self.tokens.generate(&identity) {
            Ok(token) => token,
            Err(e) => {
                log::error!("[login] 토큰 발급 실패: {}", e);
                return redirect_with(referrer, "error", LOGIN_FAILED_ERROR);
            }
        };
        log::debug!("[login] {}", LoginStage::TokenIssued);

        log::info!("✅ GitHub 로그인 성공: {} ({})", profile.login, identity.id);
        log::debug!("[login] {}", LoginStage::FinalRedirect);
        redirect_with(referrer, "token", &token)
    }

    /// 외부 계정에 연결된 Identity를 찾고, 없으면 생성합니다.
    async fn resolve_identity(&self, profile: &GitHubUser, emails: Vec<Email>) -> AppResult<Identity> {
        let external_id = profile.external_id();

        let identity = match self
            .identities
            .load_by_external_id(AuthProvider::GitHub, &external_id)
            .await?
        {
            Some(existing) => existing,
            None => {
                // 이메일 목록을 받지 못했으면 프로필의 공개 이메일이라도 남김
                let emails = match (emails.is_empty(), &profile.email) {
                    (true, Some(address)) if !address.trim().is_empty() => vec![Email {
                        address: address.trim().to_string(),
                        verified: false,
                        primary: false,
                    }],
                    _ => emails,
                };
                let candidate = Identity::new_external(
                    profile.display_name(),
                    profile.avatar_url.clone().unwrap_or_default(),
                    emails,
                    AuthProvider::GitHub,
                    external_id.clone(),
                );
                // 동시에 생성된 경우 먼저 저장된 Identity가 반환됨
                let stored = self.identities.create(candidate).await?;
                log::info!("🆕 새 Identity 생성: {}", stored.id);
                stored
            }
        };

        let email = filter_primary_email(&identity.emails)
            .map(|email| email.address.clone())
            .or_else(|| profile.email.clone());

        self.users
            .create(User::new_oauth(
                identity.id,
                AuthProvider::GitHub,
                external_id,
                profile.login.clone(),
                email,
            ))
            .await?;

        Ok(identity)
    }

    fn resolve_referrer(&self, referer: Option<&str>) -> Url {
        referer
            .and_then(|raw| Url::parse(raw.trim()).ok())
            .filter(|url| self.config.is_allowed_redirect(url))
            .unwrap_or_else(|| self.config.default_redirect.clone())
    }
}

/// 대표 이메일을 선택합니다.
///
/// `primary` 항목 → `verified` 항목 → 첫 번째 항목 순서이며, 빈 목록이면 `None`입니다.
pub fn filter_primary_email(emails: &[Email]) -> Option<&Email> {
    emails
        .iter()
        .find(|email| email.primary)
        .or_else(|| emails.iter().find(|email| email.verified))
        .or_else(|| emails.first())
}

fn generate_state() -> String {
    let mut bytes = [0u8; STATE_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn redirect_with(referrer: Url, key: &str, value: &str) -> CallbackOutcome {
    CallbackOutcome::Redirect(with_param(referrer, key, value))
}

/// 기존 `token`/`error` 파라미터를 제거한 뒤 `key=value`를 붙입니다.
fn with_param(mut referrer: Url, key: &str, value: &str) -> Url {
    let retained: Vec<(String, String)> = referrer
        .query_pairs()
        .filter(|(k, _)| k != "token" && k != "error")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut query = referrer.query_pairs_mut();
        query.clear();
        query.extend_pairs(retained);
        query.append_pair(key, value);
    }

    referrer
}
