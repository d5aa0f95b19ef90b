//! # Login HTTP Handlers
//!
//! GitHub OAuth 로그인 엔드포인트입니다. 하나의 경로가 로그인 시작과 콜백을 모두 처리합니다.
//!
//! | 요청 | 응답 |
//! |------|------|
//! | `GET /api/login/authorize` | 307 → GitHub 인증 페이지 |
//! | `GET /api/login/authorize?state=..&code=..` | 307 → referrer `?token=..` 또는 `?error=..` |
//! | 위와 같으나 state가 유효하지 않음 | 401 |

use actix_web::http::header;
use actix_web::{get, web, HttpRequest, HttpResponse};
use reqwest::Url;
use serde_json::json;

use crate::domain::dto::LoginQuery;
use crate::domain::models::oauth::CallbackOutcome;
use crate::services::login::LoginService;

/// 로그인 시작 및 GitHub 콜백 처리
///
/// `state`, `code`, `error` 중 하나라도 있으면 콜백으로 처리합니다.
/// 같은 파라미터가 두 번 이상 오는 등 해석할 수 없는 쿼리는 state 검증 실패와 같이 401입니다.
///
/// # Endpoint
/// `GET /api/login/authorize`
#[get("/authorize")]
pub async fn authorize(req: HttpRequest, login: web::Data<LoginService>) -> HttpResponse {
    let query = match web::Query::<LoginQuery>::from_query(req.query_string()) {
        Ok(query) => query.into_inner(),
        Err(e) => {
            log::warn!("[login] 콜백 쿼리 해석 실패: {}", e);
            return invalid_state();
        }
    };

    if query.is_callback() {
        if let Some(description) = &query.error_description {
            log::debug!("GitHub 콜백 에러 설명: {}", description);
        }

        return match login.callback(query.into_callback_params()).await {
            CallbackOutcome::Redirect(location) => temporary_redirect(&location),
            CallbackOutcome::Rejected => invalid_state(),
        };
    }

    let referer = req
        .headers()
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok());

    temporary_redirect(&login.authorize(referer).await)
}

fn invalid_state() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({
        "error": "invalid_state",
        "message": "로그인 요청을 확인할 수 없습니다. 다시 로그인해 주세요"
    }))
}

fn temporary_redirect(location: &Url) -> HttpResponse {
    HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, location.as_str()))
        .finish()
}
