//! 로그인 요청 DTO

use serde::Deserialize;

use crate::domain::models::oauth::CallbackParams;

/// `GET /api/login/authorize` 쿼리 파라미터
///
/// 파라미터가 하나도 없으면 로그인 시작 요청이고,
/// `state`, `code`, `error` 중 하나라도 있으면 GitHub 콜백으로 처리합니다.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub state: Option<String>,
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl LoginQuery {
    pub fn is_callback(&self) -> bool {
        self.state.is_some() || self.code.is_some() || self.error.is_some()
    }

    pub fn into_callback_params(self) -> CallbackParams {
        CallbackParams {
            state: self.state,
            code: self.code,
            error: self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_authorize_request() {
        let query: LoginQuery = serde_json::from_str("{}").unwrap();
        assert!(!query.is_callback());
    }

    #[test]
    fn test_empty_state_is_still_a_callback() {
        let query = LoginQuery {
            state: Some(String::new()),
            code: Some("whatever".to_string()),
            ..Default::default()
        };
        assert!(query.is_callback());

        let params = query.into_callback_params();
        assert_eq!(params.state.as_deref(), Some(""));
        assert_eq!(params.code.as_deref(), Some("whatever"));
    }
}
