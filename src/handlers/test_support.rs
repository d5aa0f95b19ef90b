//! 핸들러 테스트용 서비스 구성
//!
//! GitHub 엔드포인트는 wiremock 서버를, 저장소는 메모리 구현체를 사용합니다.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::caching::state_store::{InMemoryStateStore, OAuthStateStore};
use crate::config::{GitHubOAuthConfig, LoginConfig};
use crate::core::AppServices;
use crate::repositories::identities::InMemoryIdentityRepository;
use crate::repositories::users::InMemoryUserRepository;
use crate::services::login::GitHubClient;
use crate::services::token::key_loader::test_keys::{PRIVATE_KEY, PUBLIC_KEY};
use crate::services::token::{parse_private_key, parse_public_key, TokenManager};

pub const VALID_CODE: &str = "valid-code";

pub async fn github_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .and(body_string_contains(format!("code={}", VALID_CODE)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "gho_valid",
            "token_type": "bearer",
            "scope": "user:email"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "bad_verification_code"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1024,
            "login": "hubot",
            "name": "Hubot",
            "avatar_url": "https://avatars.example.com/1024"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "email": "hubot@github.com", "primary": true, "verified": true }
        ])))
        .mount(&server)
        .await;

    server
}

pub fn token_manager() -> Arc<TokenManager> {
    Arc::new(
        TokenManager::new(
            parse_public_key(PUBLIC_KEY.as_bytes()).unwrap(),
            parse_private_key(PRIVATE_KEY.as_bytes()).unwrap(),
        )
        .unwrap(),
    )
}

pub fn services(server: &MockServer) -> AppServices {
    services_with_states(server, Arc::new(InMemoryStateStore::new(Duration::from_secs(600))))
}

pub fn services_with_states(server: &MockServer, states: Arc<dyn OAuthStateStore>) -> AppServices {
    let github = GitHubClient::new(GitHubOAuthConfig {
        client_id: "client-123".to_string(),
        client_secret: "secret-456".to_string(),
        redirect_uri: None,
        auth_uri: format!("{}/login/oauth/authorize", server.uri()),
        token_uri: format!("{}/login/oauth/access_token", server.uri()),
        api_uri: server.uri(),
        scopes: "user:email".to_string(),
        timeout: Duration::from_secs(2),
    })
    .unwrap();

    AppServices::assemble(
        token_manager(),
        github,
        Arc::new(InMemoryIdentityRepository::default()),
        Arc::new(InMemoryUserRepository::default()),
        states,
        LoginConfig::new(
            Url::parse("http://localhost:3000/").unwrap(),
            vec!["https://localhost".to_string()],
            Duration::from_secs(600),
        ),
    )
}

pub fn query_param(location: &str, key: &str) -> Option<String> {
    Url::parse(location)
        .ok()?
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
