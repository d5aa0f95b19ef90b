//! # Identity HTTP Handlers
//!
//! 로그인한 사용자의 Identity를 조회합니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/api/user` | 현재 토큰의 Identity | 200 OK / 401 / 404 |

use actix_web::{get, web, HttpMessage, HttpRequest, HttpResponse};

use crate::core::AppError;
use crate::domain::dto::IdentityResponse;
use crate::domain::models::token::VerifiedToken;
use crate::repositories::IdentityRepository;
use crate::services::token::TokenManager;

/// 현재 사용자 조회 핸들러
///
/// `AuthMiddleware`가 저장한 검증된 토큰에서 Identity ID를 꺼내 조회합니다.
///
/// # Endpoint
/// `GET /api/user`
#[get("")]
pub async fn current_identity(
    req: HttpRequest,
    tokens: web::Data<TokenManager>,
    identities: web::Data<dyn IdentityRepository>,
) -> Result<HttpResponse, AppError> {
    let id = tokens.locate(req.extensions().get::<VerifiedToken>())?;

    let identity = identities
        .load(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("identity {}", id)))?;

    Ok(HttpResponse::Ok().json(IdentityResponse::from(identity)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::header;
    use actix_web::{http::StatusCode, test, App};
    use uuid::Uuid;

    use crate::config::AuthProvider;
    use crate::domain::entities::identity::{Email, Identity};
    use crate::handlers::test_support::{github_server, services};
    use crate::routes::configure_all_routes;

    #[actix_web::test]
    async fn test_current_identity() {
        let server = github_server().await;
        let services = services(&server);

        let identity = services
            .identities
            .create(Identity::new_external(
                "Mr Test Case".to_string(),
                "http://some.com/image".to_string(),
                vec![Email {
                    address: "mr@test.com".to_string(),
                    verified: true,
                    primary: true,
                }],
                AuthProvider::GitHub,
                "1234".to_string(),
            ))
            .await
            .unwrap();
        let token = services.tokens.generate(&identity).unwrap();

        let app = test::init_service(
            App::new().configure(|cfg| services.register(cfg)).configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/user")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["id"], identity.id.to_string());
        assert_eq!(body["full_name"], "Mr Test Case");
        assert_eq!(body["provider"], "github");
        assert_eq!(body["emails"][0]["address"], "mr@test.com");
    }

    #[actix_web::test]
    async fn test_current_identity_requires_token() {
        let server = github_server().await;
        let services = services(&server);
        let app = test::init_service(
            App::new().configure(|cfg| services.register(cfg)).configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/user").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_unknown_identity_is_not_found() {
        let server = github_server().await;
        let services = services(&server);
        let token = services
            .tokens
            .generate(&Identity {
                id: Uuid::new_v4(),
                full_name: "Ghost".to_string(),
                image_url: String::new(),
                emails: vec![],
                external: None,
            })
            .unwrap();

        let app = test::init_service(
            App::new().configure(|cfg| services.register(cfg)).configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/user")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
