//! Bearer 토큰 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 JWT 서명을 검증하고, 검증된 클레임을
//! [`VerifiedToken`](crate::domain::models::token::VerifiedToken)으로 request extension에 저장합니다.
//!
//! 핸들러는 extension에서 꺼낸 토큰을 `TokenManager::locate`에 넘겨 Identity ID를 얻습니다.
//! 검증에 사용할 `TokenManager`는 `web::Data<TokenManager>`로 등록되어 있어야 합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 유효한 Bearer 토큰이 없으면 401로 응답합니다.
pub struct AuthMiddleware;

impl AuthMiddleware {
    pub fn required() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
