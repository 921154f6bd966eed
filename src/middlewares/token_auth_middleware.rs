//! 토큰 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 프로바이더 토큰을 검증하고
//! verify 콜백이 반환한 사용자를 request extension에 저장합니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::token_auth_inner::TokenAuthService;
use crate::services::dispatcher::Authenticator;
use crate::services::strategy::{TokenStrategy, Verify};

/// 토큰 인증 미들웨어
///
/// 하나의 `Authenticator`를 감싸며, 동시 요청들이 이를 공유합니다.
pub struct TokenAuth<St, V> {
    authenticator: Arc<Authenticator<St, V>>,
}

impl<St, V> TokenAuth<St, V>
where
    St: TokenStrategy,
    V: Verify,
{
    /// 새로운 토큰 인증 미들웨어 생성
    pub fn new(authenticator: Authenticator<St, V>) -> Self {
        Self {
            authenticator: Arc::new(authenticator),
        }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B, St, V> Transform<S, ServiceRequest> for TokenAuth<St, V>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    St: TokenStrategy + 'static,
    V: Verify + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = TokenAuthService<S, St, V>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenAuthService {
            service: Rc::new(service),
            authenticator: self.authenticator.clone(),
        }))
    }
}
