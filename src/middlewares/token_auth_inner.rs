//! TokenAuth 인증 로직의 핵심 기능
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::domain::decision::AuthDecision;
use crate::domain::request::InboundRequest;
use crate::services::dispatcher::Authenticator;
use crate::services::strategy::{TokenStrategy, Verify};

/// 실제 인증 로직을 수행하는 서비스
pub struct TokenAuthService<S, St, V>
where
    St: TokenStrategy,
    V: Verify,
{
    pub service: Rc<S>,
    pub authenticator: Arc<Authenticator<St, V>>,
}

impl<S, B, St, V> Service<ServiceRequest> for TokenAuthService<S, St, V>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    St: TokenStrategy + 'static,
    V: Verify + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let authenticator = self.authenticator.clone();

        Box::pin(async move {
            let inbound = inbound_from_service_request(&req);

            match authenticator.authenticate(&inbound).await {
                // 인증 성공: 사용자를 request extension에 저장
                Ok(AuthDecision::Granted { user, .. }) => {
                    req.extensions_mut().insert(user);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                // verify 콜백이 사용자를 거부한 경우
                Ok(AuthDecision::Denied { info }) => {
                    log::warn!("인증 거부됨");
                    let response = HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "authentication_failed",
                        "info": info,
                    }));
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response).map_into_right_body();
                    Ok(res)
                }
                // 추출/조회/검증 단계의 에러
                Err(err) => {
                    log::warn!("인증 처리 실패: {}", err);
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response).map_into_right_body();
                    Ok(res)
                }
            }
        })
    }
}

/// ServiceRequest에서 InboundRequest를 구성
///
/// 미들웨어 단계에서는 본문 스트림을 소비하지 않는다. 본문 기반 토큰
/// 추출이 필요한 핸들러는 InboundRequest를 직접 구성해 Authenticator를
/// 호출한다.
fn inbound_from_service_request(req: &ServiceRequest) -> InboundRequest {
    let query = web::Query::<HashMap<String, String>>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .ok();
    let headers = req
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect::<HashMap<_, _>>();

    InboundRequest {
        body: None,
        query,
        headers: Some(headers),
    }
}
