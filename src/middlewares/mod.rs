//! 미들웨어 모듈
//!
//! 호스트 인증 파이프라인(ActixWeb)에 어댑터를 연결하는 미들웨어를
//! 제공합니다. 요청의 쿼리/헤더에서 토큰을 수집해 [`crate::services::dispatcher::Authenticator`]
//! 를 실행하고, 판정을 HTTP 흐름으로 변환합니다:
//!
//! - `Granted` → 사용자를 request extension에 저장하고 다음 서비스로 진행
//! - `Denied` → 401 JSON 응답
//! - `Err(AuthError)` → 에러 타입별 HTTP 응답 ([`crate::core::errors`] 참고)
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use token_auth_adapter::middlewares::TokenAuth;
//!
//! App::new()
//!     .service(
//!         web::scope("/api/protected")
//!             .wrap(TokenAuth::new(authenticator))
//!             .route("/me", web::get().to(me_handler))
//!     )
//! ```

pub mod token_auth_middleware;
mod token_auth_inner;

// 미들웨어 재export
pub use token_auth_middleware::TokenAuth;
