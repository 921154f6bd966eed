//! 프로바이더 토큰 검증 어댑터
//!
//! 클라이언트가 직접 제출한 서드파티 자격 증명(OAuth2 액세스 토큰,
//! OIDC 아이덴티티 토큰)을 검증하고, 프로바이더별 응답을 정규화된
//! 사용자 프로필로 변환하는 어댑터 계층입니다.
//! 애플리케이션의 verify 콜백이 최종 인증 성공/실패를 결정하며,
//! 상위 인증 파이프라인(ActixWeb 미들웨어)에 결과를 전달합니다.
//!
//! # Features
//!
//! - **토큰 추출**: 요청의 body/query/header에서 설정된 필드명으로 추출
//! - **Instagram 어댑터**: 액세스 토큰 기반 프로필 조회 + HMAC 무결성 증명
//! - **Apple 어댑터**: RS256 서명 검증 (JWKS 키 셋, audience/issuer 확인)
//! - **프로필 정규화**: 프로바이더별 페이로드 → 공통 Profile 레코드
//! - **verify 디스패처**: 애플리케이션 콜백 호출 및 성공/실패/에러 판정
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ InboundRequest  │ ← body / query / headers
//! └─────────────────┘
//!          │ extract_credential
//!          ▼
//! ┌─────────────────┐
//! │  TokenStrategy  │ ← 프로바이더별 어댑터 (Instagram / Apple)
//! └─────────────────┘
//!          │ fetch_assertion + normalize_profile
//!          ▼
//! ┌─────────────────┐
//! │  Authenticator  │ ← 공유 디스패처 (상태 기계)
//! └─────────────────┘
//!          │ verify 콜백
//!          ▼
//! ┌─────────────────┐
//! │  AuthDecision   │ ← Granted / Denied (에러는 AuthError)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use token_auth_adapter::config::InstagramConfig;
//! use token_auth_adapter::services::instagram::InstagramTokenStrategy;
//! use token_auth_adapter::services::dispatcher::Authenticator;
//! use token_auth_adapter::services::strategy::{Verified, VerifyFn};
//!
//! let config = InstagramConfig::new("client-id", Some("client-secret".to_string()));
//! let strategy = InstagramTokenStrategy::new(config)?;
//! let authenticator = Authenticator::new(
//!     strategy,
//!     VerifyFn::new(|ctx| async move {
//!         let user = lookup_user(&ctx.profile.id).await?;
//!         Ok(Verified::User(user, None))
//!     }),
//! );
//!
//! let decision = authenticator.authenticate(&request).await?;
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod services;
pub mod middlewares;
