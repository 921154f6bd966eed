//! Instagram OAuth2 토큰 어댑터 모듈
//!
//! 클라이언트가 제출한 액세스 토큰으로 프로필 엔드포인트를 조회하고
//! 응답을 정규화합니다.
//!
//! # Features
//!
//! - body → query → headers 순서의 토큰 추출
//! - HMAC-SHA256 무결성 증명 (`sig` 쿼리 매개변수)
//! - 프로바이더 에러 봉투(`meta.error_message`/`meta.code`) 해석
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::config::InstagramConfig;
//! use crate::services::instagram::InstagramTokenStrategy;
//!
//! let config = InstagramConfig::new("client-id", Some("client-secret".to_string()));
//! let strategy = InstagramTokenStrategy::new(config)?;
//! ```

pub mod proof;
pub mod token_strategy;

pub use token_strategy::*;
