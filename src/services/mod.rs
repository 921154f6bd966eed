//! 어댑터 서비스 계층 모듈
//!
//! 프로바이더별 전략과 이를 구동하는 공유 디스패처를 제공합니다.
//! 상속 대신 조합을 사용합니다: 각 프로바이더는 [`strategy::TokenStrategy`]
//! 를 구현하는 작은 어댑터이고, [`dispatcher::Authenticator`]가 공통
//! 흐름(추출 → 조회 → 정규화 → verify 콜백)을 수행합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::apple::AppleIdentityStrategy;
//! use crate::services::dispatcher::Authenticator;
//! use crate::services::instagram::InstagramTokenStrategy;
//! ```

pub mod apple;
pub mod dispatcher;
pub mod instagram;
pub mod strategy;

pub use dispatcher::*;
pub use strategy::*;
