//! Apple OIDC 아이덴티티 토큰 어댑터 모듈
//!
//! 클라이언트가 제출한 서명 아이덴티티 토큰을 프로바이더가 공개한
//! 키 셋으로 검증하고, 검증된 클레임을 정규화합니다.
//!
//! # Features
//!
//! - RS256 서명 검증 (audience = client_id, issuer 고정)
//! - kid 기반 키 조회 + 캐싱/조회 상한 ([`key_resolver`])
//! - 문자열 불리언 클레임(`"true"`)의 리터럴 비교 ([`claims`])
//! - 사용자 제공 이름 조각의 관대한 파싱

pub mod claims;
pub mod identity_strategy;
pub mod key_resolver;

pub use identity_strategy::*;
pub use key_resolver::KeySetResolver;
