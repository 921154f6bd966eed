//! # Configuration Module
//!
//! 어댑터별 설정을 관리하는 모듈입니다.
//! 설정은 어댑터 생성 시점에 한 번 확정되며, 이후 어댑터 인스턴스가
//! 수명 내내 독점 소유하는 불변 값입니다. 동시 인증 시도들이 잠금 없이
//! 공유해도 안전합니다.
//!
//! ## 모듈 구성
//!
//! - [`instagram_config`] - OAuth2 액세스 토큰 어댑터 설정
//! - [`apple_config`] - OIDC 아이덴티티 토큰 어댑터 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # Instagram 어댑터
//! export INSTAGRAM_CLIENT_ID="your-client-id"
//! export INSTAGRAM_CLIENT_SECRET="your-client-secret"
//!
//! # Apple 어댑터
//! export APPLE_CLIENT_ID="com.example.service-id"
//! ```

pub mod apple_config;
pub mod instagram_config;

pub use apple_config::*;
pub use instagram_config::*;
