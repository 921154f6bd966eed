//! # 도메인 계층 모듈
//!
//! 어댑터가 다루는 핵심 데이터 모델을 정의합니다.
//!
//! - [`request`] - 인바운드 요청 형태 (`InboundRequest`)
//! - [`credential`] - 추출된 베어러 자격 증명 (`Credential`)
//! - [`profile`] - 정규화된 사용자 프로필 (`Profile`)
//! - [`decision`] - 인증 시도의 최종 판정 (`AuthDecision`)

pub mod credential;
pub mod decision;
pub mod profile;
pub mod request;

pub use credential::*;
pub use decision::*;
pub use profile::*;
pub use request::*;
