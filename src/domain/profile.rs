//! 정규화된 사용자 프로필 모델
//!
//! 프로바이더별 응답 페이로드를 하나의 공통 형태로 매핑한 결과입니다.
//! 필드 누락의 기본값 규칙:
//!
//! - `id`는 항상 프로바이더의 subject 식별자로 채워집니다.
//! - 선택적 문자열 필드는 빈 문자열, 목록 필드는 빈 목록이 기본값입니다.
//! - `name`만 예외적으로 `Option`입니다. OAuth2 어댑터는 항상 `Some`
//!   (빈 문자열 기본값 포함)을 설정하고, OIDC 어댑터는 사용자 제공 이름이
//!   없으면 필드 자체를 생략하여 "빈 이름"과 "이름 없음"을 구분합니다.

use serde::Serialize;
use serde_json::Value;

/// 구조화된 이름 (성 / 이름)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileName {
    pub family_name: String,
    pub given_name: String,
}

/// 이메일 항목
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailDescriptor {
    pub value: String,
    /// 프로바이더가 이메일 소유권을 검증했는지 여부
    pub verified: bool,
    /// 프로바이더가 발급한 중계(비공개) 이메일인지 여부
    pub private: bool,
}

/// 프로필 사진 항목
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoDescriptor {
    pub value: String,
}

/// 정규화된 사용자 프로필
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// 어댑터별 프로바이더 식별자 상수 ("instagram", "apple")
    pub provider: &'static str,
    /// 프로바이더 subject 식별자 (항상 존재)
    pub id: String,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<ProfileName>,
    pub emails: Vec<EmailDescriptor>,
    pub photos: Vec<PhotoDescriptor>,
    /// 원본 응답 페이로드 (불투명 문자열)
    #[serde(skip)]
    pub raw: String,
    /// 파싱된 응답 페이로드 (불투명 구조값)
    #[serde(skip)]
    pub parsed: Value,
}
