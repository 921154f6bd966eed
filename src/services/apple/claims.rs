//! Apple 아이덴티티 토큰 클레임 모델

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 검증된 아이덴티티 토큰의 클레임
///
/// `email_verified`와 `is_private_email`은 프로바이더가 문자열
/// `"true"`/`"false"`로 인코딩하는 클레임입니다. 이 와이어 계약을
/// 보존하기 위해 불리언 강제 변환 대신 `"true"` 리터럴 문자열 비교를
/// 사용합니다. 실제 불리언 `true`가 와도 일치로 취급하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppleIdClaims {
    pub iss: String,
    pub aud: String,
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: Option<Value>,
    #[serde(default)]
    pub is_private_email: Option<Value>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl AppleIdClaims {
    /// 이메일 소유권이 검증되었는지 여부 (`"true"` 리터럴 비교)
    pub fn email_is_verified(&self) -> bool {
        claim_is_literal_true(self.email_verified.as_ref())
    }

    /// 프로바이더 발급 중계 이메일인지 여부 (`"true"` 리터럴 비교)
    pub fn email_is_private(&self) -> bool {
        claim_is_literal_true(self.is_private_email.as_ref())
    }
}

fn claim_is_literal_true(value: Option<&Value>) -> bool {
    matches!(value.and_then(Value::as_str), Some("true"))
}

/// 인증 요청에 동봉될 수 있는 사용자 제공 이름
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserSuppliedName {
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
}

/// 최초 인증 시 클라이언트가 전달하는 `user` 조각
///
/// JSON 문자열로 도착할 수 있으며, 파싱 실패는 결함이 아니라
/// 데이터 부재로 처리됩니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFragment {
    #[serde(default)]
    pub name: Option<UserSuppliedName>,
}

impl UserFragment {
    /// `user` 필드 값을 관대하게 파싱합니다.
    ///
    /// 값이 없거나 JSON으로 해석되지 않으면 `None`을 반환하며,
    /// 에러를 전파하지 않습니다.
    pub fn parse_lenient(raw: Option<&str>) -> Option<UserFragment> {
        let raw = raw?;
        match serde_json::from_str(raw) {
            Ok(fragment) => Some(fragment),
            Err(e) => {
                log::debug!("user 조각 파싱 실패, 부재로 처리: {}", e);
                None
            }
        }
    }
}

/// 검증을 마친 프로필 단언
///
/// 검증된 클레임과 (있다면) 사용자 제공 이름을 함께 전달합니다.
#[derive(Debug, Clone)]
pub struct AppleAssertion {
    pub claims: AppleIdClaims,
    pub user: Option<UserFragment>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn claims_with(email_verified: Value) -> AppleIdClaims {
        AppleIdClaims {
            iss: "https://appleid.apple.com".to_string(),
            aud: "com.example.app".to_string(),
            sub: "000123.abc".to_string(),
            exp: 0,
            iat: None,
            email: Some("user@example.com".to_string()),
            email_verified: Some(email_verified),
            is_private_email: None,
            extra: HashMap::new(),
        }
    }

    #[test]
    fn test_string_true_marks_email_verified() {
        assert!(claims_with(json!("true")).email_is_verified());
    }

    #[test]
    fn test_string_false_is_not_verified() {
        assert!(!claims_with(json!("false")).email_is_verified());
    }

    #[test]
    fn test_boolean_true_is_not_coerced() {
        // 와이어 계약: 문자열 리터럴 비교만 인정한다
        assert!(!claims_with(json!(true)).email_is_verified());
    }

    #[test]
    fn test_absent_claim_is_not_verified() {
        let mut claims = claims_with(json!("true"));
        claims.email_verified = None;
        assert!(!claims.email_is_verified());
    }

    #[test]
    fn test_user_fragment_parses_name() {
        let fragment = UserFragment::parse_lenient(Some(
            r#"{"name":{"firstName":"John","lastName":"Doe"}}"#,
        ))
        .unwrap();

        let name = fragment.name.unwrap();
        assert_eq!(name.first_name.as_deref(), Some("John"));
        assert_eq!(name.last_name.as_deref(), Some("Doe"));
    }

    #[test]
    fn test_user_fragment_swallows_malformed_json() {
        assert!(UserFragment::parse_lenient(Some("not json at all")).is_none());
        assert!(UserFragment::parse_lenient(None).is_none());
    }
}
