//! 인바운드 요청 모델
//!
//! 호스트 파이프라인이 전달하는 요청을 명시적인 구조체로 표현합니다.
//! 동적 맵 대신 필드가 명명된 구조체를 사용하여 누락 필드를
//! 컴파일 타임에 잡을 수 있도록 합니다.

use std::collections::HashMap;

/// 토큰 추출 대상이 되는 인바운드 요청
///
/// body, query, header는 각각 문자열 → 문자열 맵이며 모두 선택적입니다.
/// 필드 조회는 body → query → headers 고정 순서로 진행되고,
/// 비어 있지 않은 첫 번째 값이 선택됩니다.
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    /// 폼/JSON 본문에서 평탄화된 필드 맵
    pub body: Option<HashMap<String, String>>,
    /// 쿼리 스트링 필드 맵
    pub query: Option<HashMap<String, String>>,
    /// 요청 헤더 맵 (OAuth2 어댑터만 조회)
    pub headers: Option<HashMap<String, String>>,
}

impl InboundRequest {
    /// body → query → headers 순서로 필드를 조회합니다.
    ///
    /// 비어 있는 값("")은 부재로 취급합니다.
    pub fn value(&self, field: &str) -> Option<&str> {
        Self::first_non_empty(
            &[
                self.body.as_ref(),
                self.query.as_ref(),
                self.headers.as_ref(),
            ],
            field,
        )
    }

    /// body → query 순서로만 필드를 조회합니다.
    ///
    /// OIDC 어댑터는 헤더에서 토큰을 추출하지 않습니다.
    pub fn form_value(&self, field: &str) -> Option<&str> {
        Self::first_non_empty(&[self.body.as_ref(), self.query.as_ref()], field)
    }

    fn first_non_empty<'a>(
        sources: &[Option<&'a HashMap<String, String>>],
        field: &str,
    ) -> Option<&'a str> {
        for map in sources.iter().flatten() {
            if let Some(value) = map.get(field) {
                if !value.is_empty() {
                    return Some(value.as_str());
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_lookup_order_body_first() {
        let request = InboundRequest {
            body: Some(map_of(&[("access_token", "from-body")])),
            query: Some(map_of(&[("access_token", "from-query")])),
            headers: Some(map_of(&[("access_token", "from-header")])),
        };

        assert_eq!(request.value("access_token"), Some("from-body"));
    }

    #[test]
    fn test_lookup_falls_through_to_query_then_headers() {
        let request = InboundRequest {
            body: None,
            query: Some(map_of(&[("access_token", "from-query")])),
            headers: Some(map_of(&[("access_token", "from-header")])),
        };
        assert_eq!(request.value("access_token"), Some("from-query"));

        let request = InboundRequest {
            body: None,
            query: None,
            headers: Some(map_of(&[("access_token", "from-header")])),
        };
        assert_eq!(request.value("access_token"), Some("from-header"));
    }

    #[test]
    fn test_empty_value_is_treated_as_absent() {
        let request = InboundRequest {
            body: Some(map_of(&[("access_token", "")])),
            query: Some(map_of(&[("access_token", "from-query")])),
            headers: None,
        };

        assert_eq!(request.value("access_token"), Some("from-query"));
    }

    #[test]
    fn test_form_value_ignores_headers() {
        let request = InboundRequest {
            body: None,
            query: None,
            headers: Some(map_of(&[("id_token", "from-header")])),
        };

        assert_eq!(request.form_value("id_token"), None);
        assert_eq!(request.value("id_token"), Some("from-header"));
    }

    #[test]
    fn test_missing_field_returns_none() {
        let request = InboundRequest::default();

        assert_eq!(request.value("access_token"), None);
    }
}
