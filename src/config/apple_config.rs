//! Apple OIDC 어댑터 설정

use std::env;

/// Apple 아이덴티티 토큰의 고정 발급자 문자열
pub const APPLE_ISSUER: &str = "https://appleid.apple.com";

/// Apple 공개 서명 키 셋(JWKS) 엔드포인트 기본값
pub const APPLE_KEY_SET_URL: &str = "https://appleid.apple.com/auth/keys";

/// Apple OIDC 어댑터 설정
///
/// `client_id`는 아이덴티티 토큰의 audience 검증에 사용되므로 필수입니다.
/// `issuer`와 `key_set_url`은 프로바이더 기본값을 가지며, 토큰 추출
/// 필드명은 `id_token`이 기본입니다. 보조(리프레시) 토큰은 이 어댑터에서
/// 사용하지 않습니다.
#[derive(Debug, Clone)]
pub struct AppleConfig {
    /// 서비스 식별자. 토큰 audience와 일치해야 합니다
    pub client_id: String,
    pub issuer: String,
    pub key_set_url: String,
    /// 주 토큰을 추출할 요청 필드명
    pub identity_token_field: String,
    /// verify 콜백에 원본 요청을 함께 전달할지 여부
    pub pass_req_to_callback: bool,
}

impl AppleConfig {
    /// 프로바이더 기본값으로 설정을 생성합니다.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            issuer: APPLE_ISSUER.to_string(),
            key_set_url: APPLE_KEY_SET_URL.to_string(),
            identity_token_field: "id_token".to_string(),
            pass_req_to_callback: false,
        }
    }

    /// 환경 변수에서 설정을 읽어옵니다.
    ///
    /// # Panics
    ///
    /// `APPLE_CLIENT_ID` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn from_env() -> Self {
        let mut config =
            Self::new(env::var("APPLE_CLIENT_ID").expect("APPLE_CLIENT_ID must be set"));

        if let Ok(url) = env::var("APPLE_KEY_SET_URL") {
            config.key_set_url = url;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppleConfig::new("com.example.app");

        assert_eq!(config.issuer, "https://appleid.apple.com");
        assert_eq!(config.key_set_url, "https://appleid.apple.com/auth/keys");
        assert_eq!(config.identity_token_field, "id_token");
        assert!(!config.pass_req_to_callback);
    }
}
