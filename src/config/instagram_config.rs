//! Instagram OAuth2 어댑터 설정
//!
//! 클라이언트 식별 정보, 엔드포인트 URL, 토큰 추출 필드명, 무결성 증명
//! 토글을 관리합니다. 모든 엔드포인트 URL은 프로바이더 기본값을 가지며
//! 테스트나 프록시 환경에서 재정의할 수 있습니다.

use std::env;

/// Instagram OAuth2 어댑터 설정
///
/// ## 필드 기본값
///
/// | 필드 | 기본값 |
/// |------|--------|
/// | `authorization_url` | `https://api.instagram.com/oauth/authorize` |
/// | `token_url` | `https://api.instagram.com/oauth/access_token` |
/// | `profile_url` | `https://api.instagram.com/v1/users/self` |
/// | `access_token_field` | `access_token` |
/// | `refresh_token_field` | `refresh_token` |
/// | `enable_proof` | `true` |
/// | `pass_req_to_callback` | `false` |
///
/// `enable_proof`가 켜져 있으면 `client_secret`이 필수입니다.
/// 이 제약은 어댑터 생성 시점에 검증됩니다.
#[derive(Debug, Clone)]
pub struct InstagramConfig {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub authorization_url: String,
    pub token_url: String,
    pub profile_url: String,
    /// 주 토큰을 추출할 요청 필드명
    pub access_token_field: String,
    /// 보조 토큰을 추출할 요청 필드명
    pub refresh_token_field: String,
    /// HMAC-SHA256 무결성 증명(`sig` 쿼리 매개변수) 사용 여부
    pub enable_proof: bool,
    /// verify 콜백에 원본 요청을 함께 전달할지 여부
    pub pass_req_to_callback: bool,
}

impl InstagramConfig {
    /// 프로바이더 기본값으로 설정을 생성합니다.
    pub fn new(client_id: impl Into<String>, client_secret: Option<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
            authorization_url: "https://api.instagram.com/oauth/authorize".to_string(),
            token_url: "https://api.instagram.com/oauth/access_token".to_string(),
            profile_url: "https://api.instagram.com/v1/users/self".to_string(),
            access_token_field: "access_token".to_string(),
            refresh_token_field: "refresh_token".to_string(),
            enable_proof: true,
            pass_req_to_callback: false,
        }
    }

    /// 환경 변수에서 설정을 읽어옵니다.
    ///
    /// # Panics
    ///
    /// `INSTAGRAM_CLIENT_ID` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn from_env() -> Self {
        let mut config = Self::new(
            env::var("INSTAGRAM_CLIENT_ID").expect("INSTAGRAM_CLIENT_ID must be set"),
            env::var("INSTAGRAM_CLIENT_SECRET").ok(),
        );

        if let Ok(url) = env::var("INSTAGRAM_PROFILE_URL") {
            config.profile_url = url;
        }
        if config.client_secret.is_none() {
            log::warn!("INSTAGRAM_CLIENT_SECRET 미설정: 무결성 증명을 사용할 수 없습니다");
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InstagramConfig::new("client-id", None);

        assert_eq!(config.profile_url, "https://api.instagram.com/v1/users/self");
        assert_eq!(config.access_token_field, "access_token");
        assert_eq!(config.refresh_token_field, "refresh_token");
        assert!(config.enable_proof);
        assert!(!config.pass_req_to_callback);
    }
}
