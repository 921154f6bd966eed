//! Instagram 액세스 토큰 검증 전략
//!
//! 추출된 액세스 토큰으로 프로필 엔드포인트를 GET 호출하고,
//! 응답 본문을 정규화된 프로필로 변환합니다. 토큰은 프로바이더 규약에
//! 따라 `access_token` 쿼리 매개변수로 전달되며, 무결성 증명이 켜진
//! 경우 `sig` 매개변수가 추가됩니다.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::config::InstagramConfig;
use crate::core::errors::{AuthError, AuthResult};
use crate::domain::credential::Credential;
use crate::domain::profile::{PhotoDescriptor, Profile, ProfileName};
use crate::domain::request::InboundRequest;
use crate::services::instagram::proof;
use crate::services::strategy::TokenStrategy;

/// 프로바이더 식별자 상수
pub const PROVIDER: &str = "instagram";

/// 프로바이더 에러 봉투
///
/// 실패한 프로필 호출의 본문에서 에러 메시지와 코드를 추출하기 위한
/// 역직렬화 구조체입니다.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    meta: Option<ErrorMeta>,
}

#[derive(Debug, Deserialize)]
struct ErrorMeta {
    error_message: Option<String>,
    code: Option<i64>,
}

/// Instagram OAuth2 토큰 검증 전략
pub struct InstagramTokenStrategy {
    config: InstagramConfig,
}

impl InstagramTokenStrategy {
    /// 설정을 검증하고 전략을 생성합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::Configuration` - 무결성 증명이 켜져 있는데
    ///   `client_secret`이 없는 경우
    pub fn new(config: InstagramConfig) -> AuthResult<Self> {
        if config.enable_proof && config.client_secret.is_none() {
            return Err(AuthError::Configuration(
                "client_secret is required when enable_proof is on".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// 프로필 요청 URL을 구성합니다.
    ///
    /// `enable_proof`가 꺼져 있으면 `sig` 매개변수는 절대 포함되지 않습니다.
    fn profile_request_url(&self, access_token: &str) -> AuthResult<String> {
        let mut url = format!(
            "{}?access_token={}",
            self.config.profile_url,
            urlencoding::encode(access_token)
        );

        if self.config.enable_proof {
            let secret = self.config.client_secret.as_deref().ok_or_else(|| {
                AuthError::Configuration(
                    "client_secret is required when enable_proof is on".to_string(),
                )
            })?;
            let sig = proof::signature(secret, access_token)?;
            url.push_str("&sig=");
            url.push_str(&sig);
        }

        Ok(url)
    }

    /// 실패한 호출의 에러 본문을 프로바이더 에러로 해석합니다.
    ///
    /// 본문이 JSON 에러 봉투가 아니면 일반 조회 실패 에러로 대체됩니다.
    fn provider_error(body: &str) -> AuthError {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(ErrorEnvelope {
                meta:
                    Some(ErrorMeta {
                        error_message: Some(message),
                        code,
                    }),
            }) => AuthError::ProviderTransport { message, code },
            _ => AuthError::fetch_failed(),
        }
    }
}

#[async_trait]
impl TokenStrategy for InstagramTokenStrategy {
    type Assertion = String;

    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn pass_request_to_callback(&self) -> bool {
        self.config.pass_req_to_callback
    }

    fn extract_credential(&self, request: &InboundRequest) -> AuthResult<Credential> {
        let token = request
            .value(&self.config.access_token_field)
            .ok_or_else(|| {
                AuthError::MissingCredential(self.config.access_token_field.clone())
            })?
            .to_string();
        let refresh = request
            .value(&self.config.refresh_token_field)
            .map(str::to_string);

        Ok(Credential::new(token, refresh))
    }

    async fn fetch_assertion(
        &self,
        _request: &InboundRequest,
        credential: &Credential,
    ) -> AuthResult<String> {
        let url = self.profile_request_url(credential.token())?;

        let client = reqwest::Client::new();
        let response = client.get(&url).send().await.map_err(|e| {
            log::warn!("프로필 엔드포인트 요청 실패: {}", e);
            AuthError::fetch_failed()
        })?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::provider_error(&body));
        }

        response.text().await.map_err(|e| {
            log::warn!("프로필 응답 본문 수신 실패: {}", e);
            AuthError::fetch_failed()
        })
    }

    fn normalize_profile(&self, body: String) -> AuthResult<Profile> {
        let parsed: Value = serde_json::from_str(&body)
            .map_err(|e| AuthError::ProfileParse(format!("Failed to parse profile response: {}", e)))?;

        let data = &parsed["data"];
        let id = match &data["id"] {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => {
                return Err(AuthError::ProfileParse(
                    "Profile response has no subject identifier".to_string(),
                ));
            }
        };

        let text = |value: &Value| value.as_str().unwrap_or("").to_string();
        let name = ProfileName {
            family_name: text(&data["last_name"]),
            given_name: text(&data["first_name"]),
        };
        let photos = data["profile_picture"]
            .as_str()
            .map(|url| {
                vec![PhotoDescriptor {
                    value: url.to_string(),
                }]
            })
            .unwrap_or_default();

        Ok(Profile {
            provider: PROVIDER,
            id,
            username: text(&data["username"]),
            display_name: text(&data["full_name"]),
            name: Some(name),
            // 이 엔드포인트는 검증된 이메일을 노출하지 않는다
            emails: Vec::new(),
            photos,
            raw: body,
            parsed,
        })
    }
}
