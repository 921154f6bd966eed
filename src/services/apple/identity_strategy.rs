//! Apple 아이덴티티 토큰 검증 전략
//!
//! 추출된 아이덴티티 토큰의 서명을 프로바이더 공개 키로 검증합니다.
//! audience는 설정된 client_id, issuer는 프로바이더 고정 문자열,
//! 알고리즘은 RS256이어야 하며, 어느 검증이 실패해도 구조화된 에러로
//! 전달됩니다. 익명 처리로 강등되는 일은 없습니다.

use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};

use crate::config::{AppleConfig, APPLE_KEY_SET_URL};
use crate::core::errors::{AuthError, AuthResult};
use crate::domain::credential::Credential;
use crate::domain::profile::{EmailDescriptor, Profile, ProfileName};
use crate::domain::request::InboundRequest;
use crate::services::apple::claims::{AppleAssertion, AppleIdClaims, UserFragment};
use crate::services::apple::key_resolver::KeySetResolver;
use crate::services::strategy::TokenStrategy;

/// 프로바이더 식별자 상수
pub const PROVIDER: &str = "apple";

/// 사용자 제공 이름 조각이 담기는 요청 필드명
const USER_FRAGMENT_FIELD: &str = "user";

/// Apple OIDC 아이덴티티 토큰 검증 전략
pub struct AppleIdentityStrategy {
    config: AppleConfig,
    key_resolver: Arc<KeySetResolver>,
}

impl AppleIdentityStrategy {
    /// 설정을 검증하고 전략을 생성합니다.
    ///
    /// 기본 키 셋 엔드포인트를 사용하는 경우 프로세스 전역 리졸버를
    /// 공유하여 키 캐시를 재사용합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::Configuration` - `client_id`가 비어 있는 경우
    pub fn new(config: AppleConfig) -> AuthResult<Self> {
        let key_resolver = if config.key_set_url == APPLE_KEY_SET_URL {
            KeySetResolver::shared()
        } else {
            Arc::new(KeySetResolver::new(&config.key_set_url)?)
        };

        Self::with_key_resolver(config, key_resolver)
    }

    /// 호출자가 준비한 키 리졸버로 전략을 생성합니다.
    pub fn with_key_resolver(
        config: AppleConfig,
        key_resolver: Arc<KeySetResolver>,
    ) -> AuthResult<Self> {
        if config.client_id.is_empty() {
            return Err(AuthError::Configuration(
                "client_id is required for audience verification".to_string(),
            ));
        }

        Ok(Self {
            config,
            key_resolver,
        })
    }
}

#[async_trait]
impl TokenStrategy for AppleIdentityStrategy {
    type Assertion = AppleAssertion;

    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn pass_request_to_callback(&self) -> bool {
        self.config.pass_req_to_callback
    }

    fn extract_credential(&self, request: &InboundRequest) -> AuthResult<Credential> {
        // 이 어댑터는 헤더에서 토큰을 추출하지 않으며 보조 토큰도 없다
        let token = request
            .form_value(&self.config.identity_token_field)
            .ok_or_else(|| {
                AuthError::MissingCredential(self.config.identity_token_field.clone())
            })?
            .to_string();

        Ok(Credential::new(token, None))
    }

    async fn fetch_assertion(
        &self,
        request: &InboundRequest,
        credential: &Credential,
    ) -> AuthResult<AppleAssertion> {
        let header = decode_header(credential.token())
            .map_err(|e| AuthError::TokenVerification(format!("Invalid token header: {}", e)))?;
        let kid = header.kid.ok_or_else(|| {
            AuthError::TokenVerification("Token header has no key identifier".to_string())
        })?;

        let decoding_key = self.key_resolver.resolve(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.config.client_id]);
        validation.set_issuer(&[&self.config.issuer]);

        let data = decode::<AppleIdClaims>(credential.token(), &decoding_key, &validation)
            .map_err(|e| {
                log::warn!("아이덴티티 토큰 검증 실패: {}", e);
                AuthError::TokenVerification(format!("Identity token rejected: {}", e))
            })?;

        let user = UserFragment::parse_lenient(request.form_value(USER_FRAGMENT_FIELD));

        Ok(AppleAssertion {
            claims: data.claims,
            user,
        })
    }

    fn normalize_profile(&self, assertion: AppleAssertion) -> AuthResult<Profile> {
        let claims = assertion.claims;

        let parsed = serde_json::to_value(&claims)
            .map_err(|e| AuthError::ProfileParse(format!("Failed to serialize claims: {}", e)))?;
        let raw = parsed.to_string();

        let emails = claims
            .email
            .as_ref()
            .map(|value| {
                vec![EmailDescriptor {
                    value: value.clone(),
                    verified: claims.email_is_verified(),
                    private: claims.email_is_private(),
                }]
            })
            .unwrap_or_default();

        // 사용자 제공 이름이 없으면 name 필드 자체를 생략한다
        let name = assertion
            .user
            .as_ref()
            .and_then(|fragment| fragment.name.as_ref())
            .filter(|name| name.first_name.is_some() || name.last_name.is_some())
            .map(|name| ProfileName {
                family_name: name.last_name.clone().unwrap_or_default(),
                given_name: name.first_name.clone().unwrap_or_default(),
            });

        Ok(Profile {
            provider: PROVIDER,
            id: claims.sub.clone(),
            username: String::new(),
            display_name: String::new(),
            name,
            emails,
            photos: Vec::new(),
            raw,
            parsed,
        })
    }
}
