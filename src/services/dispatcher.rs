//! # 검증 디스패처
//!
//! 두 어댑터가 공유하는 인증 흐름을 구동합니다. 전략이 프로바이더별
//! 세부사항을 담당하고, 디스패처는 단계 순서와 판정 규칙만 책임집니다.
//!
//! ## 상태 전이
//!
//! ```text
//! Start
//!   │
//!   ▼
//! ExtractingCredential ──(토큰 없음)──► Failed(MissingCredential)
//!   │
//!   ▼
//! FetchingAssertion ──(전송/검증 실패)──► Errored
//!   │
//!   ▼
//! NormalizingProfile ──(파싱 실패)──► Errored
//!   │
//!   ▼
//! Dispatching ──┬──(콜백 에러)──► Errored
//!               ├──(사용자 거부)──► Failed
//!               └──(사용자 반환)──► Succeeded
//! ```
//!
//! 모든 경로는 Failed/Errored/Succeeded 중 정확히 하나로 종결되며,
//! 어떤 상태도 재방문되지 않습니다. 재시도는 없으며, 재시도 정책은
//! 새 요청을 제출하는 호출자의 몫입니다.

use crate::core::errors::AuthResult;
use crate::domain::decision::AuthDecision;
use crate::domain::request::InboundRequest;
use crate::services::strategy::{TokenStrategy, Verified, Verify, VerifyContext};

/// 전략과 verify 콜백을 묶어 인증 시도를 수행하는 디스패처
///
/// 내부 상태는 불변 설정뿐이므로 동시 인증 시도 간에 안전하게
/// 공유할 수 있습니다. 원격 조회가 유일한 중단 지점이며, 그 동안
/// 호출 스레드는 다른 요청을 처리할 수 있습니다.
pub struct Authenticator<S, V> {
    strategy: S,
    verify: V,
}

impl<S, V> Authenticator<S, V>
where
    S: TokenStrategy,
    V: Verify,
{
    pub fn new(strategy: S, verify: V) -> Self {
        Self { strategy, verify }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// 한 번의 인증 시도를 수행합니다.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthDecision::Granted)` - 콜백이 사용자를 반환한 경우
    /// * `Ok(AuthDecision::Denied)` - 콜백이 사용자를 거부한 경우
    /// * `Err(AuthError)` - 추출/조회/정규화/콜백 중 에러가 발생한 경우
    ///
    /// 추출 실패(`MissingCredential`)는 네트워크 호출 전에 단락되고,
    /// verify 콜백은 시도당 최대 한 번만 호출되며 재호출되지 않습니다.
    pub async fn authenticate(
        &self,
        request: &InboundRequest,
    ) -> AuthResult<AuthDecision<V::User>> {
        let credential = self.strategy.extract_credential(request)?;
        log::debug!("{} 자격 증명 추출 완료", self.strategy.provider());

        let assertion = self.strategy.fetch_assertion(request, &credential).await?;
        let profile = self.strategy.normalize_profile(assertion)?;
        log::debug!(
            "{} 프로필 정규화 완료: subject={}",
            self.strategy.provider(),
            profile.id
        );

        let context = VerifyContext {
            request: self
                .strategy
                .pass_request_to_callback()
                .then(|| request.clone()),
            access_token: credential.token().to_string(),
            refresh_token: credential.refresh_token().map(str::to_string),
            profile,
        };

        match self.verify.verify(context).await? {
            Verified::User(user, info) => {
                log::info!("{} 인증 성공", self.strategy.provider());
                Ok(AuthDecision::Granted { user, info })
            }
            Verified::Reject(info) => {
                log::info!("{} 인증 거부", self.strategy.provider());
                Ok(AuthDecision::Denied { info })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::*;
    use crate::core::errors::{AuthError, AuthResult};
    use crate::domain::credential::Credential;
    use crate::domain::profile::Profile;
    use crate::services::strategy::VerifyFn;

    /// 네트워크 없이 디스패처 규칙만 검증하기 위한 스텁 전략
    struct StubStrategy {
        pass_request: bool,
        fetch_calls: Arc<AtomicUsize>,
    }

    impl StubStrategy {
        fn new(pass_request: bool) -> Self {
            Self {
                pass_request,
                fetch_calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl TokenStrategy for StubStrategy {
        type Assertion = String;

        fn provider(&self) -> &'static str {
            "stub"
        }

        fn pass_request_to_callback(&self) -> bool {
            self.pass_request
        }

        fn extract_credential(&self, request: &InboundRequest) -> AuthResult<Credential> {
            let token = request
                .value("access_token")
                .ok_or_else(|| AuthError::MissingCredential("access_token".to_string()))?;
            let refresh = request.value("refresh_token").map(str::to_string);
            Ok(Credential::new(token, refresh))
        }

        async fn fetch_assertion(
            &self,
            _request: &InboundRequest,
            credential: &Credential,
        ) -> AuthResult<String> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("assertion-for-{}", credential.token()))
        }

        fn normalize_profile(&self, assertion: String) -> AuthResult<Profile> {
            Ok(Profile {
                provider: "stub",
                id: "subject-1".to_string(),
                username: String::new(),
                display_name: String::new(),
                name: None,
                emails: Vec::new(),
                photos: Vec::new(),
                raw: assertion,
                parsed: Value::Null,
            })
        }
    }

    fn request_with_token(token: &str) -> InboundRequest {
        let mut query = std::collections::HashMap::new();
        query.insert("access_token".to_string(), token.to_string());
        InboundRequest {
            body: None,
            query: Some(query),
            headers: None,
        }
    }

    #[tokio::test]
    async fn test_granted_carries_user_and_info_unchanged() {
        let authenticator = Authenticator::new(
            StubStrategy::new(false),
            VerifyFn::new(|ctx: VerifyContext| async move {
                Ok(Verified::User(
                    ctx.profile.id.clone(),
                    Some(json!({ "message": "welcome" })),
                ))
            }),
        );

        let decision = authenticator
            .authenticate(&request_with_token("abc"))
            .await
            .unwrap();

        match decision {
            AuthDecision::Granted { user, info } => {
                assert_eq!(user, "subject-1");
                assert_eq!(info, Some(json!({ "message": "welcome" })));
            }
            other => panic!("Expected Granted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_denied_carries_info_unchanged() {
        let authenticator = Authenticator::new(
            StubStrategy::new(false),
            VerifyFn::new(|_ctx: VerifyContext| async move {
                Ok(Verified::Reject::<String>(Some(json!({
                    "message": "unknown user"
                }))))
            }),
        );

        let decision = authenticator
            .authenticate(&request_with_token("abc"))
            .await
            .unwrap();

        match decision {
            AuthDecision::Denied { info } => {
                assert_eq!(info, Some(json!({ "message": "unknown user" })));
            }
            other => panic!("Expected Denied, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_tokens_reach_callback_unchanged() {
        let authenticator = Authenticator::new(
            StubStrategy::new(false),
            VerifyFn::new(|ctx: VerifyContext| async move {
                assert_eq!(ctx.access_token, "token-in-query");
                assert_eq!(ctx.refresh_token, None);
                Ok(Verified::User((), None))
            }),
        );

        let decision = authenticator
            .authenticate(&request_with_token("token-in-query"))
            .await
            .unwrap();
        assert!(decision.is_granted());
    }

    #[tokio::test]
    async fn test_missing_credential_short_circuits_before_fetch() {
        let strategy = StubStrategy::new(false);
        let fetch_calls = strategy.fetch_calls.clone();
        let callback_calls = Arc::new(AtomicUsize::new(0));
        let callback_calls_in_verify = callback_calls.clone();

        let authenticator = Authenticator::new(
            strategy,
            VerifyFn::new(move |_ctx: VerifyContext| {
                let calls = callback_calls_in_verify.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(Verified::User((), None))
                }
            }),
        );

        let error = authenticator
            .authenticate(&InboundRequest::default())
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "You should provide access_token");
        assert_eq!(fetch_calls.load(Ordering::SeqCst), 0);
        assert_eq!(callback_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_callback_error_propagates() {
        let authenticator = Authenticator::new(
            StubStrategy::new(false),
            VerifyFn::new(|_ctx: VerifyContext| async move {
                Err::<Verified<()>, _>(AuthError::Callback("lookup failed".to_string()))
            }),
        );

        let error = authenticator
            .authenticate(&request_with_token("abc"))
            .await
            .unwrap_err();

        assert!(matches!(error, AuthError::Callback(_)));
    }

    #[tokio::test]
    async fn test_request_passthrough_follows_configuration() {
        let authenticator = Authenticator::new(
            StubStrategy::new(true),
            VerifyFn::new(|ctx: VerifyContext| async move {
                assert!(ctx.request.is_some());
                Ok(Verified::User((), None))
            }),
        );
        authenticator
            .authenticate(&request_with_token("abc"))
            .await
            .unwrap();

        let authenticator = Authenticator::new(
            StubStrategy::new(false),
            VerifyFn::new(|ctx: VerifyContext| async move {
                assert!(ctx.request.is_none());
                Ok(Verified::User((), None))
            }),
        );
        authenticator
            .authenticate(&request_with_token("abc"))
            .await
            .unwrap();
    }
}
