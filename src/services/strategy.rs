//! 전략 및 verify 콜백 인터페이스
//!
//! 프로바이더 어댑터가 구현해야 하는 seam을 정의합니다.
//! 한 번의 인증 시도는 세 단계로 나뉩니다:
//!
//! 1. `extract_credential`: 요청에서 토큰 추출 (순수 읽기, 부수효과 없음)
//! 2. `fetch_assertion`: 프로바이더에서 프로필 단언 획득 (유일한 중단 지점)
//! 3. `normalize_profile`: 프로바이더별 페이로드를 공통 프로필로 변환

use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::errors::AuthResult;
use crate::domain::credential::Credential;
use crate::domain::profile::Profile;
use crate::domain::request::InboundRequest;

/// 프로바이더별 토큰 검증 전략
///
/// 구현체는 불변 설정만 보유하므로 동시 인증 시도 간에 잠금 없이
/// 공유할 수 있습니다.
#[async_trait]
pub trait TokenStrategy: Send + Sync {
    /// 프로바이더가 반환하는 원시 프로필 단언 타입
    ///
    /// OAuth2 어댑터는 응답 본문 문자열, OIDC 어댑터는 검증된 클레임입니다.
    type Assertion: Send;

    /// 프로바이더 식별자 상수
    fn provider(&self) -> &'static str;

    /// verify 콜백에 원본 요청을 함께 전달할지 여부
    fn pass_request_to_callback(&self) -> bool;

    /// 요청에서 자격 증명을 추출합니다.
    ///
    /// 주 토큰 필드가 비어 있으면 `MissingCredential`로 실패하며,
    /// 이 실패는 어떤 네트워크 호출보다 먼저 일어납니다.
    fn extract_credential(&self, request: &InboundRequest) -> AuthResult<Credential>;

    /// 프로바이더에서 프로필 단언을 획득합니다.
    async fn fetch_assertion(
        &self,
        request: &InboundRequest,
        credential: &Credential,
    ) -> AuthResult<Self::Assertion>;

    /// 프로필 단언을 정규화된 프로필로 변환합니다.
    fn normalize_profile(&self, assertion: Self::Assertion) -> AuthResult<Profile>;
}

/// verify 콜백에 전달되는 컨텍스트
///
/// `request`는 전략 설정의 `pass_req_to_callback`이 켜진 경우에만
/// 채워집니다. 토큰 값은 추출된 그대로 변경 없이 전달됩니다.
#[derive(Debug, Clone)]
pub struct VerifyContext {
    pub request: Option<InboundRequest>,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub profile: Profile,
}

/// verify 콜백이 반환하는 판정
#[derive(Debug, Clone)]
pub enum Verified<U> {
    /// 인증 성공. 애플리케이션 사용자와 부가 정보
    User(U, Option<Value>),
    /// 인증 거부. 부가 정보만 전달
    Reject(Option<Value>),
}

/// 애플리케이션이 제공하는 verify 콜백
///
/// 정규화된 프로필을 받아 애플리케이션 자체의 사용자 조회를 수행하고
/// 인증 성공 여부를 결정합니다. 디스패처는 시도당 이 콜백을 정확히
/// 한 번만 호출합니다.
#[async_trait]
pub trait Verify: Send + Sync {
    type User: Send + 'static;

    async fn verify(&self, context: VerifyContext) -> AuthResult<Verified<Self::User>>;
}

/// 클로저를 verify 콜백으로 사용하기 위한 어댑터
///
/// # Examples
///
/// ```rust,ignore
/// let verify = VerifyFn::new(|ctx: VerifyContext| async move {
///     match find_user(&ctx.profile.id).await? {
///         Some(user) => Ok(Verified::User(user, None)),
///         None => Ok(Verified::Reject(Some(json!({ "message": "unknown user" })))),
///     }
/// });
/// ```
pub struct VerifyFn<F, U> {
    callback: F,
    _user: PhantomData<fn() -> U>,
}

impl<F, U> VerifyFn<F, U> {
    pub fn new(callback: F) -> Self {
        Self {
            callback,
            _user: PhantomData,
        }
    }
}

#[async_trait]
impl<F, Fut, U> Verify for VerifyFn<F, U>
where
    F: Fn(VerifyContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AuthResult<Verified<U>>> + Send + 'static,
    U: Send + 'static,
{
    type User = U;

    async fn verify(&self, context: VerifyContext) -> AuthResult<Verified<U>> {
        (self.callback)(context).await
    }
}
