//! # 어댑터 에러 처리 시스템
//!
//! 토큰 검증 어댑터 전역에서 사용하는 통합 에러 타입입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 에러 분류
//!
//! | AuthError | HTTP Status | 발생 지점 |
//! |-----------|-------------|-----------|
//! | `MissingCredential` | 400 Bad Request | 토큰 추출 (네트워크 호출 이전) |
//! | `TokenVerification` | 401 Unauthorized | 서명/audience/issuer/만료 검증 |
//! | `ProviderTransport` | 502 Bad Gateway | 프로필/키 셋 엔드포인트 호출 |
//! | `ProfileParse` | 500 Internal Server Error | 프로필 응답 파싱 |
//! | `Callback` | 500 Internal Server Error | 애플리케이션 verify 콜백 |
//! | `Configuration` | 500 Internal Server Error | 어댑터 생성 시 설정 검증 |
//! | `Internal` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! 모든 에러는 호출자에게 그대로 전달됩니다. 단 하나의 예외는
//! 사용자 제공 이름 조각(JSON)의 파싱 실패로, 이는 에러가 아니라
//! 데이터 부재로 처리됩니다 ([`crate::services::apple`] 참고).
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use token_auth_adapter::core::errors::{AuthError, AuthResult};
//!
//! fn extract(field_value: Option<&str>, field: &str) -> AuthResult<String> {
//!     field_value
//!         .map(str::to_string)
//!         .ok_or_else(|| AuthError::MissingCredential(field.to_string()))
//! }
//! ```

use thiserror::Error;

/// 어댑터 전역 에러 타입
///
/// 인증 시도 한 번에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// `actix_web::ResponseError` 구현을 통해 호스트 파이프라인에서
/// HTTP 응답으로 자동 변환될 수 있습니다.
#[derive(Error, Debug)]
pub enum AuthError {
    /// 설정된 필드에서 토큰을 찾지 못한 경우 (400 Bad Request)
    ///
    /// 메시지는 기대한 필드명을 그대로 담습니다.
    /// 이 에러는 어떤 네트워크 호출보다도 먼저 발생합니다.
    #[error("You should provide {0}")]
    MissingCredential(String),

    /// 프로바이더 엔드포인트 호출 실패 (502 Bad Gateway)
    ///
    /// 프로바이더가 반환한 에러 메시지와 코드를 담습니다.
    /// 에러 본문을 해석할 수 없으면 일반 메시지로 대체됩니다.
    #[error("Provider transport error: {message}")]
    ProviderTransport {
        message: String,
        code: Option<i64>,
    },

    /// 프로필 응답 파싱 실패 (500 Internal Server Error)
    #[error("Profile parse error: {0}")]
    ProfileParse(String),

    /// 서명 토큰 검증 실패 (401 Unauthorized)
    ///
    /// 서명 불일치, audience/issuer 불일치, 알고리즘 불일치, 만료,
    /// 키 식별자 미발견을 모두 포함합니다. 익명 처리로 강등되지 않습니다.
    #[error("Token verification error: {0}")]
    TokenVerification(String),

    /// 애플리케이션 verify 콜백이 보고한 에러 (500 Internal Server Error)
    #[error("Verify callback error: {0}")]
    Callback(String),

    /// 어댑터 생성 시 설정 검증 실패 (500 Internal Server Error)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 예상치 못한 내부 오류 (500 Internal Server Error)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// 에러 본문을 해석할 수 없을 때 사용하는 일반 프로필 조회 실패 에러
    pub fn fetch_failed() -> Self {
        AuthError::ProviderTransport {
            message: "Failed to fetch user profile".to_string(),
            code: None,
        }
    }
}

impl actix_web::ResponseError for AuthError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 `AuthError` 변형을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AuthError::MissingCredential(_) => StatusCode::BAD_REQUEST,
            AuthError::TokenVerification(_) => StatusCode::UNAUTHORIZED,
            AuthError::ProviderTransport { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AuthResult<T> = Result<T, AuthError>;

/// 외부 라이브러리 에러를 AuthError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AuthResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AuthResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AuthResult<T> {
        self.map_err(|e| AuthError::Internal(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AuthResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AuthError::Internal(format!("{}: {}", f(), e)))
    }
}
