//! API 호출 무결성 증명
//!
//! 공유 시크릿 보유를 증명하기 위해 프로바이더 규약에 따라 API 호출에
//! 덧붙이는 HMAC 서명입니다. 서명 대상 정규 문자열은 고정 리소스 경로와
//! 액세스 토큰을 `|`로 결합한 형태이며, 결과는 16진수로 인코딩되어
//! URL에 안전하게 포함됩니다.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::core::errors::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// 정규 문자열에 들어가는 고정 리소스 경로
pub const PROOF_RESOURCE_PATH: &str = "/users/self";

/// 액세스 토큰에 대한 무결성 증명 서명을 계산합니다.
///
/// 동일한 시크릿과 토큰 입력은 항상 동일한 서명을 재현합니다.
///
/// # Returns
///
/// `HMAC-SHA256(client_secret, "/users/self|access_token=<token>")`의
/// 16진수 인코딩 문자열
pub fn signature(client_secret: &str, access_token: &str) -> AuthResult<String> {
    let canonical = format!(
        "{}|access_token={}",
        PROOF_RESOURCE_PATH, access_token
    );

    let mut mac = HmacSha256::new_from_slice(client_secret.as_bytes())
        .map_err(|e| AuthError::Configuration(format!("Invalid proof key: {}", e)))?;
    mac.update(canonical.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_matches_known_vector() {
        let sig = signature("s3cr3t-proof-key", "fixed-access-token").unwrap();

        assert_eq!(
            sig,
            "b3f931aea1518284a5dfdec2016c9dc1fe85d03dd3ca59a1decfb166ca3f2e87"
        );
    }

    #[test]
    fn test_signature_is_deterministic() {
        let first = signature("client-secret", "valid-token").unwrap();
        let second = signature("client-secret", "valid-token").unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_signature_depends_on_secret_and_token() {
        let base = signature("client-secret", "valid-token").unwrap();

        assert_ne!(base, signature("other-secret", "valid-token").unwrap());
        assert_ne!(base, signature("client-secret", "other-token").unwrap());
    }
}
