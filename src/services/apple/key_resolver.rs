//! # 서명 키 셋 리졸버
//!
//! 프로바이더가 공개한 JWKS 엔드포인트에서 키 식별자(kid)로 서명 키를
//! 조회하는 협력자입니다. 토큰 검증 전략은 이 리졸버를 불투명하고
//! 스레드 안전한 협력자로 취급합니다.
//!
//! ## 동작 상수
//!
//! | 상수 | 값 | 의미 |
//! |------|-----|------|
//! | [`MAX_CACHED_KEYS`] | 100 | 캐시 엔트리 상한 |
//! | [`KEY_MAX_AGE`] | 24시간 | 캐시 엔트리 최대 수명 |
//! | [`REQUESTS_PER_MINUTE`] | 10 | 분당 JWKS 조회 상한 |
//!
//! 상한을 초과한 조회 시도는 엔드포인트를 두드리는 대신
//! `ProviderTransport` 에러로 반환됩니다.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::DecodingKey;
use once_cell::sync::OnceCell;

use crate::config::APPLE_KEY_SET_URL;
use crate::core::errors::{AuthError, AuthResult, ErrorContext};

/// 캐시 엔트리 상한
pub const MAX_CACHED_KEYS: usize = 100;

/// 캐시 엔트리 최대 수명
pub const KEY_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// 분당 JWKS 조회 상한
pub const REQUESTS_PER_MINUTE: u32 = 10;

struct CachedKey {
    jwk: Jwk,
    fetched_at: Instant,
}

struct FetchWindow {
    window_start: Instant,
    count: u32,
}

/// 전역 공유 리졸버 인스턴스 저장소
static SHARED_RESOLVER: OnceCell<Arc<KeySetResolver>> = OnceCell::new();

/// JWKS 키 셋 리졸버
///
/// 내부 캐시와 조회 횟수 창은 잠금으로 보호되므로 동시 인증 시도
/// 간에 하나의 인스턴스를 공유할 수 있습니다.
pub struct KeySetResolver {
    key_set_url: String,
    http: reqwest::Client,
    cache: RwLock<HashMap<String, CachedKey>>,
    window: Mutex<Option<FetchWindow>>,
}

impl KeySetResolver {
    /// HTTPS 전용 클라이언트로 리졸버를 생성합니다.
    pub fn new(key_set_url: impl Into<String>) -> AuthResult<Self> {
        let http = reqwest::Client::builder()
            .https_only(true)
            .build()
            .context("Failed to build key set HTTP client")?;

        Ok(Self::with_http_client(key_set_url, http))
    }

    /// 호출자가 준비한 HTTP 클라이언트로 리졸버를 생성합니다.
    pub fn with_http_client(key_set_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            key_set_url: key_set_url.into(),
            http,
            cache: RwLock::new(HashMap::new()),
            window: Mutex::new(None),
        }
    }

    /// 프로세스 전역 공유 인스턴스를 가져옵니다.
    ///
    /// 기본 키 셋 엔드포인트를 사용하는 모든 어댑터 인스턴스가
    /// 하나의 키 캐시를 공유하도록 합니다.
    ///
    /// # Panics
    ///
    /// HTTP 클라이언트 초기화에 실패하면 패닉이 발생합니다.
    pub fn shared() -> Arc<Self> {
        SHARED_RESOLVER
            .get_or_init(|| {
                Arc::new(
                    Self::new(APPLE_KEY_SET_URL).expect("Failed to initialize KeySetResolver"),
                )
            })
            .clone()
    }

    /// 키 식별자로 검증 키를 조회합니다.
    ///
    /// 캐시에 신선한 엔트리가 있으면 네트워크 호출 없이 반환하고,
    /// 없으면 키 셋을 새로 조회한 뒤 캐시를 갱신합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::ProviderTransport` - 키 셋 조회 실패 또는 조회 상한 초과
    /// * `AuthError::TokenVerification` - 키 셋에 해당 kid가 없는 경우
    pub async fn resolve(&self, kid: &str) -> AuthResult<DecodingKey> {
        if let Some(jwk) = self.cached(kid) {
            log::debug!("서명 키 캐시 적중: kid={}", kid);
            return Self::decoding_key(&jwk);
        }

        self.refetch_permitted()?;
        let key_set = self.fetch_key_set().await?;
        self.store(&key_set);

        let jwk = self.cached(kid).ok_or_else(|| {
            AuthError::TokenVerification(format!("No signing key found for kid {}", kid))
        })?;
        Self::decoding_key(&jwk)
    }

    fn decoding_key(jwk: &Jwk) -> AuthResult<DecodingKey> {
        DecodingKey::from_jwk(jwk)
            .map_err(|e| AuthError::TokenVerification(format!("Invalid signing key: {}", e)))
    }

    fn cached(&self, kid: &str) -> Option<Jwk> {
        let cache = self.cache.read().expect("key cache lock poisoned");
        cache
            .get(kid)
            .filter(|entry| entry.fetched_at.elapsed() < KEY_MAX_AGE)
            .map(|entry| entry.jwk.clone())
    }

    /// 분당 조회 상한을 검사합니다.
    fn refetch_permitted(&self) -> AuthResult<()> {
        let mut window = self.window.lock().expect("fetch window lock poisoned");
        let now = Instant::now();

        match window.as_mut() {
            Some(active) if now.duration_since(active.window_start) < Duration::from_secs(60) => {
                if active.count >= REQUESTS_PER_MINUTE {
                    log::warn!("JWKS 조회 상한 초과: {}", self.key_set_url);
                    return Err(AuthError::ProviderTransport {
                        message: "Key set request rate limit exceeded".to_string(),
                        code: None,
                    });
                }
                active.count += 1;
            }
            _ => {
                *window = Some(FetchWindow {
                    window_start: now,
                    count: 1,
                });
            }
        }

        Ok(())
    }

    async fn fetch_key_set(&self) -> AuthResult<JwkSet> {
        log::info!("JWKS 조회: {}", self.key_set_url);

        let response = self
            .http
            .get(&self.key_set_url)
            .send()
            .await
            .map_err(|e| AuthError::ProviderTransport {
                message: format!("Failed to fetch key set: {}", e),
                code: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AuthError::ProviderTransport {
                message: format!("Key set endpoint returned {}", status),
                code: Some(status.as_u16() as i64),
            });
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::ProviderTransport {
                message: format!("Failed to parse key set: {}", e),
                code: None,
            })
    }

    fn store(&self, key_set: &JwkSet) {
        let mut cache = self.cache.write().expect("key cache lock poisoned");
        let now = Instant::now();

        for jwk in &key_set.keys {
            if let Some(kid) = jwk.common.key_id.clone() {
                cache.insert(
                    kid,
                    CachedKey {
                        jwk: jwk.clone(),
                        fetched_at: now,
                    },
                );
            }
        }

        // 캐시 상한 유지: 가장 오래된 엔트리부터 제거
        while cache.len() > MAX_CACHED_KEYS {
            let oldest = cache
                .iter()
                .min_by_key(|(_, entry)| entry.fetched_at)
                .map(|(kid, _)| kid.clone());
            match oldest {
                Some(kid) => {
                    cache.remove(&kid);
                }
                None => break,
            }
        }
    }
}
