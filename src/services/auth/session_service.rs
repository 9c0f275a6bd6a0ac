//! Clerk 세션 토큰 검증 서비스
//!
//! 프론트엔드는 Clerk가 발급한 세션 JWT를 `Authorization: Bearer`로 보냅니다.
//! 이 서비스는 Clerk 인스턴스의 PEM 공개키로 RS256 서명을 검증하고,
//! `exp`/`nbf`(허용 오차 포함)와 `azp` 허용 목록을 확인한 뒤
//! [`AuthenticatedUser`]를 만듭니다.
//!
//! 네트워크 호출(JWKS 조회)이 없으므로 요청마다 호출해도 비용이 작습니다.

use std::sync::Arc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use once_cell::sync::OnceCell;
use crate::config::ClerkConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::models::auth::{AuthenticatedUser, ClerkSessionClaims};

static SESSION_SERVICE_INSTANCE: OnceCell<Arc<SessionService>> = OnceCell::new();

pub struct SessionService {
    /// 공개키가 없거나 잘못되면 `None`이며, 모든 검증이 실패합니다.
    decoding_key: Option<DecodingKey>,
    authorized_parties: Vec<String>,
    leeway_secs: u64,
}

impl SessionService {
    pub fn instance() -> Arc<Self> {
        SESSION_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::from_env()))
            .clone()
    }

    fn from_env() -> Self {
        let decoding_key = ClerkConfig::jwt_public_key().and_then(|pem| Self::parse_key(&pem));

        let decoding_key = match decoding_key {
            Ok(key) => Some(key),
            Err(e) => {
                log::error!("❌ Clerk 세션 공개키를 불러오지 못했습니다: {}", e);
                None
            }
        };

        Self {
            decoding_key,
            authorized_parties: ClerkConfig::authorized_parties(),
            leeway_secs: ClerkConfig::clock_skew_secs(),
        }
    }

    /// 주어진 PEM 공개키로 서비스를 만듭니다.
    pub fn with_public_key(pem: &str, authorized_parties: Vec<String>, leeway_secs: u64) -> AppResult<Self> {
        Ok(Self {
            decoding_key: Some(Self::parse_key(pem)?),
            authorized_parties,
            leeway_secs,
        })
    }

    fn parse_key(pem: &str) -> AppResult<DecodingKey> {
        DecodingKey::from_rsa_pem(pem.as_bytes())
            .context("잘못된 RSA 공개키")
    }

    pub fn is_configured(&self) -> bool {
        self.decoding_key.is_some()
    }

    /// `Authorization` 헤더 값에서 Bearer 토큰을 꺼냅니다.
    pub fn extract_bearer_token(header: &str) -> AppResult<&str> {
        let header = header.trim();
        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .map(str::trim)
            .ok_or_else(|| AppError::AuthenticationError("Bearer 토큰 형식이 아닙니다".to_string()))?;

        if token.is_empty() {
            return Err(AppError::AuthenticationError("토큰이 비어 있습니다".to_string()));
        }

        Ok(token)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = self.leeway_secs;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }

    /// 세션 토큰을 검증하고 인증 컨텍스트를 반환합니다.
    pub fn verify(&self, token: &str) -> AppResult<AuthenticatedUser> {
        let key = self.decoding_key.as_ref().ok_or_else(|| {
            AppError::AuthenticationError("세션 검증 키가 설정되지 않았습니다".to_string())
        })?;

        let claims = decode::<ClerkSessionClaims>(token, key, &self.validation())
            .map_err(|e| AppError::AuthenticationError(format!("유효하지 않은 세션 토큰: {}", e)))?
            .claims;

        if !claims.is_authorized_party(&self.authorized_parties) {
            log::warn!("허용되지 않은 azp로 발급된 토큰: {:?}", claims.azp);
            return Err(AppError::AuthenticationError("허용되지 않은 출처의 세션 토큰입니다".to_string()));
        }

        Ok(claims.into_user())
    }
}

fn session_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(SessionService::instance())
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "session_service",
        constructor: session_service_constructor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use crate::domain::models::auth::SessionMetadata;

    const PRIVATE_KEY: &str = include_str!("testdata/session_test_private.pem");
    const PUBLIC_KEY: &str = include_str!("testdata/session_test_public.pem");

    fn service() -> SessionService {
        SessionService::with_public_key(PUBLIC_KEY, vec!["https://relief.app".to_string()], 5).unwrap()
    }

    fn claims(exp_offset: i64, azp: &str, role: Option<&str>) -> ClerkSessionClaims {
        let now = Utc::now().timestamp();
        ClerkSessionClaims {
            sub: "user_2abc".to_string(),
            sid: Some("sess_9".to_string()),
            azp: Some(azp.to_string()),
            exp: now + exp_offset,
            nbf: Some(now - 10),
            iat: Some(now - 10),
            metadata: role.map(|r| SessionMetadata { role: Some(r.to_string()) }),
        }
    }

    fn sign(claims: &ClerkSessionClaims) -> String {
        let key = EncodingKey::from_rsa_pem(PRIVATE_KEY.as_bytes()).unwrap();
        encode(&Header::new(Algorithm::RS256), claims, &key).unwrap()
    }

    #[test]
    fn test_valid_token_yields_user_with_roles() {
        let token = sign(&claims(300, "https://relief.app", Some("admin")));
        let user = service().verify(&token).unwrap();

        assert_eq!(user.user_id, "user_2abc");
        assert_eq!(user.session_id.as_deref(), Some("sess_9"));
        assert!(user.is_admin());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = sign(&claims(-120, "https://relief.app", None));
        assert!(matches!(service().verify(&token), Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_unknown_authorized_party_is_rejected() {
        let token = sign(&claims(300, "https://evil.example", None));
        assert!(matches!(service().verify(&token), Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_hs256_token_is_rejected() {
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims(300, "https://relief.app", None),
            &EncodingKey::from_secret(b"guessable"),
        )
        .unwrap();

        assert!(service().verify(&token).is_err());
    }

    #[test]
    fn test_unconfigured_service_rejects_everything() {
        let unconfigured = SessionService {
            decoding_key: None,
            authorized_parties: vec![],
            leeway_secs: 0,
        };
        assert!(!unconfigured.is_configured());

        let token = sign(&claims(300, "https://relief.app", None));
        assert!(unconfigured.verify(&token).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(SessionService::extract_bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(SessionService::extract_bearer_token("Basic dXNlcg==").is_err());
        assert!(SessionService::extract_bearer_token("Bearer   ").is_err());
    }
}
