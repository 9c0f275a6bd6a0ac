//! Clerk(Svix) 웹훅 서명 검증 서비스
//!
//! Svix는 다음 세 헤더를 붙여 웹훅을 보냅니다.
//!
//! | 헤더 | 내용 |
//! |------|------|
//! | `svix-id` | 메시지 ID |
//! | `svix-timestamp` | 유닉스 초 |
//! | `svix-signature` | `v1,<base64>` 목록 (공백 구분, 키 교체 중에는 여러 개) |
//!
//! 서명은 `HMAC-SHA256(secret, "{id}.{timestamp}.{body}")`이며,
//! 시크릿은 `whsec_` 접두사 뒤의 base64 값을 디코딩한 바이트입니다.

use std::sync::Arc;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use once_cell::sync::OnceCell;
use sha2::Sha256;
use crate::config::ClerkConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::models::clerk_webhook::{ClerkEvent, ClerkWebhookEvent};

type HmacSha256 = Hmac<Sha256>;

static WEBHOOK_SERVICE_INSTANCE: OnceCell<Arc<WebhookService>> = OnceCell::new();

/// 서명 검증에 필요한 Svix 헤더 값
#[derive(Debug, Clone, PartialEq)]
pub struct SvixHeaders {
    pub id: String,
    pub timestamp: String,
    pub signature: String,
}

pub struct WebhookService {
    secret: Option<Vec<u8>>,
    tolerance_secs: i64,
}

impl WebhookService {
    pub fn instance() -> Arc<Self> {
        WEBHOOK_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::from_env()))
            .clone()
    }

    fn from_env() -> Self {
        let secret = ClerkConfig::webhook_secret().and_then(|raw| Self::decode_secret(&raw));

        let secret = match secret {
            Ok(secret) => Some(secret),
            Err(e) => {
                log::error!("❌ Clerk 웹훅 시크릿을 불러오지 못했습니다: {}", e);
                None
            }
        };

        Self {
            secret,
            tolerance_secs: ClerkConfig::webhook_tolerance_secs(),
        }
    }

    pub fn with_secret(raw_secret: &str, tolerance_secs: i64) -> AppResult<Self> {
        Ok(Self {
            secret: Some(Self::decode_secret(raw_secret)?),
            tolerance_secs,
        })
    }

    /// `whsec_<base64>` → 키 바이트
    pub fn decode_secret(raw: &str) -> AppResult<Vec<u8>> {
        let encoded = raw.trim();
        let encoded = encoded.strip_prefix("whsec_").unwrap_or(encoded);

        STANDARD
            .decode(encoded)
            .context("웹훅 시크릿 디코딩 실패")
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// `v1,<base64>` 서명 값을 계산합니다.
    pub fn sign(secret: &[u8], id: &str, timestamp: &str, body: &[u8]) -> AppResult<String> {
        let mac = Self::mac(secret, id, timestamp, body)?;
        Ok(format!("v1,{}", STANDARD.encode(mac.finalize().into_bytes())))
    }

    fn mac(secret: &[u8], id: &str, timestamp: &str, body: &[u8]) -> AppResult<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(secret)
            .context("HMAC 키 오류")?;

        mac.update(id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(body);

        Ok(mac)
    }

    /// 서명과 타임스탬프를 검증합니다. `now`는 유닉스 초입니다.
    pub fn verify(&self, headers: &SvixHeaders, body: &[u8], now: i64) -> AppResult<()> {
        let secret = self.secret.as_deref().ok_or_else(|| {
            AppError::AuthenticationError("웹훅 시크릿이 설정되지 않았습니다".to_string())
        })?;

        let timestamp: i64 = headers.timestamp.trim().parse().map_err(|_| {
            AppError::AuthenticationError("svix-timestamp 형식이 잘못되었습니다".to_string())
        })?;

        if now.abs_diff(timestamp) > self.tolerance_secs.unsigned_abs() {
            return Err(AppError::AuthenticationError(
                "웹훅 타임스탬프가 허용 범위를 벗어났습니다".to_string(),
            ));
        }

        let expected = Self::mac(secret, &headers.id, headers.timestamp.trim(), body)?;

        let matched = headers
            .signature
            .split_whitespace()
            .filter_map(|entry| entry.split_once(','))
            .filter(|(version, _)| *version == "v1")
            .filter_map(|(_, signature)| STANDARD.decode(signature).ok())
            .any(|signature| expected.clone().verify_slice(&signature).is_ok());

        if matched {
            Ok(())
        } else {
            Err(AppError::AuthenticationError("웹훅 서명이 일치하지 않습니다".to_string()))
        }
    }

    /// 검증된 본문을 이벤트로 해석합니다.
    pub fn parse_event(body: &[u8]) -> AppResult<ClerkEvent> {
        let envelope: ClerkWebhookEvent = serde_json::from_slice(body)
            .map_err(|e| AppError::ValidationError(format!("웹훅 본문 파싱 실패: {}", e)))?;

        envelope
            .into_event()
            .map_err(|e| AppError::ValidationError(format!("웹훅 데이터 파싱 실패: {}", e)))
    }
}

fn webhook_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(WebhookService::instance())
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "webhook_service",
        constructor: webhook_service_constructor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // base64("relief-webhook-test-secret-key!!")
    const SECRET: &str = "whsec_cmVsaWVmLXdlYmhvb2stdGVzdC1zZWNyZXQta2V5ISE=";
    const BODY: &[u8] = br#"{"type":"user.deleted","data":{"id":"user_2abc","deleted":true}}"#;
    const NOW: i64 = 1_717_000_000;

    fn headers(signature: String, timestamp: i64) -> SvixHeaders {
        SvixHeaders {
            id: "msg_2xyz".to_string(),
            timestamp: timestamp.to_string(),
            signature,
        }
    }

    fn valid_signature(timestamp: i64, body: &[u8]) -> String {
        let secret = WebhookService::decode_secret(SECRET).unwrap();
        WebhookService::sign(&secret, "msg_2xyz", &timestamp.to_string(), body).unwrap()
    }

    #[test]
    fn test_valid_signature_passes() {
        let service = WebhookService::with_secret(SECRET, 300).unwrap();
        let signature = valid_signature(NOW, BODY);

        assert!(signature.starts_with("v1,"));
        assert!(service.verify(&headers(signature, NOW), BODY, NOW + 10).is_ok());
    }

    #[test]
    fn test_any_matching_signature_in_list_passes() {
        let service = WebhookService::with_secret(SECRET, 300).unwrap();
        let list = format!("v1,bm90LXRoZS1zaWduYXR1cmU= {}", valid_signature(NOW, BODY));

        assert!(service.verify(&headers(list, NOW), BODY, NOW).is_ok());
    }

    #[test]
    fn test_tampered_body_fails() {
        let service = WebhookService::with_secret(SECRET, 300).unwrap();
        let signature = valid_signature(NOW, BODY);
        let tampered = br#"{"type":"user.deleted","data":{"id":"user_other","deleted":true}}"#;

        assert!(matches!(
            service.verify(&headers(signature, NOW), tampered, NOW),
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_stale_timestamp_fails() {
        let service = WebhookService::with_secret(SECRET, 300).unwrap();
        let signature = valid_signature(NOW, BODY);

        assert!(service.verify(&headers(signature, NOW), BODY, NOW + 301).is_err());
    }

    #[test]
    fn test_parse_verified_event() {
        let event = WebhookService::parse_event(BODY).unwrap();
        assert_eq!(event, ClerkEvent::UserDeleted { id: "user_2abc".to_string() });

        assert!(matches!(WebhookService::parse_event(b"not json"), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_extreme_timestamp_is_rejected() {
        let service = WebhookService::with_secret(SECRET, 300).unwrap();

        for timestamp in [i64::MIN, i64::MAX] {
            let signature = valid_signature(timestamp, BODY);
            let result = service.verify(&headers(signature, timestamp), BODY, NOW);
            assert!(matches!(result, Err(AppError::AuthenticationError(_))));
        }
    }

    #[test]
    fn test_malformed_secret_reports_decoding_context() {
        match WebhookService::decode_secret("whsec_@@not-base64@@") {
            Err(AppError::InternalError(msg)) => assert!(msg.starts_with("웹훅 시크릿 디코딩 실패: ")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
