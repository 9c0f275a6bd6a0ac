//! 인증 설정
//!
//! 사용자 인증은 Clerk가 담당합니다. 이 서비스는 Clerk가 발급한 세션 JWT(RS256)를
//! 공개키로 검증하고, Clerk Backend API와 Svix 서명 웹훅을 사용합니다.
//!
//! ```bash
//! # Clerk Dashboard → API Keys → "JWT public key" (PEM)
//! export CLERK_JWT_PUBLIC_KEY="-----BEGIN PUBLIC KEY-----\nMIIB...\n-----END PUBLIC KEY-----"
//! export CLERK_SECRET_KEY="sk_live_..."
//! export CLERK_WEBHOOK_SECRET="whsec_..."
//! export CLERK_AUTHORIZED_PARTIES="https://relief.app,http://localhost:3000"
//! ```

use std::env;
use crate::core::errors::AppResult;
use super::{parsed_var, required_var, CorsConfig};

/// Clerk 설정
pub struct ClerkConfig;

impl ClerkConfig {
    /// Backend API 시크릿 키
    pub fn secret_key() -> AppResult<String> {
        required_var("CLERK_SECRET_KEY")
    }

    /// 세션 토큰 검증용 PEM 공개키
    ///
    /// `.env` 파일에서 한 줄로 넣을 수 있도록 리터럴 `\n`을 실제 개행으로 바꿉니다.
    pub fn jwt_public_key() -> AppResult<String> {
        Ok(Self::normalize_pem(&required_var("CLERK_JWT_PUBLIC_KEY")?))
    }

    pub fn normalize_pem(raw: &str) -> String {
        raw.trim()
            .trim_matches('"')
            .replace("\\n", "\n")
            .replace("\r\n", "\n")
    }

    /// Svix 웹훅 서명 시크릿 (`whsec_...`)
    pub fn webhook_secret() -> AppResult<String> {
        required_var("CLERK_WEBHOOK_SECRET")
    }

    pub fn api_url() -> String {
        env::var("CLERK_API_URL")
            .unwrap_or_else(|_| "https://api.clerk.com/v1".to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// 세션 토큰 `azp` 클레임 허용 목록. 미설정 시 CORS 오리진을 사용합니다.
    pub fn authorized_parties() -> Vec<String> {
        match env::var("CLERK_AUTHORIZED_PARTIES") {
            Ok(raw) => CorsConfig::parse_origins(&raw),
            Err(_) => CorsConfig::allowed_origins(),
        }
    }

    /// 세션 토큰 `exp`/`nbf` 검증 허용 오차 (초)
    pub fn clock_skew_secs() -> u64 {
        parsed_var("CLERK_CLOCK_SKEW_SECS", 5)
    }

    /// 웹훅 타임스탬프 허용 범위 (초)
    pub fn webhook_tolerance_secs() -> i64 {
        parsed_var("CLERK_WEBHOOK_TOLERANCE_SECS", 300)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pem_expands_escaped_newlines() {
        let raw = "\"-----BEGIN PUBLIC KEY-----\\nABC\\n-----END PUBLIC KEY-----\"";
        assert_eq!(
            ClerkConfig::normalize_pem(raw),
            "-----BEGIN PUBLIC KEY-----\nABC\n-----END PUBLIC KEY-----"
        );
    }

    #[test]
    fn test_api_url_default() {
        if env::var("CLERK_API_URL").is_err() {
            assert_eq!(ClerkConfig::api_url(), "https://api.clerk.com/v1");
        }
    }
}
