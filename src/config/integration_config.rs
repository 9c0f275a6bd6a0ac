//! 외부 연동 설정 (Resend, Gemini)

use std::env;
use crate::core::errors::AppResult;
use super::{parsed_var, required_var};

/// Resend 트랜잭션 이메일 설정
pub struct ResendConfig;

impl ResendConfig {
    pub fn api_key() -> AppResult<String> {
        required_var("RESEND_API_KEY")
    }

    pub fn api_url() -> String {
        env::var("RESEND_API_URL")
            .unwrap_or_else(|_| "https://api.resend.com".to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// 발신 주소 (`ReLief <hello@relief.app>`)
    pub fn from_address() -> String {
        env::var("RESEND_FROM_ADDRESS")
            .unwrap_or_else(|_| "ReLief <onboarding@resend.dev>".to_string())
    }

    /// 이메일 본문 링크에 사용할 프론트엔드 주소
    pub fn app_url() -> String {
        env::var("APP_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// 일괄 발송 시 동시 요청 수
    pub fn broadcast_concurrency() -> usize {
        parsed_var("RESEND_BROADCAST_CONCURRENCY", 8).max(1)
    }
}

/// Google Gemini 설정
pub struct GeminiConfig;

impl GeminiConfig {
    pub fn api_key() -> AppResult<String> {
        required_var("GEMINI_API_KEY")
    }

    pub fn api_url() -> String {
        env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// 청구서 OCR과 대화에 쓰는 생성 모델
    pub fn model() -> String {
        env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string())
    }

    pub fn embedding_model() -> String {
        env::var("GEMINI_EMBEDDING_MODEL").unwrap_or_else(|_| "text-embedding-004".to_string())
    }

    pub fn timeout_secs() -> u64 {
        parsed_var("GEMINI_TIMEOUT_SECS", 60)
    }

    /// 업로드 가능한 청구서 이미지 최대 크기 (디코딩 후 바이트)
    pub fn max_image_bytes() -> usize {
        parsed_var("BILL_SCAN_MAX_IMAGE_BYTES", 5 * 1024 * 1024)
    }

    /// 스캔 요청 JSON 본문 한도. base64 인코딩(4/3)과 data URL 접두사, 나머지 필드 여유분을 포함합니다.
    pub fn scan_body_limit() -> usize {
        Self::body_limit_for(Self::max_image_bytes())
    }

    fn body_limit_for(max_image_bytes: usize) -> usize {
        max_image_bytes.div_ceil(3) * 4 + 64 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_defaults() {
        if env::var("GEMINI_MODEL").is_err() {
            assert_eq!(GeminiConfig::model(), "gemini-1.5-flash");
        }
        if env::var("GEMINI_API_URL").is_err() {
            assert_eq!(
                GeminiConfig::api_url(),
                "https://generativelanguage.googleapis.com/v1beta"
            );
        }
    }

    #[test]
    fn test_scan_body_limit_fits_largest_encoded_image() {
        let max: usize = 5 * 1024 * 1024;
        let encoded_len = max.div_ceil(3) * 4;
        let data_url = format!("data:image/jpeg;base64,{}", "A".repeat(encoded_len));
        let body = serde_json::json!({ "image_base64": data_url, "mime_type": "image/jpeg" }).to_string();

        assert!(body.len() <= GeminiConfig::body_limit_for(max));
        assert!(GeminiConfig::body_limit_for(max) > 2 * 1024 * 1024);
    }

    #[test]
    fn test_broadcast_concurrency_is_positive() {
        assert!(ResendConfig::broadcast_concurrency() >= 1);
    }
}
