//! Resend 이메일 API 클라이언트
//!
//! ```bash
//! export RESEND_API_KEY="re_..."
//! export RESEND_FROM="ReLief <hello@relief.app>"
//! ```

use std::time::Duration;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use crate::config::ResendConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use super::{header_value, vendor_error};

/// `POST /emails` 본문
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Clone)]
pub struct ResendClient {
    http: reqwest::Client,
    api_url: String,
    from_address: String,
}

impl ResendClient {
    pub fn new() -> AppResult<Self> {
        let api_key = ResendConfig::api_key()?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", api_key))?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(15))
            .build()
            .context("Resend HTTP 클라이언트 생성 실패")?;

        Ok(Self {
            http,
            api_url: ResendConfig::api_url(),
            from_address: ResendConfig::from_address(),
        })
    }

    /// 설정된 발신 주소로 메시지를 만듭니다.
    pub fn message(&self, to: &str, subject: &str, html: String, text: Option<String>) -> EmailMessage {
        EmailMessage {
            from: self.from_address.clone(),
            to: vec![to.to_string()],
            subject: subject.to_string(),
            html,
            text,
        }
    }

    /// 메일을 발송하고 Resend 메시지 ID를 반환합니다.
    pub async fn send(&self, message: &EmailMessage) -> AppResult<String> {
        let response = self.http
            .post(format!("{}/emails", self.api_url))
            .json(message)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Resend 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            return Err(vendor_error("Resend", "메일 발송", response).await);
        }

        let sent = response
            .json::<SendEmailResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Resend 응답 파싱 실패: {}", e)))?;

        log::debug!("📧 메일 발송 완료: {} → {:?}", sent.id, message.to);
        Ok(sent.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_message_omits_missing_text() {
        let message = EmailMessage {
            from: "ReLief <hello@relief.app>".to_string(),
            to: vec!["asha@relief.app".to_string()],
            subject: "Welcome".to_string(),
            html: "<p>Hi</p>".to_string(),
            text: None,
        };

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["to"][0], "asha@relief.app");
        assert!(json.get("text").is_none());
    }
}
