//! 외부 플랫폼 HTTP 클라이언트
//!
//! Supabase 외의 관리형 서비스 호출을 담당합니다. 각 클라이언트는 `main`에서 한 번 생성되어
//! [`ServiceLocator::set`](crate::core::registry::ServiceLocator::set)으로 등록되고,
//! 서비스는 `Arc<...>` 필드로 주입받습니다.
//!
//! | 클라이언트 | 용도 |
//! |-----------|------|
//! | [`ClerkClient`] | 사용자 조회/삭제 (Backend API) |
//! | [`ResendClient`] | 트랜잭션 이메일 발송 |
//! | [`GeminiClient`] | 고지서 OCR, 어시스턴트 대화, 텍스트 임베딩 |
//!
//! 모든 실패는 [`AppError::ExternalServiceError`](crate::core::errors::AppError)로 변환됩니다.

pub mod clerk;
pub mod resend;
pub mod gemini;

pub use clerk::ClerkClient;
pub use resend::{EmailMessage, ResendClient};
pub use gemini::GeminiClient;

use reqwest::header::HeaderValue;
use crate::core::errors::{AppError, AppResult, ErrorContext};

pub(crate) fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value)
        .context("잘못된 헤더 값")
}

/// 실패 응답 본문을 에러 메시지에 붙입니다. 본문이 길면 앞부분만 남깁니다.
pub(crate) async fn vendor_error(vendor: &str, action: &str, response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let body = crate::utils::string_utils::truncate_chars(body.trim(), 300);

    AppError::ExternalServiceError(format!("{} {} 실패 ({}): {}", vendor, action, status.as_u16(), body))
}
