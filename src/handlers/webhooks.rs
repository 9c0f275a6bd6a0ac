//! Clerk 웹훅 핸들러
//!
//! 본문 바이트 그대로 Svix 서명을 검증해야 하므로 `web::Bytes`로 받습니다.

use actix_web::{post, web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde_json::json;
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::ClerkEvent;
use crate::services::auth::{SvixHeaders, WebhookService};
use crate::services::notifications::EmailService;
use crate::services::profiles::ProfileService;

fn header(req: &HttpRequest, name: &str) -> AppResult<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| AppError::AuthenticationError(format!("{} 헤더가 없습니다", name)))
}

fn svix_headers(req: &HttpRequest) -> AppResult<SvixHeaders> {
    Ok(SvixHeaders {
        id: header(req, "svix-id")?,
        timestamp: header(req, "svix-timestamp")?,
        signature: header(req, "svix-signature")?,
    })
}

/// `POST /api/v1/webhooks/clerk`
///
/// | 이벤트 | 처리 |
/// |--------|------|
/// | `user.created` | 프로필 생성 + 환영 메일 |
/// | `user.updated` | 이메일/이름/아바타 동기화 |
/// | `user.deleted` | 프로필 삭제 |
///
/// 환영 메일 실패는 로그만 남기고 200을 반환합니다 (Svix 재전송으로 프로필이 중복 처리되지 않도록).
#[post("/clerk")]
pub async fn clerk_webhook(req: HttpRequest, body: web::Bytes) -> Result<HttpResponse, AppError> {
    let headers = svix_headers(&req)?;
    WebhookService::instance().verify(&headers, &body, Utc::now().timestamp())?;

    let event = WebhookService::parse_event(&body)?;
    log::info!("📨 Clerk 웹훅 수신: {} ({})", event_name(&event), headers.id);

    match event {
        ClerkEvent::UserCreated(clerk_user) => {
            let profile = ProfileService::instance()
                .sync_identity(&clerk_user.to_new_profile())
                .await?;

            if let Some(email) = clerk_user.primary_email() {
                if let Err(e) = EmailService::instance()
                    .send_welcome(email, &profile.public_name())
                    .await
                {
                    log::warn!("⚠️ 환영 메일 발송 실패: {} ({})", profile.id, e);
                }
            }
        }
        ClerkEvent::UserUpdated(clerk_user) => {
            ProfileService::instance()
                .sync_identity(&clerk_user.to_new_profile())
                .await?;
        }
        ClerkEvent::UserDeleted { id } => {
            ProfileService::instance().remove(&id).await?;
        }
        ClerkEvent::Ignored(event_type) => {
            log::debug!("처리하지 않는 Clerk 이벤트: {}", event_type);
        }
    }

    Ok(HttpResponse::Ok().json(json!({ "received": true })))
}

fn event_name(event: &ClerkEvent) -> &str {
    match event {
        ClerkEvent::UserCreated(_) => "user.created",
        ClerkEvent::UserUpdated(_) => "user.updated",
        ClerkEvent::UserDeleted { .. } => "user.deleted",
        ClerkEvent::Ignored(event_type) => event_type,
    }
}
