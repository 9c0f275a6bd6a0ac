//! 관리자 핸들러
//!
//! 모든 라우트는 `admin` 역할을 요구하는 스코프 아래에 등록됩니다.

use actix_web::{post, web, HttpResponse};
use uuid::Uuid;
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::admin::BroadcastRequest;
use crate::domain::dto::content::{CreateEventRequest, CreateTipRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::content::ContentService;
use crate::services::notifications::EmailService;

/// `POST /api/v1/admin/tips`
#[post("/tips")]
pub async fn create_tip(payload: web::Json<CreateTipRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let tip = ContentService::instance().create_tip(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(tip))
}

/// `POST /api/v1/admin/events`
#[post("/events")]
pub async fn create_event(
    admin: AuthenticatedUser,
    payload: web::Json<CreateEventRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let event = ContentService::instance()
        .create_event(&admin.user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(event))
}

/// `POST /api/v1/admin/stories/{id}/approve`
#[post("/stories/{id}/approve")]
pub async fn approve_story(id: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
    let story = ContentService::instance().approve_story(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(story))
}

/// 전체 공지 메일
///
/// `POST /api/v1/admin/emails/broadcast`
///
/// 일부 수신자에게 실패해도 200과 함께 성공/실패 건수를 반환합니다.
#[post("/emails/broadcast")]
pub async fn broadcast_email(
    admin: AuthenticatedUser,
    payload: web::Json<BroadcastRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    log::info!("📣 공지 발송 요청: admin={} subject={}", admin.user_id, payload.subject);
    let result = EmailService::instance().broadcast(&payload).await?;

    Ok(HttpResponse::Ok().json(result))
}
