//! 배지 핸들러

use actix_web::{get, post, HttpResponse};
use crate::core::errors::AppError;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::badges::BadgeService;

/// 전체 배지 카탈로그 (공개)
#[get("")]
pub async fn list_badges() -> Result<HttpResponse, AppError> {
    let badges = BadgeService::instance().catalogue().await?;
    Ok(HttpResponse::Ok().json(badges))
}

/// `GET /api/v1/badges/me`
#[get("/me")]
pub async fn my_badges(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let earned = BadgeService::instance().earned(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(earned))
}

/// 조건을 다시 확인해 새 배지를 지급합니다.
///
/// `POST /api/v1/badges/check`
#[post("/check")]
pub async fn check_badges(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let award = BadgeService::instance().check_and_award(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(award))
}
