//! 연속 접속 핸들러

use actix_web::{get, post, HttpResponse};
use crate::core::errors::AppError;
use crate::domain::dto::streaks::CheckInResponse;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::badges::BadgeService;
use crate::services::streaks::StreakService;

/// `GET /api/v1/streaks`
#[get("")]
pub async fn get_streak(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let status = StreakService::instance().status(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(status))
}

/// 일일 체크인. 같은 날 여러 번 호출해도 한 번만 기록됩니다.
///
/// `POST /api/v1/streaks/check-in`
#[post("/check-in")]
pub async fn check_in(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let status = StreakService::instance().check_in(&user.user_id).await?;
    let awarded_badges = BadgeService::instance().award_quietly(&user.user_id).await;

    Ok(HttpResponse::Ok().json(CheckInResponse { status, awarded_badges }))
}
