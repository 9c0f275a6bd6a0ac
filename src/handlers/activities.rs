//! 일일 활동 기록 핸들러

use actix_web::{delete, get, post, web, HttpResponse};
use uuid::Uuid;
use crate::core::errors::AppError;
use crate::domain::dto::activities::{
    ActivityRangeQuery, LogActivityRequest, LogActivityResponse, SummaryQuery,
};
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::emissions::ActivityInput;
use crate::services::badges::BadgeService;
use crate::services::carbon::ActivityService;

/// 저장하지 않고 배출량만 계산
///
/// `POST /api/v1/activities/calculate`
///
/// ```json
/// {
///   "electricity": "typical",
///   "water": "low",
///   "meals": 3,
///   "diet": "vegetarian",
///   "trips": [{ "mode": "bus", "distance_km": 12 }],
///   "appliances": ["washing_machine"]
/// }
/// ```
#[post("/calculate")]
pub async fn calculate(payload: web::Json<ActivityInput>) -> Result<HttpResponse, AppError> {
    let breakdown = ActivityService::instance().preview(&payload)?;
    Ok(HttpResponse::Ok().json(breakdown))
}

/// 활동 기록 후 배지 확인
///
/// `POST /api/v1/activities`
///
/// 배지 지급이 실패해도 기록은 성공으로 응답합니다.
#[post("")]
pub async fn log_activity(
    user: AuthenticatedUser,
    payload: web::Json<LogActivityRequest>,
) -> Result<HttpResponse, AppError> {
    let activity = ActivityService::instance()
        .log(&user.user_id, payload.into_inner())
        .await?;

    let awarded_badges = BadgeService::instance().award_quietly(&user.user_id).await;

    Ok(HttpResponse::Created().json(LogActivityResponse { activity, awarded_badges }))
}

/// `GET /api/v1/activities?from=2024-03-01&to=2024-03-31`
#[get("")]
pub async fn list_activities(
    user: AuthenticatedUser,
    query: web::Query<ActivityRangeQuery>,
) -> Result<HttpResponse, AppError> {
    let activities = ActivityService::instance()
        .list(&user.user_id, query.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(activities))
}

/// `GET /api/v1/activities/summary?days=7`
#[get("/summary")]
pub async fn activity_summary(
    user: AuthenticatedUser,
    query: web::Query<SummaryQuery>,
) -> Result<HttpResponse, AppError> {
    let summary = ActivityService::instance()
        .summary(&user.user_id, query.days)
        .await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// `DELETE /api/v1/activities/{id}`
#[delete("/{id}")]
pub async fn delete_activity(
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    ActivityService::instance().delete(&user.user_id, id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
