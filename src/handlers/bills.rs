//! 고지서 스캔 핸들러

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::bills::ScanBillRequest;
use crate::domain::dto::common::PageQuery;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::badges::BadgeService;
use crate::services::bills::BillService;

/// 고지서 이미지 스캔
///
/// `POST /api/v1/bills/scan`
///
/// ```json
/// { "image_base64": "data:image/jpeg;base64,/9j/4AAQ...", "mime_type": "image/jpeg" }
/// ```
///
/// Gemini가 사용량을 읽지 못하거나 종류를 판별하지 못하면 400,
/// Gemini 호출 자체가 실패하면 502를 반환합니다.
#[post("/scan")]
pub async fn scan_bill(
    user: AuthenticatedUser,
    payload: web::Json<ScanBillRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let mut response = BillService::instance().scan(&user.user_id, &payload).await?;
    response.awarded_badges = BadgeService::instance().award_quietly(&user.user_id).await;

    Ok(HttpResponse::Created().json(response))
}

/// `GET /api/v1/bills?limit=&offset=`
#[get("")]
pub async fn list_bills(
    user: AuthenticatedUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let bills = BillService::instance().list(&user.user_id, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(bills))
}
