//! 프로필, 공개 프로필, 리더보드 핸들러

use actix_web::{delete, get, patch, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::profiles::{LeaderboardQuery, UpdateProfileRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::profiles::{LeaderboardService, ProfileService};

/// 본인 프로필 조회
///
/// # 엔드포인트
///
/// `GET /api/v1/me`
///
/// 프로필 행이 아직 없으면 (웹훅 지연) Clerk에서 신원을 가져와 생성한 뒤 반환합니다.
#[get("")]
pub async fn get_me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let profile = ProfileService::instance().get_or_provision(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// 본인 프로필 수정
///
/// `PATCH /api/v1/me`
///
/// ```json
/// { "display_name": "Asha", "bio": "Cycling to work since 2021", "location": "Pune" }
/// ```
#[patch("")]
pub async fn update_me(
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let profile = ProfileService::instance()
        .update(&user.user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(profile))
}

/// 계정 삭제 (Clerk 사용자 + 프로필)
///
/// `DELETE /api/v1/me`
#[delete("")]
pub async fn delete_me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    ProfileService::instance().delete_account(&user.user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `GET /api/v1/profiles/{user_id}`
#[get("/{user_id}")]
pub async fn get_public_profile(user_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let profile = ProfileService::instance().public_profile(&user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Karma 순위
///
/// `GET /api/v1/leaderboard?limit=10`
#[get("")]
pub async fn leaderboard(query: web::Query<LeaderboardQuery>) -> Result<HttpResponse, AppError> {
    let entries = LeaderboardService::instance().top(query.limit).await?;
    Ok(HttpResponse::Ok().json(entries))
}
