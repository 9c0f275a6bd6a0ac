//! 에코 팁, 성공 사례, 행사 핸들러

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::common::PageQuery;
use crate::domain::dto::content::{CreateStoryRequest, TipListQuery, TipSearchQuery};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::badges::BadgeService;
use crate::services::content::ContentService;

/// 다가오는 행사 기본 개수
const DEFAULT_EVENT_COUNT: usize = 20;
const MAX_EVENT_COUNT: usize = 100;

/// `GET /api/v1/tips?category=energy`
#[get("")]
pub async fn list_tips(query: web::Query<TipListQuery>) -> Result<HttpResponse, AppError> {
    let tips = ContentService::instance().tips(query.category.as_deref()).await?;
    Ok(HttpResponse::Ok().json(tips))
}

/// `GET /api/v1/tips/daily`
#[get("/daily")]
pub async fn daily_tip() -> Result<HttpResponse, AppError> {
    let tip = ContentService::instance().daily_tip().await?;
    Ok(HttpResponse::Ok().json(tip))
}

/// 의미 기반 검색 (Gemini 임베딩)
///
/// `GET /api/v1/tips/search?q=reduce+AC+usage&limit=5`
#[get("/search")]
pub async fn search_tips(
    _user: AuthenticatedUser,
    query: web::Query<TipSearchQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let results = ContentService::instance().search_tips(&query).await?;
    Ok(HttpResponse::Ok().json(results))
}

/// 승인된 사례 목록
///
/// `GET /api/v1/stories?limit=&offset=`
#[get("")]
pub async fn list_stories(query: web::Query<PageQuery>) -> Result<HttpResponse, AppError> {
    let stories = ContentService::instance().stories(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(stories))
}

/// 사례 제출 (관리자 승인 대기)
///
/// `POST /api/v1/stories`
#[post("")]
pub async fn submit_story(
    user: AuthenticatedUser,
    payload: web::Json<CreateStoryRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let story = ContentService::instance()
        .submit_story(&user.user_id, payload.into_inner())
        .await?;
    BadgeService::instance().award_quietly(&user.user_id).await;

    Ok(HttpResponse::Created().json(story))
}

/// `GET /api/v1/events?limit=`
#[get("")]
pub async fn list_events(query: web::Query<PageQuery>) -> Result<HttpResponse, AppError> {
    let events = ContentService::instance()
        .upcoming_events(query.limit_or(DEFAULT_EVENT_COUNT, MAX_EVENT_COUNT))
        .await?;

    Ok(HttpResponse::Ok().json(events))
}
