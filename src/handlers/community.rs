//! 게시글, 그룹 핸들러

use actix_web::{delete, get, post, web, HttpResponse};
use uuid::Uuid;
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::common::PageQuery;
use crate::domain::dto::community::{CreateGroupRequest, CreatePostRequest, PostListQuery};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::badges::BadgeService;
use crate::services::community::CommunityService;

/// `GET /api/v1/posts?group_id=&limit=&offset=`
#[get("")]
pub async fn list_posts(query: web::Query<PostListQuery>) -> Result<HttpResponse, AppError> {
    let posts = CommunityService::instance().list_posts(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// `POST /api/v1/posts`
#[post("")]
pub async fn create_post(
    user: AuthenticatedUser,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let post = CommunityService::instance()
        .create_post(&user.user_id, payload.into_inner())
        .await?;
    BadgeService::instance().award_quietly(&user.user_id).await;

    Ok(HttpResponse::Created().json(post))
}

/// 본인 게시글만 삭제할 수 있습니다.
#[delete("/{id}")]
pub async fn delete_post(
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    CommunityService::instance().delete_post(&user.user_id, id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `GET /api/v1/groups?limit=&offset=`
#[get("")]
pub async fn list_groups(query: web::Query<PageQuery>) -> Result<HttpResponse, AppError> {
    let groups = CommunityService::instance().list_groups(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(groups))
}

/// `POST /api/v1/groups`
#[post("")]
pub async fn create_group(
    user: AuthenticatedUser,
    payload: web::Json<CreateGroupRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let group = CommunityService::instance()
        .create_group(&user.user_id, payload.into_inner())
        .await?;
    BadgeService::instance().award_quietly(&user.user_id).await;

    Ok(HttpResponse::Created().json(group))
}

/// `POST /api/v1/groups/{id}/members`
#[post("/{id}/members")]
pub async fn join_group(
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let group = CommunityService::instance()
        .join_group(&user.user_id, id.into_inner())
        .await?;
    BadgeService::instance().award_quietly(&user.user_id).await;

    Ok(HttpResponse::Ok().json(group))
}

/// `DELETE /api/v1/groups/{id}/members`
#[delete("/{id}/members")]
pub async fn leave_group(
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let group = CommunityService::instance()
        .leave_group(&user.user_id, id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(group))
}
