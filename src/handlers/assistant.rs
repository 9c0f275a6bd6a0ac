//! AI 어시스턴트 핸들러

use actix_web::{post, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::assistant::ChatRequest;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::assistant::ChatService;

/// `POST /api/v1/assistant/chat`
///
/// ```json
/// {
///   "message": "How can I cut my AC emissions?",
///   "history": [
///     { "role": "user", "content": "Hi" },
///     { "role": "model", "content": "Hello! How can I help you go greener today?" }
///   ]
/// }
/// ```
#[post("/chat")]
pub async fn chat(
    user: AuthenticatedUser,
    payload: web::Json<ChatRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = ChatService::instance()
        .reply(&user.user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
