//! AI 어시스턴트 대화 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 대화 참여자 (Gemini `contents[].role`과 동일한 값)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ChatTurn {
    pub role: ChatRole,

    #[validate(length(min = 1, max = 4000, message = "대화 메시지는 1-4000자 사이여야 합니다"))]
    pub content: String,
}

/// `POST /api/v1/assistant/chat`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 2000, message = "메시지는 1-2000자 사이여야 합니다"))]
    pub message: String,

    /// 이전 대화 (오래된 순)
    #[serde(default)]
    #[validate(length(max = 20, message = "대화 기록은 최대 20개까지 보낼 수 있습니다"))]
    #[validate(nested)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}
