//! Gemini 기반 탄소 절감 상담 대화
//!
//! 서버는 대화 상태를 저장하지 않습니다. 클라이언트가 이전 대화를 `history`로 함께 보냅니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::clients::GeminiClient;
use crate::clients::gemini::{Content, GenerateContentRequest, Part};
use crate::core::errors::AppResult;
use crate::domain::dto::assistant::{ChatRequest, ChatResponse, ChatRole};

const SYSTEM_PROMPT: &str = "You are ReLief's sustainability assistant. \
Help users understand and reduce their personal carbon footprint with practical, \
specific suggestions about transport, home energy, water, food and waste. \
Use kg CO2e when quantifying impact and keep answers under 200 words. \
If a question is unrelated to sustainability, briefly steer the conversation back.";

const CHAT_TEMPERATURE: f32 = 0.7;
const CHAT_MAX_OUTPUT_TOKENS: u32 = 1024;

#[service(name = "chat")]
pub struct ChatService {
    gemini: Arc<GeminiClient>,
}

impl ChatService {
    pub async fn reply(&self, user_id: &str, request: ChatRequest) -> AppResult<ChatResponse> {
        log::debug!("💬 어시스턴트 요청: user={} history={}", user_id, request.history.len());

        let reply = self.gemini.generate(&build_request(request)).await?;

        Ok(ChatResponse { reply: reply.trim().to_string() })
    }
}

/// 이전 대화 뒤에 새 메시지를 사용자 턴으로 붙입니다.
fn build_request(request: ChatRequest) -> GenerateContentRequest {
    let mut contents: Vec<Content> = request
        .history
        .into_iter()
        .map(|turn| match turn.role {
            ChatRole::User => Content::user(vec![Part::text(turn.content)]),
            ChatRole::Model => Content::model(vec![Part::text(turn.content)]),
        })
        .collect();
    contents.push(Content::user(vec![Part::text(request.message.trim())]));

    GenerateContentRequest::new(contents)
        .with_system(SYSTEM_PROMPT)
        .with_temperature(CHAT_TEMPERATURE, CHAT_MAX_OUTPUT_TOKENS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::assistant::ChatTurn;

    #[test]
    fn test_build_request_appends_message_after_history() {
        let request = ChatRequest {
            message: "  And for my commute? ".to_string(),
            history: vec![
                ChatTurn { role: ChatRole::User, content: "How do I save power?".to_string() },
                ChatTurn { role: ChatRole::Model, content: "Switch to LED bulbs.".to_string() },
            ],
        };

        let json = serde_json::to_value(build_request(request)).unwrap();
        let contents = json["contents"].as_array().unwrap();

        assert_eq!(contents.len(), 3);
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["role"], "user");
        assert_eq!(contents[2]["parts"][0]["text"], "And for my commute?");
        assert!(json["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("carbon footprint"));
        assert_eq!(json["generationConfig"]["temperature"], 0.7_f32 as f64);
    }
}
