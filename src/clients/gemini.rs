//! Google Gemini API 클라이언트
//!
//! - `POST /models/{model}:generateContent`: 고지서 이미지 추출, 어시스턴트 대화
//! - `POST /models/{embedding_model}:embedContent`: 팁 검색용 임베딩
//!
//! API 키는 쿼리 문자열 대신 `x-goog-api-key` 헤더로 전달해 요청 로그에 남지 않게 합니다.
//!
//! ```rust,ignore
//! let request = GenerateContentRequest::new(vec![
//!     Content::user(vec![Part::text(prompt), Part::inline_image("image/png", data)]),
//! ])
//! .json_output();
//!
//! let text = gemini.generate(&request).await?;
//! ```

use std::time::Duration;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use crate::config::GeminiConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use super::{header_value, vendor_error};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), inline_data: None }
    }

    pub fn inline_image(mime_type: &str, base64_data: &str) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: base64_data.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self { role: Some("user".to_string()), parts }
    }

    pub fn model(parts: Vec<Part>) -> Self {
        Self { role: Some("model".to_string()), parts }
    }

    /// 역할 없는 콘텐츠 (`systemInstruction`, 임베딩 입력)
    pub fn plain(text: impl Into<String>) -> Self {
        Self { role: None, parts: vec![Part::text(text)] }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,

    pub contents: Vec<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    pub fn new(contents: Vec<Content>) -> Self {
        Self { contents, ..Default::default() }
    }

    pub fn with_system(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(Content::plain(instruction));
        self
    }

    /// `responseMimeType: application/json`으로 JSON 응답을 요청합니다.
    pub fn json_output(mut self) -> Self {
        let config = self.generation_config.get_or_insert_with(GenerationConfig::default);
        config.response_mime_type = Some("application/json".to_string());
        config.temperature = Some(0.0);
        self
    }

    pub fn with_temperature(mut self, temperature: f32, max_output_tokens: u32) -> Self {
        let config = self.generation_config.get_or_insert_with(GenerationConfig::default);
        config.temperature = Some(temperature);
        config.max_output_tokens = Some(max_output_tokens);
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// 첫 번째 후보의 텍스트 파트를 이어 붙입니다.
    pub fn text(&self) -> AppResult<String> {
        let text: String = self
            .candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content.parts.iter().filter_map(|part| part.text.as_deref()).collect()
            })
            .unwrap_or_default();

        if !text.trim().is_empty() {
            return Ok(text);
        }

        let reason = self
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.clone())
            .or_else(|| self.candidates.first().and_then(|c| c.finish_reason.clone()))
            .unwrap_or_else(|| "EMPTY".to_string());

        Err(AppError::ExternalServiceError(format!("Gemini가 빈 응답을 반환했습니다 ({})", reason)))
    }
}

#[derive(Debug, Serialize)]
struct EmbedContentRequest<'a> {
    model: String,
    content: Content,
    #[serde(rename = "taskType", skip_serializing_if = "Option::is_none")]
    task_type: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: Embedding,
}

#[derive(Debug, Deserialize)]
struct Embedding {
    #[serde(default)]
    values: Vec<f32>,
}

/// 임베딩 용도 (검색 질의와 문서를 구분하면 검색 품질이 좋아짐)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingTask {
    Query,
    Document,
}

impl EmbeddingTask {
    fn as_str(&self) -> &'static str {
        match self {
            EmbeddingTask::Query => "RETRIEVAL_QUERY",
            EmbeddingTask::Document => "RETRIEVAL_DOCUMENT",
        }
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_url: String,
    model: String,
    embedding_model: String,
}

impl GeminiClient {
    pub fn new() -> AppResult<Self> {
        let api_key = GeminiConfig::api_key()?;

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", header_value(&api_key)?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(GeminiConfig::timeout_secs()))
            .build()
            .context("Gemini HTTP 클라이언트 생성 실패")?;

        Ok(Self {
            http,
            api_url: GeminiConfig::api_url(),
            model: GeminiConfig::model(),
            embedding_model: GeminiConfig::embedding_model(),
        })
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    /// 생성 모델을 호출하고 응답 텍스트를 반환합니다.
    pub async fn generate(&self, request: &GenerateContentRequest) -> AppResult<String> {
        let url = format!("{}/models/{}:generateContent", self.api_url, self.model);

        let response = self.http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Gemini 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            return Err(vendor_error("Gemini", "generateContent", response).await);
        }

        let body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Gemini 응답 파싱 실패: {}", e)))?;

        body.text()
    }

    /// 텍스트 임베딩 벡터를 계산합니다.
    pub async fn embed(&self, text: &str, task: EmbeddingTask) -> AppResult<Vec<f32>> {
        let url = format!("{}/models/{}:embedContent", self.api_url, self.embedding_model);
        let request = EmbedContentRequest {
            model: format!("models/{}", self.embedding_model),
            content: Content::plain(text),
            task_type: Some(task.as_str()),
        };

        let response = self.http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Gemini 임베딩 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            return Err(vendor_error("Gemini", "embedContent", response).await);
        }

        let body = response
            .json::<EmbedContentResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Gemini 임베딩 응답 파싱 실패: {}", e)))?;

        if body.embedding.values.is_empty() {
            return Err(AppError::ExternalServiceError("Gemini가 빈 임베딩을 반환했습니다".to_string()));
        }

        Ok(body.embedding.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_wire_shape() {
        let request = GenerateContentRequest::new(vec![Content::user(vec![
            Part::text("Extract the bill"),
            Part::inline_image("image/png", "iVBORw0KGgo"),
        ])])
        .with_system("You read utility bills.")
        .json_output();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "You read utility bills.");
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": " 1}"}]},
                "finishReason": "STOP"
            }]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.text().unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_blocked_response_reports_reason() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();

        match response.text() {
            Err(AppError::ExternalServiceError(msg)) => assert!(msg.contains("SAFETY")),
            other => panic!("unexpected: {:?}", other.map(|_| ())),
        }
    }
}
