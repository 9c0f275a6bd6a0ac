//! 팁/사례/행사 요청 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::entities::EcoTip;
use crate::utils::string_utils::deserialize_optional_string;

/// `POST /api/v1/stories`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStoryRequest {
    #[validate(length(min = 3, max = 120, message = "제목은 3-120자 사이여야 합니다"))]
    pub title: String,

    #[validate(length(min = 20, max = 5000, message = "내용은 20-5000자 사이여야 합니다"))]
    pub content: String,

    #[serde(default)]
    #[validate(range(min = 0.0, max = 1000000.0, message = "절감량은 0 이상이어야 합니다"))]
    pub co2_saved_kg: Option<f64>,
}

/// `GET /api/v1/tips?category=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TipListQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
}

/// `GET /api/v1/tips/search?q=&limit=`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TipSearchQuery {
    #[validate(length(min = 2, max = 200, message = "검색어는 2-200자 사이여야 합니다"))]
    pub q: String,

    pub limit: Option<usize>,
}

/// 유사도 점수가 붙은 팁
#[derive(Debug, Clone, Serialize)]
pub struct ScoredTip {
    pub tip: EcoTip,
    pub score: f32,
}

/// `POST /api/v1/admin/tips`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTipRequest {
    #[validate(length(min = 3, max = 120, message = "제목은 3-120자 사이여야 합니다"))]
    pub title: String,

    #[validate(length(min = 10, max = 2000, message = "내용은 10-2000자 사이여야 합니다"))]
    pub content: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 40, message = "카테고리는 40자 이하여야 합니다"))]
    pub category: Option<String>,
}

/// `POST /api/v1/admin/events`
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_event_window"))]
pub struct CreateEventRequest {
    #[validate(length(min = 3, max = 120, message = "행사 이름은 3-120자 사이여야 합니다"))]
    pub title: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 2000, message = "행사 설명은 2000자 이하여야 합니다"))]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 200, message = "장소는 200자 이하여야 합니다"))]
    pub location: Option<String>,

    pub starts_at: DateTime<Utc>,

    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

fn validate_event_window(request: &CreateEventRequest) -> Result<(), ValidationError> {
    match request.ends_at {
        Some(ends_at) if ends_at < request.starts_at => Err(ValidationError::new("invalid_event_window")
            .with_message("종료 시각은 시작 시각 이후여야 합니다".into())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_window_validation() {
        let request: CreateEventRequest = serde_json::from_str(
            r#"{
                "title": "Beach cleanup",
                "starts_at": "2024-06-05T09:00:00Z",
                "ends_at": "2024-06-05T08:00:00Z"
            }"#,
        )
        .unwrap();
        assert!(request.validate().is_err());

        let request = CreateEventRequest { ends_at: None, ..request };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_story_validation() {
        let request: CreateStoryRequest = serde_json::from_str(
            r#"{"title": "Solar roof", "content": "We installed panels and cut our bill by half.", "co2_saved_kg": -3}"#,
        )
        .unwrap();
        assert!(request.validate().is_err());
    }
}
