//! 운영자/사용자 콘텐츠 (`success_stories`, `eco_tips`, `community_events` 테이블)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 사용자가 공유한 실천 사례. 관리자 승인 후 공개됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessStory {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub content: String,

    #[serde(default)]
    pub co2_saved_kg: Option<f64>,

    #[serde(default)]
    pub is_approved: bool,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSuccessStory {
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub co2_saved_kg: Option<f64>,
    pub is_approved: bool,
}

/// 에코 팁
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcoTip {
    pub id: Uuid,
    pub title: String,
    pub content: String,

    #[serde(default)]
    pub category: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl EcoTip {
    /// 임베딩 입력 텍스트
    pub fn embedding_text(&self) -> String {
        match &self.category {
            Some(category) => format!("{} ({})\n{}", self.title, category, self.content),
            None => format!("{}\n{}", self.title, self.content),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEcoTip {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
}

/// 커뮤니티 행사
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityEvent {
    pub id: Uuid,
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    pub starts_at: DateTime<Utc>,

    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub organizer_id: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCommunityEvent {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub organizer_id: Option<String>,
}
