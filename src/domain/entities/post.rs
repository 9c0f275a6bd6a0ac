//! 커뮤니티 게시글 엔티티 (`posts` 테이블)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: String,

    /// 그룹 게시글이면 그룹 ID, 전체 피드 게시글이면 `None`
    #[serde(default)]
    pub group_id: Option<Uuid>,

    pub content: String,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub likes_count: i64,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPost {
    pub user_id: String,
    pub group_id: Option<Uuid>,
    pub content: String,
    pub image_url: Option<String>,
}
