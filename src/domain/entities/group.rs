//! 커뮤니티 그룹 (`groups`, `group_members` 테이블)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub created_by: String,

    /// `group_members` 행 수를 가입/탈퇴 시마다 다시 세어 저장
    #[serde(default)]
    pub member_count: i64,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGroup {
    pub name: String,
    pub description: Option<String>,
    pub created_by: String,
    pub member_count: i64,
}

/// 그룹 멤버십 (`group_id, user_id` 유니크)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub group_id: Uuid,
    pub user_id: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGroupMember {
    pub group_id: Uuid,
    pub user_id: String,
}
