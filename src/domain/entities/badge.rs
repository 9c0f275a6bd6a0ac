//! 배지 카탈로그와 획득 기록 (`badges`, `user_badges` 테이블)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 배지 획득 조건이 참조하는 사용자 통계 항목
///
/// 카탈로그에 알 수 없는 값이 들어 있으면 [`RequirementType::Unknown`]으로
/// 역직렬화되며, 이런 배지는 절대 지급되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    ActivitiesLogged,
    BillsScanned,
    PostsCreated,
    GroupsJoined,
    StoriesShared,
    CurrentStreak,
    LongestStreak,
    KarmaPoints,
    #[serde(other)]
    Unknown,
}

/// 배지 카탈로그 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: Uuid,
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    pub requirement_type: RequirementType,
    pub requirement_value: i64,

    /// 획득 시 지급되는 Karma Points
    #[serde(default)]
    pub points: i64,
}

/// 사용자별 배지 획득 기록 (`user_id, badge_id` 유니크)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBadge {
    pub user_id: String,
    pub badge_id: Uuid,
    pub earned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUserBadge {
    pub user_id: String,
    pub badge_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_requirement_type_deserializes() {
        let json = r#"{
            "id": "0b8f3a8e-5a53-4c2b-8f0e-6d7c9b1a2e34",
            "name": "Tree Hugger",
            "requirement_type": "trees_planted",
            "requirement_value": 5
        }"#;

        let badge: Badge = serde_json::from_str(json).unwrap();
        assert_eq!(badge.requirement_type, RequirementType::Unknown);
        assert_eq!(badge.points, 0);
    }

    #[test]
    fn test_requirement_type_snake_case() {
        let parsed: RequirementType = serde_json::from_str(r#""current_streak""#).unwrap();
        assert_eq!(parsed, RequirementType::CurrentStreak);
    }
}
