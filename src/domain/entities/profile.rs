//! 사용자 프로필 엔티티 (`profiles` 테이블)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 사용자 프로필
///
/// `id`는 Clerk 사용자 ID(`user_2abc...`)이며, 프로필은 Clerk 웹훅 또는
/// 첫 `/me` 요청 시 생성됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    /// 누적 Karma Points
    #[serde(default)]
    pub karma_points: i64,

    #[serde(default)]
    pub current_streak: i32,

    #[serde(default)]
    pub longest_streak: i32,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// 화면 표시용 이름 (표시 이름 → 이메일 로컬 파트 → "Eco Warrior")
    pub fn public_name(&self) -> String {
        if let Some(name) = self.display_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.trim().to_string();
        }

        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|local| !local.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| "Eco Warrior".to_string())
    }
}

/// Clerk 신원 정보로 생성/동기화하는 프로필 행
///
/// 카운터 컬럼(`karma_points`, 스트릭)은 포함하지 않으므로
/// 병합 업서트가 기존 값을 덮어쓰지 않습니다. `None` 필드도 전송하지 않아
/// Clerk에 이름/이미지가 없을 때 사용자가 직접 설정한 값이 유지됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProfile {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// `PATCH /profiles` 본문. `None` 필드는 전송하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_streak: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub longest_streak: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub karma_points: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.bio.is_none()
            && self.location.is_none()
            && self.avatar_url.is_none()
            && self.email.is_none()
            && self.current_streak.is_none()
            && self.longest_streak.is_none()
            && self.karma_points.is_none()
    }

    /// 수정 시각을 현재 시각으로 찍습니다.
    pub fn touched(mut self) -> Self {
        self.updated_at = Some(Utc::now());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(display_name: Option<&str>, email: Option<&str>) -> Profile {
        Profile {
            id: "user_1".to_string(),
            email: email.map(str::to_string),
            display_name: display_name.map(str::to_string),
            avatar_url: None,
            bio: None,
            location: None,
            karma_points: 0,
            current_streak: 0,
            longest_streak: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_public_name_fallbacks() {
        assert_eq!(profile(Some(" Asha "), Some("a@x.io")).public_name(), "Asha");
        assert_eq!(profile(Some("  "), Some("ravi@relief.app")).public_name(), "ravi");
        assert_eq!(profile(None, None).public_name(), "Eco Warrior");
    }

    #[test]
    fn test_profile_deserializes_with_missing_counters() {
        let json = r#"{"id":"user_1","created_at":"2024-03-01T10:00:00+00:00"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.karma_points, 0);
        assert_eq!(profile.current_streak, 0);
        assert!(profile.display_name.is_none());
    }

    #[test]
    fn test_patch_skips_unset_fields() {
        let patch = ProfilePatch { bio: Some("cycling to work".to_string()), ..Default::default() };
        let json = serde_json::to_value(&patch).unwrap();

        assert_eq!(json, serde_json::json!({"bio": "cycling to work"}));
        assert!(!patch.is_empty());
        assert!(ProfilePatch::default().touched().is_empty());
    }

    #[test]
    fn test_new_profile_omits_missing_identity_fields() {
        let identity = NewProfile {
            id: "user_1".to_string(),
            email: Some("asha@relief.app".to_string()),
            display_name: None,
            avatar_url: None,
        };

        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "user_1", "email": "asha@relief.app" }));
    }
}
