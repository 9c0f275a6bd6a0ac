//! 프로필 요청/응답 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::{Profile, ProfilePatch};
use crate::utils::string_utils::{clean_optional_string, deserialize_optional_string};

/// `PATCH /api/v1/me`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 50, message = "표시 이름은 1-50자 사이여야 합니다"))]
    pub display_name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 280, message = "소개는 280자 이하여야 합니다"))]
    pub bio: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 100, message = "지역은 100자 이하여야 합니다"))]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "유효한 이미지 URL이어야 합니다"))]
    pub avatar_url: Option<String>,
}

impl UpdateProfileRequest {
    pub fn into_patch(self) -> ProfilePatch {
        ProfilePatch {
            display_name: clean_optional_string(self.display_name),
            bio: clean_optional_string(self.bio),
            location: clean_optional_string(self.location),
            avatar_url: clean_optional_string(self.avatar_url),
            ..Default::default()
        }
    }
}

/// 다른 사용자에게 보이는 프로필 (이메일 제외)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicProfileResponse {
    pub id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub karma_points: i64,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub member_since: DateTime<Utc>,
}

impl From<Profile> for PublicProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            display_name: profile.public_name(),
            id: profile.id,
            avatar_url: profile.avatar_url,
            bio: profile.bio,
            location: profile.location,
            karma_points: profile.karma_points,
            current_streak: profile.current_streak,
            longest_streak: profile.longest_streak,
            member_since: profile.created_at,
        }
    }
}

/// 리더보드 한 줄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub karma_points: i64,
    pub current_streak: i32,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_blank_strings_become_none() {
        let request: UpdateProfileRequest =
            serde_json::from_str(r#"{"display_name": "  ", "bio": " Composting daily "}"#).unwrap();
        assert!(request.validate().is_ok());

        let patch = request.into_patch();
        assert!(patch.display_name.is_none());
        assert_eq!(patch.bio.as_deref(), Some("Composting daily"));
    }

    #[test]
    fn test_update_request_validation() {
        let request = UpdateProfileRequest {
            avatar_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = UpdateProfileRequest {
            bio: Some("x".repeat(281)),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }
}
