//! 커뮤니티(게시글/그룹) 요청 DTO

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// `POST /api/v1/posts`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 2000, message = "게시글은 1-2000자 사이여야 합니다"))]
    pub content: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "유효한 이미지 URL이어야 합니다"))]
    pub image_url: Option<String>,

    #[serde(default)]
    pub group_id: Option<Uuid>,
}

/// `GET /api/v1/posts?group_id=&limit=&offset=`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PostListQuery {
    pub group_id: Option<Uuid>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// `POST /api/v1/groups`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 3, max = 80, message = "그룹 이름은 3-80자 사이여야 합니다"))]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 500, message = "그룹 소개는 500자 이하여야 합니다"))]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_post_validation() {
        let ok: CreatePostRequest = serde_json::from_str(r#"{"content": "Switched to a bike commute!"}"#).unwrap();
        assert!(ok.validate().is_ok());
        assert!(ok.group_id.is_none());

        let empty: CreatePostRequest = serde_json::from_str(r#"{"content": ""}"#).unwrap();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_create_group_validation() {
        let short: CreateGroupRequest = serde_json::from_str(r#"{"name": "ab"}"#).unwrap();
        assert!(short.validate().is_err());
    }
}
