//! Clerk 웹훅 이벤트 페이로드
//!
//! ```json
//! {
//!   "type": "user.created",
//!   "data": {
//!     "id": "user_2abc",
//!     "email_addresses": [{"id": "idn_1", "email_address": "asha@relief.app"}],
//!     "primary_email_address_id": "idn_1",
//!     "first_name": "Asha",
//!     "last_name": "Rao",
//!     "image_url": "https://img.clerk.com/..."
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use crate::domain::entities::NewProfile;

/// 웹훅 봉투. `data`는 이벤트 종류에 따라 형태가 달라 지연 파싱합니다.
#[derive(Debug, Clone, Deserialize)]
pub struct ClerkWebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,

    pub data: serde_json::Value,
}

/// 처리 대상 이벤트
#[derive(Debug, Clone, PartialEq)]
pub enum ClerkEvent {
    UserCreated(ClerkUser),
    UserUpdated(ClerkUser),
    UserDeleted { id: String },
    Ignored(String),
}

impl ClerkWebhookEvent {
    pub fn into_event(self) -> Result<ClerkEvent, serde_json::Error> {
        match self.event_type.as_str() {
            "user.created" => Ok(ClerkEvent::UserCreated(serde_json::from_value(self.data)?)),
            "user.updated" => Ok(ClerkEvent::UserUpdated(serde_json::from_value(self.data)?)),
            "user.deleted" => {
                let deleted: DeletedObject = serde_json::from_value(self.data)?;
                Ok(ClerkEvent::UserDeleted { id: deleted.id })
            }
            _ => Ok(ClerkEvent::Ignored(self.event_type)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct DeletedObject {
    id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClerkEmailAddress {
    pub id: String,
    pub email_address: String,
}

/// Clerk 사용자 객체 (웹훅 `data`와 Backend API `GET /users/{id}` 응답 공용)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClerkUser {
    pub id: String,

    #[serde(default)]
    pub email_addresses: Vec<ClerkEmailAddress>,

    #[serde(default)]
    pub primary_email_address_id: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,
}

impl ClerkUser {
    /// 기본 이메일, 없으면 첫 번째 이메일
    pub fn primary_email(&self) -> Option<&str> {
        let primary = self.primary_email_address_id.as_deref().and_then(|primary_id| {
            self.email_addresses.iter().find(|address| address.id == primary_id)
        });

        primary
            .or_else(|| self.email_addresses.first())
            .map(|address| address.email_address.as_str())
    }

    /// "이름 성" → 사용자명 순으로 표시 이름을 만듭니다.
    pub fn display_name(&self) -> Option<String> {
        let full_name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if !full_name.is_empty() {
            return Some(full_name);
        }

        self.username
            .as_deref()
            .map(str::trim)
            .filter(|username| !username.is_empty())
            .map(str::to_string)
    }

    pub fn to_new_profile(&self) -> NewProfile {
        NewProfile {
            id: self.id.clone(),
            email: self.primary_email().map(str::to_string),
            display_name: self.display_name(),
            avatar_url: self.image_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_created_event() {
        let json = r#"{
            "type": "user.created",
            "object": "event",
            "data": {
                "id": "user_2abc",
                "email_addresses": [
                    {"id": "idn_2", "email_address": "old@relief.app"},
                    {"id": "idn_1", "email_address": "asha@relief.app"}
                ],
                "primary_email_address_id": "idn_1",
                "first_name": "Asha",
                "last_name": null,
                "image_url": "https://img.clerk.com/asha"
            }
        }"#;

        let event: ClerkWebhookEvent = serde_json::from_str(json).unwrap();
        let ClerkEvent::UserCreated(user) = event.into_event().unwrap() else {
            panic!("expected user.created");
        };

        let profile = user.to_new_profile();
        assert_eq!(profile.email.as_deref(), Some("asha@relief.app"));
        assert_eq!(profile.display_name.as_deref(), Some("Asha"));
        assert_eq!(profile.avatar_url.as_deref(), Some("https://img.clerk.com/asha"));
    }

    #[test]
    fn test_user_deleted_and_ignored_events() {
        let deleted: ClerkWebhookEvent = serde_json::from_str(
            r#"{"type": "user.deleted", "data": {"id": "user_2abc", "deleted": true, "object": "user"}}"#,
        )
        .unwrap();
        assert_eq!(deleted.into_event().unwrap(), ClerkEvent::UserDeleted { id: "user_2abc".to_string() });

        let session: ClerkWebhookEvent = serde_json::from_str(
            r#"{"type": "session.created", "data": {"id": "sess_1"}}"#,
        )
        .unwrap();
        assert_eq!(session.into_event().unwrap(), ClerkEvent::Ignored("session.created".to_string()));
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let user = ClerkUser {
            id: "user_1".to_string(),
            email_addresses: vec![],
            primary_email_address_id: None,
            first_name: Some(" ".to_string()),
            last_name: None,
            username: Some("greenravi".to_string()),
            image_url: None,
        };

        assert_eq!(user.display_name().as_deref(), Some("greenravi"));
        assert_eq!(user.primary_email(), None);
    }
}
