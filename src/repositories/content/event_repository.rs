//! 커뮤니티 행사 리포지토리 (`community_events`)

use chrono::{DateTime, Utc};
use crate::core::errors::{AppError, AppResult};
use crate::db::{PostgrestQuery, SupabaseClient};
use crate::domain::entities::{CommunityEvent, NewCommunityEvent};
use crate::register_repository;

register_repository! {
    name = "event", table = "community_events",
    pub struct EventRepository {
        client: SupabaseClient,
    }
}

impl EventRepository {
    /// `now` 이후 시작하는 행사 (시작 시각 순)
    pub async fn find_upcoming(&self, now: DateTime<Utc>, limit: usize) -> AppResult<Vec<CommunityEvent>> {
        let query = PostgrestQuery::new()
            .gte("starts_at", now.to_rfc3339())
            .order("starts_at", true)
            .limit(limit);

        self.client.select(Self::TABLE, &query).await
    }

    pub async fn insert(&self, event: &NewCommunityEvent) -> AppResult<CommunityEvent> {
        let rows: Vec<CommunityEvent> = self.client.insert(Self::TABLE, event).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::DatabaseError("행사 저장 결과가 비어 있습니다".to_string()))
    }
}
