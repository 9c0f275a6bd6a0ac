//! 실천 사례 리포지토리 (`success_stories`)

use uuid::Uuid;
use crate::core::errors::{AppError, AppResult};
use crate::db::{PostgrestQuery, SupabaseClient};
use crate::domain::entities::{NewSuccessStory, SuccessStory};
use crate::register_repository;

register_repository! {
    name = "story", table = "success_stories",
    pub struct StoryRepository {
        client: SupabaseClient,
    }
}

#[derive(serde::Serialize)]
struct ApprovalPatch {
    is_approved: bool,
}

impl StoryRepository {
    pub async fn insert(&self, story: &NewSuccessStory) -> AppResult<SuccessStory> {
        let rows: Vec<SuccessStory> = self.client.insert(Self::TABLE, story).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::DatabaseError("사례 저장 결과가 비어 있습니다".to_string()))
    }

    /// 승인된 사례 (최신순)
    pub async fn list_approved(&self, limit: usize, offset: usize) -> AppResult<Vec<SuccessStory>> {
        let query = PostgrestQuery::new()
            .eq("is_approved", true)
            .order("created_at", false)
            .limit(limit)
            .offset(offset);

        self.client.select(Self::TABLE, &query).await
    }

    pub async fn approve(&self, id: Uuid) -> AppResult<Option<SuccessStory>> {
        let rows: Vec<SuccessStory> = self.client
            .update(Self::TABLE, &PostgrestQuery::new().eq("id", id), &ApprovalPatch { is_approved: true })
            .await?;

        Ok(rows.into_iter().next())
    }

    pub async fn count_by_user(&self, user_id: &str) -> AppResult<u64> {
        self.client.count(Self::TABLE, &PostgrestQuery::new().eq("user_id", user_id)).await
    }
}
