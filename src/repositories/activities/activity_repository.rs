//! 활동 기록 리포지토리 (`activities`)

use chrono::NaiveDate;
use uuid::Uuid;
use crate::core::errors::{AppError, AppResult};
use crate::db::{PostgrestQuery, SupabaseClient};
use crate::domain::entities::{Activity, NewActivity};
use crate::register_repository;

register_repository! {
    name = "activity", table = "activities",
    pub struct ActivityRepository {
        client: SupabaseClient,
    }
}

impl ActivityRepository {
    pub async fn insert(&self, activity: &NewActivity) -> AppResult<Activity> {
        let rows: Vec<Activity> = self.client.insert(Self::TABLE, activity).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::DatabaseError("활동 저장 결과가 비어 있습니다".to_string()))
    }

    /// 기간 내 활동 (날짜 오름차순, 양 끝 포함)
    pub async fn find_between(&self, user_id: &str, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<Activity>> {
        let query = PostgrestQuery::new()
            .eq("user_id", user_id)
            .gte("activity_date", from)
            .lte("activity_date", to)
            .order("activity_date", true)
            .order("created_at", true);

        self.client.select(Self::TABLE, &query).await
    }

    /// 내보내기용 전체 기록 (최신순)
    pub async fn find_all_by_user(&self, user_id: &str) -> AppResult<Vec<Activity>> {
        let query = PostgrestQuery::new()
            .eq("user_id", user_id)
            .order("activity_date", false)
            .order("created_at", false);

        self.client.select(Self::TABLE, &query).await
    }

    /// 본인 기록만 삭제됩니다. 삭제된 행이 있으면 `true`
    pub async fn delete_owned(&self, user_id: &str, id: Uuid) -> AppResult<bool> {
        let query = PostgrestQuery::new().eq("id", id).eq("user_id", user_id);
        Ok(self.client.delete(Self::TABLE, &query).await? > 0)
    }

    pub async fn count_by_user(&self, user_id: &str) -> AppResult<u64> {
        self.client.count(Self::TABLE, &PostgrestQuery::new().eq("user_id", user_id)).await
    }
}
