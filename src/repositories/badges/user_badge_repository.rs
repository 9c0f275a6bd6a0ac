//! 배지 획득 기록 리포지토리 (`user_badges`)

use std::collections::HashSet;
use uuid::Uuid;
use crate::core::errors::AppResult;
use crate::db::{PostgrestQuery, Resolution, SupabaseClient};
use crate::domain::entities::{NewUserBadge, UserBadge};
use crate::register_repository;

register_repository! {
    name = "user_badge", table = "user_badges",
    pub struct UserBadgeRepository {
        client: SupabaseClient,
    }
}

impl UserBadgeRepository {
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<UserBadge>> {
        let query = PostgrestQuery::new()
            .eq("user_id", user_id)
            .order("earned_at", false);

        self.client.select(Self::TABLE, &query).await
    }

    pub async fn find_owned_ids(&self, user_id: &str) -> AppResult<HashSet<Uuid>> {
        let owned = self.find_by_user(user_id).await?;
        Ok(owned.into_iter().map(|row| row.badge_id).collect())
    }

    /// 배치 지급. 이미 가진 배지는 무시되고, 실제로 새로 삽입된 행만 반환됩니다.
    pub async fn insert_new(&self, rows: &[NewUserBadge]) -> AppResult<Vec<UserBadge>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        self.client
            .upsert(Self::TABLE, rows, "user_id,badge_id", Resolution::IgnoreDuplicates)
            .await
    }
}
