//! 배지 카탈로그 리포지토리 (`badges`)

use crate::core::errors::AppResult;
use crate::db::{PostgrestQuery, SupabaseClient};
use crate::domain::entities::Badge;
use crate::register_repository;

register_repository! {
    name = "badge", table = "badges",
    pub struct BadgeRepository {
        client: SupabaseClient,
    }
}

impl BadgeRepository {
    /// 전체 카탈로그 (요구 조건 종류, 기준값 순)
    pub async fn find_all(&self) -> AppResult<Vec<Badge>> {
        let query = PostgrestQuery::new()
            .order("requirement_type", true)
            .order("requirement_value", true);

        self.client.select(Self::TABLE, &query).await
    }
}
