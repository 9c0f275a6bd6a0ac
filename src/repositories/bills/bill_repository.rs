//! 고지서 리포지토리 (`bills`)

use crate::core::errors::{AppError, AppResult};
use crate::db::{PostgrestQuery, SupabaseClient};
use crate::domain::entities::{Bill, NewBill};
use crate::register_repository;

register_repository! {
    name = "bill", table = "bills",
    pub struct BillRepository {
        client: SupabaseClient,
    }
}

impl BillRepository {
    pub async fn insert(&self, bill: &NewBill) -> AppResult<Bill> {
        let rows: Vec<Bill> = self.client.insert(Self::TABLE, bill).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::DatabaseError("고지서 저장 결과가 비어 있습니다".to_string()))
    }

    /// 최신순 목록. `limit`이 `None`이면 전체
    pub async fn find_by_user(&self, user_id: &str, limit: Option<usize>, offset: usize) -> AppResult<Vec<Bill>> {
        let mut query = PostgrestQuery::new()
            .eq("user_id", user_id)
            .order("created_at", false)
            .offset(offset);

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        self.client.select(Self::TABLE, &query).await
    }

    pub async fn count_by_user(&self, user_id: &str) -> AppResult<u64> {
        self.client.count(Self::TABLE, &PostgrestQuery::new().eq("user_id", user_id)).await
    }
}
