//! 에코 팁 리포지토리 (`eco_tips`)

use crate::core::errors::{AppError, AppResult};
use crate::db::{PostgrestQuery, SupabaseClient};
use crate::domain::entities::{EcoTip, NewEcoTip};
use crate::register_repository;

register_repository! {
    name = "tip", table = "eco_tips",
    pub struct TipRepository {
        client: SupabaseClient,
    }
}

impl TipRepository {
    /// 등록 순 전체 목록. 일일 팁 순환의 기준 순서이기도 합니다.
    pub async fn find_all(&self) -> AppResult<Vec<EcoTip>> {
        let query = PostgrestQuery::new()
            .order("created_at", true)
            .order("id", true);

        self.client.select(Self::TABLE, &query).await
    }

    pub async fn find_by_category(&self, category: &str) -> AppResult<Vec<EcoTip>> {
        let query = PostgrestQuery::new()
            .ilike("category", category)
            .order("created_at", true);

        self.client.select(Self::TABLE, &query).await
    }

    pub async fn insert(&self, tip: &NewEcoTip) -> AppResult<EcoTip> {
        let rows: Vec<EcoTip> = self.client.insert(Self::TABLE, tip).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::DatabaseError("팁 저장 결과가 비어 있습니다".to_string()))
    }
}
