//! 그룹 리포지토리 (`groups`)

use uuid::Uuid;
use crate::core::errors::{AppError, AppResult};
use crate::db::{PostgrestQuery, SupabaseClient};
use crate::domain::entities::{Group, NewGroup};
use crate::register_repository;

register_repository! {
    name = "group", table = "groups",
    pub struct GroupRepository {
        client: SupabaseClient,
    }
}

#[derive(serde::Serialize)]
struct MemberCountPatch {
    member_count: i64,
}

impl GroupRepository {
    pub async fn insert(&self, group: &NewGroup) -> AppResult<Group> {
        let rows: Vec<Group> = self.client.insert(Self::TABLE, group).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::DatabaseError("그룹 저장 결과가 비어 있습니다".to_string()))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Group>> {
        self.client.select_one(Self::TABLE, &PostgrestQuery::new().eq("id", id)).await
    }

    /// 멤버 수 내림차순
    pub async fn list(&self, limit: usize, offset: usize) -> AppResult<Vec<Group>> {
        let query = PostgrestQuery::new()
            .order("member_count", false)
            .order("created_at", false)
            .limit(limit)
            .offset(offset);

        self.client.select(Self::TABLE, &query).await
    }

    pub async fn set_member_count(&self, id: Uuid, member_count: i64) -> AppResult<Option<Group>> {
        let rows: Vec<Group> = self.client
            .update(Self::TABLE, &PostgrestQuery::new().eq("id", id), &MemberCountPatch { member_count })
            .await?;

        Ok(rows.into_iter().next())
    }
}
