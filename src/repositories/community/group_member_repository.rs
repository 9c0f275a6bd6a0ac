//! 그룹 멤버십 리포지토리 (`group_members`)

use uuid::Uuid;
use crate::core::errors::AppResult;
use crate::db::{PostgrestQuery, Resolution, SupabaseClient};
use crate::domain::entities::{GroupMember, NewGroupMember};
use crate::register_repository;

register_repository! {
    name = "group_member", table = "group_members",
    pub struct GroupMemberRepository {
        client: SupabaseClient,
    }
}

impl GroupMemberRepository {
    /// 가입. 이미 멤버면 `false`
    pub async fn join(&self, group_id: Uuid, user_id: &str) -> AppResult<bool> {
        let row = NewGroupMember { group_id, user_id: user_id.to_string() };
        let inserted: Vec<GroupMember> = self.client
            .upsert(Self::TABLE, &[row], "group_id,user_id", Resolution::IgnoreDuplicates)
            .await?;

        Ok(!inserted.is_empty())
    }

    /// 탈퇴. 멤버가 아니었으면 `false`
    pub async fn leave(&self, group_id: Uuid, user_id: &str) -> AppResult<bool> {
        let query = PostgrestQuery::new().eq("group_id", group_id).eq("user_id", user_id);
        Ok(self.client.delete(Self::TABLE, &query).await? > 0)
    }

    pub async fn count_for_group(&self, group_id: Uuid) -> AppResult<u64> {
        self.client.count(Self::TABLE, &PostgrestQuery::new().eq("group_id", group_id)).await
    }

    pub async fn count_by_user(&self, user_id: &str) -> AppResult<u64> {
        self.client.count(Self::TABLE, &PostgrestQuery::new().eq("user_id", user_id)).await
    }
}
