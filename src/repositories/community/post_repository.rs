//! 게시글 리포지토리 (`posts`)

use uuid::Uuid;
use crate::core::errors::{AppError, AppResult};
use crate::db::{PostgrestQuery, SupabaseClient};
use crate::domain::entities::{NewPost, Post};
use crate::register_repository;

register_repository! {
    name = "post", table = "posts",
    pub struct PostRepository {
        client: SupabaseClient,
    }
}

impl PostRepository {
    pub async fn insert(&self, post: &NewPost) -> AppResult<Post> {
        let rows: Vec<Post> = self.client.insert(Self::TABLE, post).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::DatabaseError("게시글 저장 결과가 비어 있습니다".to_string()))
    }

    /// 최신순 피드. `group_id`가 없으면 그룹에 속하지 않은 전체 피드
    pub async fn list(&self, group_id: Option<Uuid>, limit: usize, offset: usize) -> AppResult<Vec<Post>> {
        let query = match group_id {
            Some(group_id) => PostgrestQuery::new().eq("group_id", group_id),
            None => PostgrestQuery::new().is_null("group_id"),
        };

        let query = query
            .order("created_at", false)
            .limit(limit)
            .offset(offset);

        self.client.select(Self::TABLE, &query).await
    }

    pub async fn delete_owned(&self, user_id: &str, id: Uuid) -> AppResult<bool> {
        let query = PostgrestQuery::new().eq("id", id).eq("user_id", user_id);
        Ok(self.client.delete(Self::TABLE, &query).await? > 0)
    }

    pub async fn count_by_user(&self, user_id: &str) -> AppResult<u64> {
        self.client.count(Self::TABLE, &PostgrestQuery::new().eq("user_id", user_id)).await
    }
}
