//! 게시글 피드와 그룹 멤버십
//!
//! `groups.member_count`는 가입/탈퇴마다 `group_members`를 다시 세어 저장합니다.

use std::sync::Arc;
use singleton_macro::service;
use uuid::Uuid;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::community::{CreateGroupRequest, CreatePostRequest, PostListQuery};
use crate::domain::dto::common::PageQuery;
use crate::domain::entities::{Group, NewGroup, NewPost, Post};
use crate::repositories::community::{GroupMemberRepository, GroupRepository, PostRepository};
use crate::utils::string_utils::clean_optional_string;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

#[service(name = "community")]
pub struct CommunityService {
    post_repo: Arc<PostRepository>,
    group_repo: Arc<GroupRepository>,
    group_member_repo: Arc<GroupMemberRepository>,
}

impl CommunityService {
    /// `group_id`가 없으면 전체 피드(그룹에 속하지 않은 게시글)
    pub async fn list_posts(&self, query: PostListQuery) -> AppResult<Vec<Post>> {
        let page = PageQuery { limit: query.limit, offset: query.offset };

        self.post_repo
            .list(query.group_id, page.limit_or(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE), page.offset())
            .await
    }

    pub async fn create_post(&self, user_id: &str, request: CreatePostRequest) -> AppResult<Post> {
        if let Some(group_id) = request.group_id {
            self.require_group(group_id).await?;
        }

        let post = self
            .post_repo
            .insert(&NewPost {
                user_id: user_id.to_string(),
                group_id: request.group_id,
                content: request.content.trim().to_string(),
                image_url: clean_optional_string(request.image_url),
            })
            .await?;

        log::info!("📝 게시글 작성: user={} post={}", user_id, post.id);
        Ok(post)
    }

    pub async fn delete_post(&self, user_id: &str, post_id: Uuid) -> AppResult<()> {
        if !self.post_repo.delete_owned(user_id, post_id).await? {
            return Err(AppError::NotFound("게시글을 찾을 수 없습니다".to_string()));
        }
        Ok(())
    }

    pub async fn list_groups(&self, page: PageQuery) -> AppResult<Vec<Group>> {
        self.group_repo
            .list(page.limit_or(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE), page.offset())
            .await
    }

    /// 그룹을 만들고 만든 사람을 첫 멤버로 등록합니다.
    pub async fn create_group(&self, user_id: &str, request: CreateGroupRequest) -> AppResult<Group> {
        let group = self
            .group_repo
            .insert(&NewGroup {
                name: request.name.trim().to_string(),
                description: clean_optional_string(request.description),
                created_by: user_id.to_string(),
                member_count: 0,
            })
            .await?;

        self.group_member_repo.join(group.id, user_id).await?;
        let group = self.recount(group.id).await?;

        log::info!("👥 그룹 생성: {} ({})", group.name, group.id);
        Ok(group)
    }

    pub async fn join_group(&self, user_id: &str, group_id: Uuid) -> AppResult<Group> {
        self.require_group(group_id).await?;

        if self.group_member_repo.join(group_id, user_id).await? {
            log::info!("➕ 그룹 가입: user={} group={}", user_id, group_id);
        }

        self.recount(group_id).await
    }

    pub async fn leave_group(&self, user_id: &str, group_id: Uuid) -> AppResult<Group> {
        self.require_group(group_id).await?;

        if !self.group_member_repo.leave(group_id, user_id).await? {
            return Err(AppError::NotFound("가입한 그룹이 아닙니다".to_string()));
        }

        self.recount(group_id).await
    }

    async fn require_group(&self, group_id: Uuid) -> AppResult<Group> {
        self.group_repo
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| AppError::NotFound("그룹을 찾을 수 없습니다".to_string()))
    }

    async fn recount(&self, group_id: Uuid) -> AppResult<Group> {
        let members = self.group_member_repo.count_for_group(group_id).await?;

        self.group_repo
            .set_member_count(group_id, i64::try_from(members).unwrap_or(i64::MAX))
            .await?
            .ok_or_else(|| AppError::NotFound("그룹을 찾을 수 없습니다".to_string()))
    }
}
