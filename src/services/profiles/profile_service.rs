//! 프로필 서비스
//!
//! 프로필 행은 보통 Clerk `user.created` 웹훅으로 만들어지지만, 웹훅이 늦거나
//! 유실된 경우 첫 `/me` 요청에서 Clerk API로 신원을 조회해 생성합니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::clients::ClerkClient;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::profiles::{PublicProfileResponse, UpdateProfileRequest};
use crate::domain::entities::{NewProfile, Profile};
use crate::repositories::profiles::ProfileRepository;

#[service(name = "profile")]
pub struct ProfileService {
    profile_repo: Arc<ProfileRepository>,
    clerk: Arc<ClerkClient>,
}

impl ProfileService {
    /// 본인 프로필. 없으면 Clerk에서 신원을 가져와 생성합니다.
    pub async fn get_or_provision(&self, user_id: &str) -> AppResult<Profile> {
        if let Some(profile) = self.profile_repo.find_by_id(user_id).await? {
            return Ok(profile);
        }

        log::info!("👤 프로필 없음, Clerk에서 생성: {}", user_id);
        let clerk_user = self.clerk.get_user(user_id).await?;
        self.profile_repo.upsert_identity(&clerk_user.to_new_profile()).await
    }

    pub async fn update(&self, user_id: &str, request: UpdateProfileRequest) -> AppResult<Profile> {
        let patch = request.into_patch();
        if patch.is_empty() {
            return self.get_or_provision(user_id).await;
        }

        // 행이 없으면 먼저 만들어 두고 수정
        self.get_or_provision(user_id).await?;

        self.profile_repo
            .update(user_id, &patch.touched())
            .await?
            .ok_or_else(|| AppError::NotFound("프로필을 찾을 수 없습니다".to_string()))
    }

    /// 계정 삭제: Clerk 사용자를 먼저 지우고, 프로필 행을 지웁니다.
    ///
    /// Clerk 삭제가 성공하면 `user.deleted` 웹훅도 오지만, 여기서 바로 지워
    /// 응답 직후의 조회에도 프로필이 남지 않게 합니다.
    pub async fn delete_account(&self, user_id: &str) -> AppResult<()> {
        self.clerk.delete_user(user_id).await?;
        self.profile_repo.delete(user_id).await?;

        log::info!("🗑️ 계정 삭제 완료: {}", user_id);
        Ok(())
    }

    pub async fn public_profile(&self, user_id: &str) -> AppResult<PublicProfileResponse> {
        self.profile_repo
            .find_by_id(user_id)
            .await?
            .map(PublicProfileResponse::from)
            .ok_or_else(|| AppError::NotFound("프로필을 찾을 수 없습니다".to_string()))
    }

    /// 웹훅 `user.created` / `user.updated`: 신원 필드만 병합합니다.
    pub async fn sync_identity(&self, identity: &NewProfile) -> AppResult<Profile> {
        let profile = self.profile_repo.upsert_identity(identity).await?;
        log::info!("🔄 프로필 동기화: {}", profile.id);
        Ok(profile)
    }

    /// 웹훅 `user.deleted`. 이미 없으면 `false`
    pub async fn remove(&self, user_id: &str) -> AppResult<bool> {
        let removed = self.profile_repo.delete(user_id).await?;
        if removed {
            log::info!("🗑️ 프로필 삭제 (웹훅): {}", user_id);
        }
        Ok(removed)
    }
}
