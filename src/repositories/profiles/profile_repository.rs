//! 프로필 리포지토리 (`profiles`)
//!
//! 단건 조회와 리더보드는 Redis에 캐시하고, 프로필이 바뀌는 모든 쓰기 경로에서
//! 해당 캐시를 무효화합니다.

use crate::caching::redis::{keys, RedisClient};
use crate::config::CacheConfig;
use crate::core::errors::{AppError, AppResult};
use crate::db::{PostgrestQuery, Resolution, SupabaseClient};
use crate::domain::entities::{NewProfile, Profile, ProfilePatch};
use crate::register_repository;

/// Karma 낙관적 갱신 재시도 횟수
const KARMA_CAS_ATTEMPTS: usize = 3;

/// 캐시하는 리더보드 길이 (요청 가능한 최대 limit)
pub const LEADERBOARD_CAPACITY: usize = 100;

register_repository! {
    name = "profile", table = "profiles",
    pub struct ProfileRepository {
        client: SupabaseClient,
        redis: RedisClient,
    }
}

impl ProfileRepository {
    fn by_id(id: &str) -> PostgrestQuery {
        PostgrestQuery::new().eq("id", id)
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Profile>> {
        let cache_key = keys::public_profile(id);

        if let Ok(Some(cached)) = self.redis.get::<Profile>(&cache_key).await {
            return Ok(Some(cached));
        }

        let profile: Option<Profile> = self.client.select_one(Self::TABLE, &Self::by_id(id)).await?;

        if let Some(ref profile) = profile {
            let _ = self.redis
                .set_with_expiry(&cache_key, profile, CacheConfig::profile_ttl_secs())
                .await;
        }

        Ok(profile)
    }

    /// Clerk 신원 정보로 프로필을 생성하거나 이메일/이름/아바타를 동기화합니다.
    ///
    /// `id` 충돌 시 병합하므로 카운터 컬럼은 유지됩니다.
    pub async fn upsert_identity(&self, identity: &NewProfile) -> AppResult<Profile> {
        let rows: Vec<Profile> = self.client
            .upsert(Self::TABLE, identity, "id", Resolution::MergeDuplicates)
            .await?;

        self.invalidate(&identity.id).await;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::DatabaseError(format!("프로필 {} 업서트 결과가 비어 있습니다", identity.id)))
    }

    pub async fn update(&self, id: &str, patch: &ProfilePatch) -> AppResult<Option<Profile>> {
        let rows: Vec<Profile> = self.client.update(Self::TABLE, &Self::by_id(id), patch).await?;
        self.invalidate(id).await;

        Ok(rows.into_iter().next())
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let deleted = self.client.delete(Self::TABLE, &Self::by_id(id)).await?;
        self.invalidate(id).await;

        Ok(deleted > 0)
    }

    /// Karma Points를 `delta`만큼 더하고 새 잔액을 반환합니다.
    ///
    /// 읽은 값이 그대로일 때만 갱신하는 compare-and-set을 최대 3회 시도합니다.
    pub async fn add_karma(&self, id: &str, delta: i64) -> AppResult<i64> {
        if delta == 0 {
            return self.client
                .select_one::<Profile>(Self::TABLE, &Self::by_id(id))
                .await?
                .map(|profile| profile.karma_points)
                .ok_or_else(|| AppError::NotFound(format!("프로필 {}", id)));
        }

        for attempt in 1..=KARMA_CAS_ATTEMPTS {
            let current = self.client
                .select_one::<Profile>(Self::TABLE, &Self::by_id(id))
                .await?
                .ok_or_else(|| AppError::NotFound(format!("프로필 {}", id)))?
                .karma_points;

            let next = current.saturating_add(delta);
            let patch = ProfilePatch { karma_points: Some(next), ..Default::default() }.touched();
            let guarded = Self::by_id(id).eq("karma_points", current);

            let updated: Vec<Profile> = self.client.update(Self::TABLE, &guarded, &patch).await?;
            if !updated.is_empty() {
                self.invalidate(id).await;
                return Ok(next);
            }

            log::debug!("Karma 갱신 충돌 (사용자 {}, 시도 {}/{})", id, attempt, KARMA_CAS_ATTEMPTS);
        }

        Err(AppError::ConflictError(format!(
            "Karma 갱신이 동시 수정과 {}회 연속 충돌했습니다",
            KARMA_CAS_ATTEMPTS
        )))
    }

    pub async fn set_streaks(&self, id: &str, current: i32, longest: i32) -> AppResult<()> {
        let patch = ProfilePatch {
            current_streak: Some(current),
            longest_streak: Some(longest),
            ..Default::default()
        }
        .touched();

        self.client.update::<_, Profile>(Self::TABLE, &Self::by_id(id), &patch).await?;
        self.invalidate(id).await;
        Ok(())
    }

    /// Karma 내림차순 상위 프로필 (동점은 먼저 가입한 순)
    ///
    /// limit과 무관하게 상위 [`LEADERBOARD_CAPACITY`]명을 한 키에 캐시하고 앞부분만 반환합니다.
    pub async fn top_by_karma(&self, limit: usize) -> AppResult<Vec<Profile>> {
        let cache_key = keys::leaderboard();

        if let Ok(Some(cached)) = self.redis.get::<Vec<Profile>>(&cache_key).await {
            return Ok(leaderboard_head(cached, limit));
        }

        let query = PostgrestQuery::new()
            .order("karma_points", false)
            .order("created_at", true)
            .limit(LEADERBOARD_CAPACITY);
        let profiles: Vec<Profile> = self.client.select(Self::TABLE, &query).await?;

        let _ = self.redis
            .set_with_expiry(&cache_key, &profiles, CacheConfig::leaderboard_ttl_secs())
            .await;

        Ok(leaderboard_head(profiles, limit))
    }

    /// 이메일이 있는 전체 프로필 (공지 메일 발송용)
    pub async fn find_all_with_email(&self) -> AppResult<Vec<Profile>> {
        let query = PostgrestQuery::new()
            .neq("email", "")
            .order("created_at", true);

        let profiles: Vec<Profile> = self.client.select(Self::TABLE, &query).await?;
        Ok(profiles.into_iter().filter(|profile| profile.email.is_some()).collect())
    }

    async fn invalidate(&self, id: &str) {
        if let Err(e) = self.redis.del_multiple(&stale_keys(id)).await {
            log::warn!("프로필 캐시 무효화 실패 ({}): {}", id, e);
        }
    }
}

/// 프로필이 바뀔 때 지워야 하는 캐시 키
fn stale_keys(id: &str) -> Vec<String> {
    vec![keys::leaderboard(), keys::public_profile(id)]
}

fn leaderboard_head(mut profiles: Vec<Profile>, limit: usize) -> Vec<Profile> {
    profiles.truncate(limit.min(LEADERBOARD_CAPACITY));
    profiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(n: usize) -> Profile {
        Profile {
            id: format!("user_{}", n),
            email: None,
            display_name: None,
            avatar_url: None,
            bio: None,
            location: None,
            karma_points: (LEADERBOARD_CAPACITY - n) as i64,
            current_streak: 0,
            longest_streak: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_every_limit_is_served_from_the_invalidated_key() {
        let cached: Vec<Profile> = (0..LEADERBOARD_CAPACITY).map(profile).collect();
        let stale = stale_keys("user_7");

        assert!(stale.contains(&keys::leaderboard()));
        assert!(stale.contains(&keys::public_profile("user_7")));

        for limit in 1..=LEADERBOARD_CAPACITY {
            let head = leaderboard_head(cached.clone(), limit);
            assert_eq!(head.len(), limit);
            assert_eq!(head[0].id, "user_0");
        }
    }

    #[test]
    fn test_leaderboard_head_handles_short_lists() {
        let head = leaderboard_head(vec![profile(0), profile(1)], 10);
        assert_eq!(head.len(), 2);
        assert!(leaderboard_head(Vec::new(), 10).is_empty());
    }
}
