//! 배지 지급 서비스
//!
//! 1. 카탈로그, 보유 배지, 통계를 동시에 조회
//! 2. [`evaluator::evaluate`]로 새 배지 선별
//! 3. `user_badges` 배치 삽입 (중복 무시)
//! 4. 실제로 삽입된 배지의 포인트 합을 Karma에 적립
//!
//! 동시에 두 요청이 같은 배지를 판정해도 유니크 제약 때문에 한쪽만 행을 돌려받으므로
//! 포인트는 한 번만 적립됩니다.

use std::collections::HashMap;
use std::sync::Arc;
use futures_util::try_join;
use singleton_macro::service;
use uuid::Uuid;
use crate::core::errors::AppResult;
use crate::domain::dto::badges::{BadgeAward, EarnedBadge};
use crate::domain::entities::{Badge, NewUserBadge};
use crate::domain::models::UserStats;
use crate::repositories::activities::ActivityRepository;
use crate::repositories::badges::{BadgeRepository, UserBadgeRepository};
use crate::repositories::bills::BillRepository;
use crate::repositories::community::{GroupMemberRepository, PostRepository};
use crate::repositories::content::StoryRepository;
use crate::repositories::profiles::ProfileRepository;
use super::evaluator;

#[service(name = "badge")]
pub struct BadgeService {
    badge_repo: Arc<BadgeRepository>,
    user_badge_repo: Arc<UserBadgeRepository>,
    profile_repo: Arc<ProfileRepository>,
    activity_repo: Arc<ActivityRepository>,
    bill_repo: Arc<BillRepository>,
    post_repo: Arc<PostRepository>,
    group_member_repo: Arc<GroupMemberRepository>,
    story_repo: Arc<StoryRepository>,
}

impl BadgeService {
    pub async fn catalogue(&self) -> AppResult<Vec<Badge>> {
        self.badge_repo.find_all().await
    }

    /// 획득한 배지 (최근 획득순)
    pub async fn earned(&self, user_id: &str) -> AppResult<Vec<EarnedBadge>> {
        let (catalogue, owned) = try_join!(
            self.badge_repo.find_all(),
            self.user_badge_repo.find_by_user(user_id),
        )?;

        let by_id: HashMap<Uuid, Badge> = catalogue
            .into_iter()
            .map(|badge| (badge.id, badge))
            .collect();

        Ok(owned
            .into_iter()
            .filter_map(|row| {
                by_id.get(&row.badge_id).map(|badge| EarnedBadge {
                    badge: badge.clone(),
                    earned_at: row.earned_at,
                })
            })
            .collect())
    }

    /// 통계 스냅샷. 각 count 쿼리는 서로 독립이므로 동시에 실행합니다.
    pub async fn gather_stats(&self, user_id: &str) -> AppResult<UserStats> {
        let (profile, activities, bills, posts, groups, stories) = try_join!(
            self.profile_repo.find_by_id(user_id),
            self.activity_repo.count_by_user(user_id),
            self.bill_repo.count_by_user(user_id),
            self.post_repo.count_by_user(user_id),
            self.group_member_repo.count_by_user(user_id),
            self.story_repo.count_by_user(user_id),
        )?;

        let (current_streak, longest_streak, karma_points) = profile
            .map(|p| (i64::from(p.current_streak), i64::from(p.longest_streak), p.karma_points))
            .unwrap_or_default();

        Ok(UserStats {
            activities_logged: to_i64(activities),
            bills_scanned: to_i64(bills),
            posts_created: to_i64(posts),
            groups_joined: to_i64(groups),
            stories_shared: to_i64(stories),
            current_streak,
            longest_streak,
            karma_points,
        })
    }

    /// 새로 조건을 만족한 배지를 지급하고 포인트를 적립합니다.
    pub async fn check_and_award(&self, user_id: &str) -> AppResult<BadgeAward> {
        let (catalogue, owned, stats) = try_join!(
            self.badge_repo.find_all(),
            self.user_badge_repo.find_owned_ids(user_id),
            self.gather_stats(user_id),
        )?;

        let candidates = evaluator::evaluate(&catalogue, &owned, &stats);
        if candidates.is_empty() {
            return Ok(BadgeAward::default());
        }

        let rows: Vec<NewUserBadge> = candidates
            .iter()
            .map(|badge| NewUserBadge { user_id: user_id.to_string(), badge_id: badge.id })
            .collect();
        let inserted = self.user_badge_repo.insert_new(&rows).await?;

        let awarded = evaluator::actually_inserted(candidates, &inserted);
        if awarded.is_empty() {
            return Ok(BadgeAward::default());
        }

        let points_awarded = evaluator::total_points(&awarded);
        let karma_points = if points_awarded > 0 {
            Some(self.profile_repo.add_karma(user_id, points_awarded).await?)
        } else {
            None
        };

        log::info!(
            "🏅 배지 지급: user={} badges={} points={}",
            user_id,
            awarded.len(),
            points_awarded
        );

        Ok(BadgeAward { awarded, points_awarded, karma_points })
    }

    /// 다른 요청 끝에 붙는 배지 확인. 실패해도 원래 요청은 성공으로 두고 로그만 남깁니다.
    pub async fn award_quietly(&self, user_id: &str) -> Vec<Badge> {
        match self.check_and_award(user_id).await {
            Ok(award) => award.awarded,
            Err(e) => {
                log::warn!("⚠️ 배지 확인 실패 (요청은 계속 진행): user={} error={}", user_id, e);
                Vec::new()
            }
        }
    }
}

fn to_i64(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
