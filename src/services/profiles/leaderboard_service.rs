//! Karma 리더보드

use std::sync::Arc;
use singleton_macro::service;
use crate::core::errors::AppResult;
use crate::domain::dto::profiles::LeaderboardEntry;
use crate::domain::entities::Profile;
use crate::repositories::profiles::profile_repository::LEADERBOARD_CAPACITY;
use crate::repositories::profiles::ProfileRepository;

pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;
pub const MAX_LEADERBOARD_SIZE: usize = LEADERBOARD_CAPACITY;

#[service(name = "leaderboard")]
pub struct LeaderboardService {
    profile_repo: Arc<ProfileRepository>,
}

impl LeaderboardService {
    pub async fn top(&self, limit: Option<usize>) -> AppResult<Vec<LeaderboardEntry>> {
        let limit = limit
            .unwrap_or(DEFAULT_LEADERBOARD_SIZE)
            .clamp(1, MAX_LEADERBOARD_SIZE);

        let profiles = self.profile_repo.top_by_karma(limit).await?;
        Ok(rank(profiles))
    }
}

/// 이미 정렬된 프로필에 1부터 순위를 매깁니다. 같은 점수는 같은 순위(1, 1, 3)입니다.
fn rank(profiles: Vec<Profile>) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(profiles.len());

    for (index, profile) in profiles.into_iter().enumerate() {
        let rank = match entries.last() {
            Some(prev) if prev.karma_points == profile.karma_points => prev.rank,
            _ => index + 1,
        };

        entries.push(LeaderboardEntry {
            rank,
            display_name: profile.public_name(),
            user_id: profile.id,
            avatar_url: profile.avatar_url,
            karma_points: profile.karma_points,
            current_streak: profile.current_streak,
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(id: &str, karma_points: i64) -> Profile {
        Profile {
            id: id.to_string(),
            email: Some(format!("{}@relief.eco", id)),
            display_name: None,
            avatar_url: None,
            bio: None,
            location: None,
            karma_points,
            current_streak: 0,
            longest_streak: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_rank_shares_positions_on_ties() {
        let entries = rank(vec![
            profile("asha", 120),
            profile("ben", 120),
            profile("chen", 80),
            profile("dev", 10),
        ]);

        let ranks: Vec<usize> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 1, 3, 4]);
        assert_eq!(entries[0].display_name, "asha");
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(Vec::new()).is_empty());
    }
}
