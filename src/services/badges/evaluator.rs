//! 배지 획득 판정
//!
//! 카탈로그 중 아직 없는 배지 가운데, 조건이 가리키는 통계가 요구값 **이상**인
//! 배지를 고릅니다. 알 수 없는 조건의 배지는 고르지 않습니다.

use std::collections::HashSet;
use uuid::Uuid;
use crate::domain::entities::{Badge, UserBadge};
use crate::domain::models::UserStats;

/// 새로 획득할 배지 목록 (카탈로그 순서 유지)
pub fn evaluate<'a>(catalogue: &'a [Badge], owned: &HashSet<Uuid>, stats: &UserStats) -> Vec<&'a Badge> {
    catalogue
        .iter()
        .filter(|badge| !owned.contains(&badge.id))
        .filter(|badge| {
            stats
                .value_of(badge.requirement_type)
                .is_some_and(|value| value >= badge.requirement_value)
        })
        .collect()
}

/// 삽입 결과에 실제로 들어 있는 후보만 남깁니다.
///
/// 다른 요청이 먼저 삽입한 배지는 upsert 결과에 없으므로 여기서 빠집니다.
pub fn actually_inserted(candidates: Vec<&Badge>, inserted: &[UserBadge]) -> Vec<Badge> {
    let inserted_ids: HashSet<Uuid> = inserted.iter().map(|row| row.badge_id).collect();

    candidates
        .into_iter()
        .filter(|badge| inserted_ids.contains(&badge.id))
        .cloned()
        .collect()
}

pub fn total_points<'a>(badges: impl IntoIterator<Item = &'a Badge>) -> i64 {
    badges.into_iter().map(|badge| badge.points).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::domain::entities::RequirementType;

    fn badge(requirement_type: RequirementType, requirement_value: i64, points: i64) -> Badge {
        Badge {
            id: Uuid::new_v4(),
            name: format!("{:?} {}", requirement_type, requirement_value),
            description: None,
            icon: None,
            requirement_type,
            requirement_value,
            points,
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let catalogue = vec![badge(RequirementType::ActivitiesLogged, 5, 10)];
        let owned = HashSet::new();

        let below = UserStats { activities_logged: 4, ..Default::default() };
        let at = UserStats { activities_logged: 5, ..Default::default() };

        assert!(evaluate(&catalogue, &owned, &below).is_empty());
        assert_eq!(evaluate(&catalogue, &owned, &at).len(), 1);
    }

    #[test]
    fn test_owned_badges_are_skipped() {
        let catalogue = vec![
            badge(RequirementType::CurrentStreak, 3, 15),
            badge(RequirementType::CurrentStreak, 7, 30),
        ];
        let owned = HashSet::from([catalogue[0].id]);
        let stats = UserStats { current_streak: 10, ..Default::default() };

        let awarded = evaluate(&catalogue, &owned, &stats);

        assert_eq!(awarded.len(), 1);
        assert_eq!(awarded[0].id, catalogue[1].id);
    }

    #[test]
    fn test_unknown_requirement_is_never_awarded() {
        let catalogue = vec![badge(RequirementType::Unknown, 0, 100)];
        let stats = UserStats { karma_points: i64::MAX, ..Default::default() };

        assert!(evaluate(&catalogue, &HashSet::new(), &stats).is_empty());
    }

    #[test]
    fn test_total_points() {
        let catalogue = vec![
            badge(RequirementType::PostsCreated, 1, 5),
            badge(RequirementType::GroupsJoined, 1, 20),
        ];
        let stats = UserStats { posts_created: 1, groups_joined: 2, ..Default::default() };

        let awarded = evaluate(&catalogue, &HashSet::new(), &stats);

        assert_eq!(total_points(awarded), 25);
        assert_eq!(total_points(Vec::<&Badge>::new()), 0);
    }

    #[test]
    fn test_badge_inserted_by_concurrent_request_earns_nothing() {
        let catalogue = vec![
            badge(RequirementType::ActivitiesLogged, 1, 10),
            badge(RequirementType::ActivitiesLogged, 5, 40),
        ];
        let stats = UserStats { activities_logged: 5, ..Default::default() };
        let candidates = evaluate(&catalogue, &HashSet::new(), &stats);
        assert_eq!(candidates.len(), 2);

        // 첫 번째 배지는 다른 요청이 이미 삽입해 upsert 결과에 없음
        let inserted = vec![UserBadge {
            user_id: "user_1".to_string(),
            badge_id: catalogue[1].id,
            earned_at: Utc::now(),
        }];

        let awarded = actually_inserted(candidates, &inserted);

        assert_eq!(awarded.len(), 1);
        assert_eq!(awarded[0].id, catalogue[1].id);
        assert_eq!(total_points(&awarded), 40);
    }

    #[test]
    fn test_nothing_inserted_awards_nothing() {
        let catalogue = vec![badge(RequirementType::PostsCreated, 1, 5)];
        let stats = UserStats { posts_created: 3, ..Default::default() };
        let candidates = evaluate(&catalogue, &HashSet::new(), &stats);

        assert!(actually_inserted(candidates, &[]).is_empty());
    }
}
