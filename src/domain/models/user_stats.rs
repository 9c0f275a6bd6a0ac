//! 배지 평가용 사용자 통계 스냅샷

use serde::{Deserialize, Serialize};
use crate::domain::entities::RequirementType;

/// 배지 평가 시점의 사용자 통계
///
/// 각 항목은 독립적인 count 쿼리 또는 프로필 컬럼에서 채워집니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub activities_logged: i64,
    pub bills_scanned: i64,
    pub posts_created: i64,
    pub groups_joined: i64,
    pub stories_shared: i64,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub karma_points: i64,
}

impl UserStats {
    /// 요구 조건이 가리키는 통계 값. 알 수 없는 조건이면 `None`
    pub fn value_of(&self, requirement: RequirementType) -> Option<i64> {
        match requirement {
            RequirementType::ActivitiesLogged => Some(self.activities_logged),
            RequirementType::BillsScanned => Some(self.bills_scanned),
            RequirementType::PostsCreated => Some(self.posts_created),
            RequirementType::GroupsJoined => Some(self.groups_joined),
            RequirementType::StoriesShared => Some(self.stories_shared),
            RequirementType::CurrentStreak => Some(self.current_streak),
            RequirementType::LongestStreak => Some(self.longest_streak),
            RequirementType::KarmaPoints => Some(self.karma_points),
            RequirementType::Unknown => None,
        }
    }
}
