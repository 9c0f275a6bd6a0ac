//! 배지 응답 DTO

use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::entities::Badge;

/// 획득한 배지와 획득 시각
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarnedBadge {
    #[serde(flatten)]
    pub badge: Badge,
    pub earned_at: DateTime<Utc>,
}

/// `POST /api/v1/badges/check`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BadgeAward {
    /// 이번 확인으로 새로 지급된 배지
    pub awarded: Vec<Badge>,
    pub points_awarded: i64,

    /// 지급 후 잔액. 지급이 없으면 `None`
    pub karma_points: Option<i64>,
}

impl BadgeAward {
    pub fn is_empty(&self) -> bool {
        self.awarded.is_empty()
    }
}
