//! 연속 접속 응답 DTO

use chrono::NaiveDate;
use serde::Serialize;
use crate::domain::entities::Badge;

/// `GET /api/v1/streaks`, `POST /api/v1/streaks/check-in`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakStatus {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_check_in: Option<NaiveDate>,

    /// 오늘 이미 체크인했는지
    pub checked_in_today: bool,
}

/// `POST /api/v1/streaks/check-in`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckInResponse {
    #[serde(flatten)]
    pub status: StreakStatus,
    pub awarded_badges: Vec<Badge>,
}
