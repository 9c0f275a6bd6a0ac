//! 일일 체크인과 연속 접속 상태

use std::sync::Arc;
use chrono::{NaiveDate, Utc};
use singleton_macro::service;
use crate::core::errors::AppResult;
use crate::domain::dto::streaks::StreakStatus;
use crate::repositories::profiles::ProfileRepository;
use crate::repositories::streaks::LoginHistoryRepository;
use super::streak_calculator;

#[service(name = "streak")]
pub struct StreakService {
    login_history_repo: Arc<LoginHistoryRepository>,
    profile_repo: Arc<ProfileRepository>,
}

impl StreakService {
    /// 읽기 전용 조회. 기록을 남기지 않습니다.
    pub async fn status(&self, user_id: &str) -> AppResult<StreakStatus> {
        let dates = self.login_history_repo.find_dates(user_id).await?;
        Ok(build_status(&dates, Utc::now().date_naive()))
    }

    /// 오늘 접속을 기록하고 (하루 한 번만 저장) 프로필의 연속일을 갱신합니다.
    pub async fn check_in(&self, user_id: &str) -> AppResult<StreakStatus> {
        let today = Utc::now().date_naive();
        let first_today = self.login_history_repo.record(user_id, today).await?;

        let dates = self.login_history_repo.find_dates(user_id).await?;
        let status = build_status(&dates, today);

        self.profile_repo
            .set_streaks(
                user_id,
                i32::try_from(status.current_streak).unwrap_or(i32::MAX),
                i32::try_from(status.longest_streak).unwrap_or(i32::MAX),
            )
            .await?;

        if first_today {
            log::info!("🔥 체크인: user={} streak={}", user_id, status.current_streak);
        }

        Ok(status)
    }
}

fn build_status(dates: &[NaiveDate], today: NaiveDate) -> StreakStatus {
    let current_streak = streak_calculator::active_streak(dates, today);

    StreakStatus {
        current_streak,
        longest_streak: streak_calculator::longest_streak(dates).max(current_streak),
        last_check_in: dates.iter().copied().filter(|date| *date <= today).max(),
        checked_in_today: dates.contains(&today),
    }
}
