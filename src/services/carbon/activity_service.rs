//! 일일 활동 기록 서비스
//!
//! 입력 검증 → 배출량 계산 → `activities` 저장까지를 담당합니다.
//! 배지 확인은 서비스 간 의존을 두지 않기 위해 핸들러에서 이어서 호출합니다.

use std::sync::Arc;
use chrono::{Duration, NaiveDate, Utc};
use singleton_macro::service;
use uuid::Uuid;
use crate::config::EmissionConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::activities::{ActivityRangeQuery, ActivitySummary, LogActivityRequest};
use crate::domain::entities::{Activity, NewActivity};
use crate::domain::models::emissions::{ActivityInput, EmissionBreakdown};
use crate::repositories::activities::ActivityRepository;
use super::calculator;
use super::summary::{self, DEFAULT_SUMMARY_DAYS};

/// 조회 기간 기본값 (일)
pub const DEFAULT_RANGE_DAYS: i64 = 30;
/// 한 번에 조회할 수 있는 최대 기간 (일)
pub const MAX_RANGE_DAYS: i64 = 366;

#[service(name = "activity")]
pub struct ActivityService {
    activity_repo: Arc<ActivityRepository>,
}

impl ActivityService {
    /// 저장 없이 배출량만 계산합니다.
    pub fn preview(&self, input: &ActivityInput) -> AppResult<EmissionBreakdown> {
        input.check()?;
        Ok(calculator::calculate(input, &EmissionConfig::factors()))
    }

    /// 배출량을 계산해 저장합니다. 미래 날짜는 거부합니다.
    pub async fn log(&self, user_id: &str, request: LogActivityRequest) -> AppResult<Activity> {
        request.input.check()?;

        let today = Utc::now().date_naive();
        let activity_date = request.activity_date.unwrap_or(today);
        if activity_date > today {
            return Err(AppError::ValidationError(
                "미래 날짜의 활동은 기록할 수 없습니다".to_string(),
            ));
        }

        let emissions = calculator::calculate(&request.input, &EmissionConfig::factors());
        let activity = self
            .activity_repo
            .insert(&NewActivity {
                user_id: user_id.to_string(),
                activity_date,
                input: request.input,
                emissions,
            })
            .await?;

        log::info!(
            "🌱 활동 기록: user={} date={} total={:.2}kg",
            user_id,
            activity_date,
            emissions.total_kg
        );

        Ok(activity)
    }

    pub async fn list(&self, user_id: &str, range: ActivityRangeQuery) -> AppResult<Vec<Activity>> {
        let (from, to) = resolve_range(range, Utc::now().date_naive())?;
        self.activity_repo.find_between(user_id, from, to).await
    }

    pub async fn summary(&self, user_id: &str, days: Option<u32>) -> AppResult<ActivitySummary> {
        let (from, to) = summary::window_ending(
            Utc::now().date_naive(),
            days.unwrap_or(DEFAULT_SUMMARY_DAYS),
        );
        let activities = self.activity_repo.find_between(user_id, from, to).await?;

        Ok(summary::summarize(&activities, from, to))
    }

    pub async fn delete(&self, user_id: &str, id: Uuid) -> AppResult<()> {
        if !self.activity_repo.delete_owned(user_id, id).await? {
            return Err(AppError::NotFound("활동 기록을 찾을 수 없습니다".to_string()));
        }

        log::info!("🗑️ 활동 삭제: user={} id={}", user_id, id);
        Ok(())
    }
}

/// 조회 구간을 정합니다. 생략 시 `to`는 오늘, `from`은 `to` 기준 30일 전입니다.
fn resolve_range(range: ActivityRangeQuery, today: NaiveDate) -> AppResult<(NaiveDate, NaiveDate)> {
    let to = range.to.unwrap_or(today);
    let from = match range.from {
        Some(from) => from,
        None => to
            .checked_sub_signed(Duration::days(DEFAULT_RANGE_DAYS - 1))
            .ok_or_else(|| AppError::ValidationError("조회 종료일이 범위를 벗어났습니다".to_string()))?,
    };

    if from > to {
        return Err(AppError::ValidationError(
            "from은 to보다 늦을 수 없습니다".to_string(),
        ));
    }
    if (to - from).num_days() + 1 > MAX_RANGE_DAYS {
        return Err(AppError::ValidationError(format!(
            "조회 기간은 최대 {}일입니다",
            MAX_RANGE_DAYS
        )));
    }

    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_range_is_last_thirty_days() {
        let today = date(2024, 3, 31);
        let (from, to) = resolve_range(ActivityRangeQuery::default(), today).unwrap();

        assert_eq!(to, today);
        assert_eq!(from, date(2024, 3, 2));
    }

    #[test]
    fn test_explicit_range_is_kept() {
        let range = ActivityRangeQuery { from: Some(date(2024, 1, 1)), to: Some(date(2024, 1, 31)) };
        assert_eq!(
            resolve_range(range, date(2024, 6, 1)).unwrap(),
            (date(2024, 1, 1), date(2024, 1, 31))
        );
    }

    #[test]
    fn test_inverted_or_oversized_range_is_rejected() {
        let inverted = ActivityRangeQuery { from: Some(date(2024, 2, 1)), to: Some(date(2024, 1, 1)) };
        assert!(matches!(
            resolve_range(inverted, date(2024, 6, 1)),
            Err(AppError::ValidationError(_))
        ));

        let oversized = ActivityRangeQuery { from: Some(date(2022, 1, 1)), to: Some(date(2024, 1, 1)) };
        assert!(resolve_range(oversized, date(2024, 6, 1)).is_err());

        // 윤년 한 해 전체(366일)는 허용
        let leap_year = ActivityRangeQuery { from: Some(date(2024, 1, 1)), to: Some(date(2024, 12, 31)) };
        assert!(resolve_range(leap_year, date(2025, 1, 1)).is_ok());
    }

    #[test]
    fn test_default_from_near_minimum_date_is_rejected() {
        let to = NaiveDate::MIN + Duration::days(5);
        let range = ActivityRangeQuery { from: None, to: Some(to) };

        assert!(matches!(
            resolve_range(range, date(2024, 6, 1)),
            Err(AppError::ValidationError(_))
        ));

        let explicit = ActivityRangeQuery { from: Some(NaiveDate::MIN), to: Some(to) };
        assert_eq!(resolve_range(explicit, date(2024, 6, 1)).unwrap(), (NaiveDate::MIN, to));
    }
}
