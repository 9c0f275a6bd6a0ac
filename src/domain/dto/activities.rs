//! 활동 기록 요청/응답 DTO

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::domain::entities::{Activity, Badge};
use crate::domain::models::emissions::{ActivityInput, EmissionBreakdown};

/// `POST /api/v1/activities`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogActivityRequest {
    /// 기록 날짜 (생략 시 오늘, UTC)
    #[serde(default)]
    pub activity_date: Option<NaiveDate>,

    #[serde(default)]
    pub input: ActivityInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogActivityResponse {
    pub activity: Activity,

    /// 이번 기록으로 새로 획득한 배지
    pub awarded_badges: Vec<Badge>,
}

/// `GET /api/v1/activities?from=&to=`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ActivityRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// `GET /api/v1/activities/summary?days=`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SummaryQuery {
    pub days: Option<u32>,
}

/// 하루 합계
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_kg: f64,
}

/// 기간 요약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub from: NaiveDate,
    pub to: NaiveDate,

    /// 기간 일수 (양 끝 포함)
    pub days: u32,

    /// 기록이 있는 날 수
    pub logged_days: u32,

    /// 카테고리별 기간 합계
    pub totals: EmissionBreakdown,

    /// 기록이 있는 날 기준 하루 평균
    pub daily_average_kg: f64,

    /// 날짜 오름차순, 기록이 있는 날만 포함
    pub series: Vec<DailyTotal>,
}
