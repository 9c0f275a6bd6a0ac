//! 기간별 활동 요약

use std::collections::BTreeMap;
use chrono::{Duration, NaiveDate};
use crate::domain::dto::activities::{ActivitySummary, DailyTotal};
use crate::domain::entities::Activity;
use crate::domain::models::emissions::EmissionBreakdown;

pub const DEFAULT_SUMMARY_DAYS: u32 = 7;
pub const MAX_SUMMARY_DAYS: u32 = 365;

/// `today`로 끝나는 `days`일 구간 (양 끝 포함)
pub fn window_ending(today: NaiveDate, days: u32) -> (NaiveDate, NaiveDate) {
    let days = days.clamp(1, MAX_SUMMARY_DAYS);
    (today - Duration::days(i64::from(days) - 1), today)
}

/// 구간 안의 활동을 카테고리별/일별로 합산합니다. 구간 밖의 기록은 무시합니다.
pub fn summarize(activities: &[Activity], from: NaiveDate, to: NaiveDate) -> ActivitySummary {
    let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut totals = [0.0_f64; 5];

    for activity in activities
        .iter()
        .filter(|activity| activity.activity_date >= from && activity.activity_date <= to)
    {
        let emissions = &activity.emissions;
        totals[0] += emissions.transport_kg;
        totals[1] += emissions.electricity_kg;
        totals[2] += emissions.water_kg;
        totals[3] += emissions.food_kg;
        totals[4] += emissions.appliance_kg;

        *per_day.entry(activity.activity_date).or_insert(0.0) += emissions.total_kg;
    }

    let totals = EmissionBreakdown::from_parts(totals[0], totals[1], totals[2], totals[3], totals[4]);
    let logged_days = per_day.len() as u32;
    let daily_average_kg = if logged_days == 0 {
        0.0
    } else {
        totals.total_kg / f64::from(logged_days)
    };

    ActivitySummary {
        from,
        to,
        days: ((to - from).num_days() + 1).max(0) as u32,
        logged_days,
        totals,
        daily_average_kg,
        series: per_day
            .into_iter()
            .map(|(date, total_kg)| DailyTotal { date, total_kg })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;
    use crate::domain::models::emissions::ActivityInput;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn activity(day: u32, transport: f64, food: f64) -> Activity {
        Activity {
            id: Uuid::new_v4(),
            user_id: "user_1".to_string(),
            activity_date: date(day),
            input: ActivityInput::default(),
            emissions: EmissionBreakdown::from_parts(transport, 0.0, 0.0, food, 0.0),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_window_ending_is_inclusive() {
        assert_eq!(window_ending(date(7), 7), (date(1), date(7)));
        assert_eq!(window_ending(date(7), 0), (date(7), date(7)));
    }

    #[test]
    fn test_summary_totals_and_series() {
        let activities = vec![
            activity(1, 2.0, 1.0),
            activity(1, 1.0, 0.0),
            activity(3, 0.5, 1.5),
            activity(9, 100.0, 0.0),
        ];

        let summary = summarize(&activities, date(1), date(7));

        assert_eq!(summary.days, 7);
        assert_eq!(summary.logged_days, 2);
        assert_eq!(summary.totals.transport_kg, 3.5);
        assert_eq!(summary.totals.food_kg, 2.5);
        assert_eq!(summary.totals.total_kg, 6.0);
        assert_eq!(summary.daily_average_kg, 3.0);
        assert_eq!(
            summary.series,
            vec![
                DailyTotal { date: date(1), total_kg: 4.0 },
                DailyTotal { date: date(3), total_kg: 2.0 },
            ]
        );
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[], date(1), date(30));

        assert_eq!(summary.days, 30);
        assert_eq!(summary.logged_days, 0);
        assert_eq!(summary.daily_average_kg, 0.0);
        assert!(summary.totals.is_zero());
        assert!(summary.series.is_empty());
    }
}
