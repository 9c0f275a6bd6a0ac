//! 일일 활동 기록 엔티티 (`activities` 테이블)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::models::emissions::{ActivityInput, EmissionBreakdown};

/// 저장된 활동 기록
///
/// 입력값은 `input` jsonb 컬럼에 그대로 보존하고,
/// 카테고리별 배출량은 개별 컬럼으로 펼쳐 저장합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub user_id: String,
    pub activity_date: NaiveDate,

    #[serde(default)]
    pub input: ActivityInput,

    #[serde(flatten)]
    pub emissions: EmissionBreakdown,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewActivity {
    pub user_id: String,
    pub activity_date: NaiveDate,
    pub input: ActivityInput,

    #[serde(flatten)]
    pub emissions: EmissionBreakdown,
}

/// CSV 내보내기 행
#[derive(Debug, Clone, Serialize)]
pub struct ActivityCsvRow {
    pub date: NaiveDate,
    pub transport_kg: f64,
    pub electricity_kg: f64,
    pub water_kg: f64,
    pub food_kg: f64,
    pub appliance_kg: f64,
    pub total_kg: f64,
}

impl From<&Activity> for ActivityCsvRow {
    fn from(activity: &Activity) -> Self {
        Self {
            date: activity.activity_date,
            transport_kg: activity.emissions.transport_kg,
            electricity_kg: activity.emissions.electricity_kg,
            water_kg: activity.emissions.water_kg,
            food_kg: activity.emissions.food_kg,
            appliance_kg: activity.emissions.appliance_kg,
            total_kg: activity.emissions.total_kg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_row_flattens_breakdown_columns() {
        let json = r#"{
            "id": "7a4a3c1e-1f7e-4f43-9a51-4f1b2f9c0d11",
            "user_id": "user_1",
            "activity_date": "2024-03-02",
            "input": {"meals": 2, "diet": "vegan"},
            "transport_kg": 1.0,
            "electricity_kg": 2.0,
            "water_kg": 0.5,
            "food_kg": 1.0,
            "appliance_kg": 0.0,
            "total_kg": 4.5,
            "created_at": "2024-03-02T08:00:00+00:00"
        }"#;

        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.emissions.total_kg, 4.5);
        assert_eq!(activity.input.meals, 2);

        let row = ActivityCsvRow::from(&activity);
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(row.electricity_kg, 2.0);
    }

    #[test]
    fn test_new_activity_serializes_flat_columns() {
        let new = NewActivity {
            user_id: "user_1".to_string(),
            activity_date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            input: ActivityInput::default(),
            emissions: EmissionBreakdown::from_parts(1.0, 0.0, 0.0, 0.0, 0.0),
        };

        let json = serde_json::to_value(&new).unwrap();
        assert_eq!(json["total_kg"], 1.0);
        assert_eq!(json["activity_date"], "2024-03-02");
        assert!(json.get("emissions").is_none());
    }
}
