//! 공과금 고지서 엔티티 (`bills` 테이블)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 고지서 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillType {
    Electricity,
    Water,
    Gas,
}

impl BillType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillType::Electricity => "electricity",
            BillType::Water => "water",
            BillType::Gas => "gas",
        }
    }
}

/// 스캔되어 저장된 고지서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: Uuid,
    pub user_id: String,
    pub bill_type: BillType,

    #[serde(default)]
    pub provider: Option<String>,

    /// 정규화된 단위 기준 사용량
    pub units_consumed: f64,

    /// `kWh`, `L`, `m3`, `kg` 중 하나
    pub unit: String,

    #[serde(default)]
    pub billing_period_start: Option<NaiveDate>,

    #[serde(default)]
    pub billing_period_end: Option<NaiveDate>,

    #[serde(default)]
    pub amount_due: Option<f64>,

    #[serde(default)]
    pub currency: Option<String>,

    pub emissions_kg: f64,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBill {
    pub user_id: String,
    pub bill_type: BillType,
    pub provider: Option<String>,
    pub units_consumed: f64,
    pub unit: String,
    pub billing_period_start: Option<NaiveDate>,
    pub billing_period_end: Option<NaiveDate>,
    pub amount_due: Option<f64>,
    pub currency: Option<String>,
    pub emissions_kg: f64,
}

/// CSV 내보내기 행
#[derive(Debug, Clone, Serialize)]
pub struct BillCsvRow {
    pub scanned_at: String,
    pub bill_type: &'static str,
    pub provider: String,
    pub units_consumed: f64,
    pub unit: String,
    pub period_start: String,
    pub period_end: String,
    pub amount_due: String,
    pub currency: String,
    pub emissions_kg: f64,
}

impl From<&Bill> for BillCsvRow {
    fn from(bill: &Bill) -> Self {
        let date_or_blank = |date: Option<NaiveDate>| date.map(|d| d.to_string()).unwrap_or_default();

        Self {
            scanned_at: bill.created_at.format("%Y-%m-%d").to_string(),
            bill_type: bill.bill_type.as_str(),
            provider: bill.provider.clone().unwrap_or_default(),
            units_consumed: bill.units_consumed,
            unit: bill.unit.clone(),
            period_start: date_or_blank(bill.billing_period_start),
            period_end: date_or_blank(bill.billing_period_end),
            amount_due: bill.amount_due.map(|amount| format!("{:.2}", amount)).unwrap_or_default(),
            currency: bill.currency.clone().unwrap_or_default(),
            emissions_kg: bill.emissions_kg,
        }
    }
}
