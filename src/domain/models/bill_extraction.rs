//! 고지서 추출 결과와 단위 정규화
//!
//! Gemini는 고지서 이미지에서 아래 JSON을 돌려주도록 요청받습니다.
//! 숫자가 `"1,234.5"` 같은 문자열로 오는 경우도 허용합니다.
//!
//! ```json
//! {
//!   "bill_type": "electricity",
//!   "provider": "BESCOM",
//!   "units_consumed": 245,
//!   "unit": "kWh",
//!   "billing_period_start": "2024-02-01",
//!   "billing_period_end": "2024-02-29",
//!   "amount_due": 1890.5,
//!   "currency": "INR"
//! }
//! ```
//!
//! # 정규화 단위
//!
//! | 고지서 | 입력 단위 | 저장 단위 |
//! |--------|-----------|-----------|
//! | 전기 | kWh, units, MWh, Wh | `kWh` |
//! | 수도 | L, kL, m³, gallon | `L` |
//! | 가스 | m³, SCM | `m3` (도시가스) |
//! | 가스 | kg | `kg` (LPG) |

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::BillType;
use crate::utils::string_utils::strip_code_fences;

const LITRES_PER_US_GALLON: f64 = 3.78541;

/// Gemini 추출 원본 값
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BillExtraction {
    #[serde(default)]
    pub bill_type: Option<String>,

    #[serde(default)]
    pub provider: Option<String>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub units_consumed: Option<f64>,

    #[serde(default)]
    pub unit: Option<String>,

    #[serde(default)]
    pub billing_period_start: Option<String>,

    #[serde(default)]
    pub billing_period_end: Option<String>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub amount_due: Option<f64>,

    #[serde(default)]
    pub currency: Option<String>,
}

/// 저장 단위
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageUnit {
    KilowattHour,
    Litre,
    CubicMetre,
    Kilogram,
}

impl UsageUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageUnit::KilowattHour => "kWh",
            UsageUnit::Litre => "L",
            UsageUnit::CubicMetre => "m3",
            UsageUnit::Kilogram => "kg",
        }
    }
}

/// 정규화된 사용량
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedUsage {
    pub bill_type: BillType,
    pub quantity: f64,
    pub unit: UsageUnit,
}

/// 숫자 또는 숫자 문자열(`"1,234.50"`, `"₹ 980"`)을 허용합니다.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(serde_json::Value::Number(number)) => number.as_f64(),
        Some(serde_json::Value::String(text)) => {
            let cleaned: String = text
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    })
}

impl BillExtraction {
    /// 모델 응답 텍스트를 파싱합니다.
    ///
    /// 코드 펜스를 벗기고, 객체 하나를 담은 배열도 허용하며,
    /// 앞뒤에 설명 문장이 붙은 경우 첫 `{`부터 마지막 `}`까지만 파싱합니다.
    pub fn parse(text: &str) -> AppResult<Self> {
        let body = strip_code_fences(text).trim();

        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            let object = match value {
                serde_json::Value::Array(items) => items.into_iter().next(),
                other => Some(other),
            };

            return object
                .and_then(|object| serde_json::from_value(object).ok())
                .ok_or_else(|| AppError::ExternalServiceError("고지서 추출 결과가 비어 있습니다".to_string()));
        }

        match (body.find('{'), body.rfind('}')) {
            (Some(start), Some(end)) if start < end => serde_json::from_str(&body[start..=end])
                .map_err(|e| AppError::ExternalServiceError(format!("고지서 추출 결과 파싱 실패: {}", e))),
            _ => Err(AppError::ExternalServiceError(
                "고지서 추출 결과가 JSON이 아닙니다".to_string(),
            )),
        }
    }

    /// 고지서 종류를 판별합니다. 명시된 종류가 없으면 단위에서 추론합니다.
    pub fn resolve_bill_type(&self) -> Option<BillType> {
        let from_label = self.bill_type.as_deref().map(str::to_lowercase).and_then(|label| {
            if label.contains("electric") || label.contains("power") || label.contains("energy") {
                Some(BillType::Electricity)
            } else if label.contains("water") {
                Some(BillType::Water)
            } else if label.contains("gas") || label.contains("lpg") || label.contains("png") {
                Some(BillType::Gas)
            } else {
                None
            }
        });

        from_label.or_else(|| match self.unit.as_deref().map(canonical_unit).as_deref() {
            Some("kwh" | "mwh" | "wh") => Some(BillType::Electricity),
            Some("kl" | "l" | "litre" | "litres" | "liter" | "liters" | "gallon" | "gallons") => Some(BillType::Water),
            Some("scm" | "kg") => Some(BillType::Gas),
            _ => None,
        })
    }

    /// 종류와 단위를 판별해 저장 단위로 환산합니다.
    pub fn normalize(&self) -> AppResult<NormalizedUsage> {
        let bill_type = self.resolve_bill_type().ok_or_else(|| {
            AppError::ValidationError("고지서 종류를 판별할 수 없습니다 (전기/수도/가스)".to_string())
        })?;

        let raw = self
            .units_consumed
            .filter(|units| units.is_finite() && *units >= 0.0)
            .ok_or_else(|| AppError::ValidationError("고지서에서 사용량을 읽을 수 없습니다".to_string()))?;

        let unit = self.unit.as_deref().map(canonical_unit);
        let (quantity, unit) = normalize_quantity(bill_type, raw, unit.as_deref())?;

        Ok(NormalizedUsage { bill_type, quantity, unit })
    }

    pub fn period_start(&self) -> Option<NaiveDate> {
        self.billing_period_start.as_deref().and_then(parse_bill_date)
    }

    pub fn period_end(&self) -> Option<NaiveDate> {
        self.billing_period_end.as_deref().and_then(parse_bill_date)
    }

    pub fn amount(&self) -> Option<f64> {
        self.amount_due.filter(|amount| amount.is_finite() && *amount >= 0.0)
    }
}

/// `"m³"` → `"m3"`, `"Cubic Meters"` → `"cubicmeters"`, `"k.W.h"` → `"kwh"`
fn canonical_unit(unit: &str) -> String {
    unit.trim()
        .to_lowercase()
        .replace('³', "3")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.' && *c != '_')
        .collect()
}

fn normalize_quantity(bill_type: BillType, raw: f64, unit: Option<&str>) -> AppResult<(f64, UsageUnit)> {
    let mismatch = |unit: &str| {
        AppError::ValidationError(format!("{} 고지서에 맞지 않는 단위입니다: {}", bill_type.as_str(), unit))
    };

    match bill_type {
        BillType::Electricity => match unit {
            None | Some("kwh" | "unit" | "units" | "kilowatthour" | "kilowatthours") => {
                Ok((raw, UsageUnit::KilowattHour))
            }
            Some("mwh") => Ok((raw * 1000.0, UsageUnit::KilowattHour)),
            Some("wh") => Ok((raw / 1000.0, UsageUnit::KilowattHour)),
            Some(other) => Err(mismatch(other)),
        },
        BillType::Water => match unit {
            None | Some("l" | "ltr" | "litre" | "litres" | "liter" | "liters") => Ok((raw, UsageUnit::Litre)),
            Some(
                "kl" | "kilolitre" | "kilolitres" | "kiloliter" | "kiloliters" | "m3" | "cum"
                | "cubicmeter" | "cubicmeters" | "cubicmetre" | "cubicmetres",
            ) => Ok((raw * 1000.0, UsageUnit::Litre)),
            Some("gal" | "gallon" | "gallons") => Ok((raw * LITRES_PER_US_GALLON, UsageUnit::Litre)),
            Some(other) => Err(mismatch(other)),
        },
        BillType::Gas => match unit {
            None | Some("m3" | "scm" | "cum" | "cubicmeter" | "cubicmeters" | "cubicmetre" | "cubicmetres") => {
                Ok((raw, UsageUnit::CubicMetre))
            }
            Some("kg" | "kgs" | "kilogram" | "kilograms") => Ok((raw, UsageUnit::Kilogram)),
            Some(other) => Err(mismatch(other)),
        },
    }
}

fn parse_bill_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fenced_json_with_string_numbers() {
        let text = "```json\n{\"bill_type\": \"Electricity\", \"units_consumed\": \"1,245\", \"unit\": \"Units\", \"amount_due\": \"₹ 9,870.50\", \"billing_period_start\": \"01/02/2024\"}\n```";

        let extraction = BillExtraction::parse(text).unwrap();
        assert_eq!(extraction.units_consumed, Some(1245.0));
        assert_eq!(extraction.amount(), Some(9870.5));
        assert_eq!(extraction.period_start(), NaiveDate::from_ymd_opt(2024, 2, 1));

        let usage = extraction.normalize().unwrap();
        assert_eq!(usage.bill_type, BillType::Electricity);
        assert_eq!(usage.unit, UsageUnit::KilowattHour);
        assert_eq!(usage.quantity, 1245.0);
    }

    #[test]
    fn test_parse_tolerates_surrounding_prose_and_arrays() {
        let prose = "Here is the data: {\"bill_type\": \"water\", \"units_consumed\": 12, \"unit\": \"kL\"} Hope this helps";
        let usage = BillExtraction::parse(prose).unwrap().normalize().unwrap();
        assert_eq!(usage.quantity, 12000.0);
        assert_eq!(usage.unit, UsageUnit::Litre);

        let array = r#"[{"bill_type": "gas", "units_consumed": 14.2, "unit": "kg"}]"#;
        let usage = BillExtraction::parse(array).unwrap().normalize().unwrap();
        assert_eq!(usage.unit, UsageUnit::Kilogram);

        assert!(BillExtraction::parse("no json here").is_err());
        assert!(BillExtraction::parse("[]").is_err());
    }

    #[test]
    fn test_unit_normalization_table() {
        let cases = [
            (BillType::Electricity, 2.0, Some("mwh"), 2000.0, UsageUnit::KilowattHour),
            (BillType::Electricity, 500.0, Some("wh"), 0.5, UsageUnit::KilowattHour),
            (BillType::Water, 3.0, Some("m3"), 3000.0, UsageUnit::Litre),
            (BillType::Water, 150.0, None, 150.0, UsageUnit::Litre),
            (BillType::Gas, 30.0, Some("scm"), 30.0, UsageUnit::CubicMetre),
        ];

        for (bill_type, raw, unit, expected, expected_unit) in cases {
            let (quantity, unit) = normalize_quantity(bill_type, raw, unit).unwrap();
            assert!((quantity - expected).abs() < 1e-9, "{:?} {}", bill_type, raw);
            assert_eq!(unit, expected_unit);
        }

        assert!(normalize_quantity(BillType::Electricity, 10.0, Some("kl")).is_err());
    }

    #[test]
    fn test_bill_type_inferred_from_unit() {
        let extraction = BillExtraction {
            units_consumed: Some(20.0),
            unit: Some("m³".to_string()),
            ..Default::default()
        };
        // m³만으로는 수도/가스를 구분할 수 없음
        assert!(extraction.normalize().is_err());

        let extraction = BillExtraction {
            units_consumed: Some(310.0),
            unit: Some("kWh".to_string()),
            ..Default::default()
        };
        assert_eq!(extraction.normalize().unwrap().bill_type, BillType::Electricity);
    }

    #[test]
    fn test_missing_or_negative_usage_is_rejected() {
        let extraction = BillExtraction {
            bill_type: Some("electricity".to_string()),
            units_consumed: Some(-4.0),
            ..Default::default()
        };
        assert!(matches!(extraction.normalize(), Err(AppError::ValidationError(_))));
    }
}
