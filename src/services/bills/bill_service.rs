//! 고지서 스캔
//!
//! ```text
//! base64 이미지 ─► 크기 검사 ─► Gemini generateContent (JSON 응답)
//!              ─► BillExtraction::parse ─► normalize (kWh / L / m3 / kg)
//!              ─► 배출량 계산 ─► bills 저장
//! ```

use std::sync::Arc;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;
use singleton_macro::service;
use crate::clients::GeminiClient;
use crate::clients::gemini::{Content, GenerateContentRequest, Part};
use crate::config::{EmissionConfig, GeminiConfig};
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::bills::{ScanBillRequest, ScanBillResponse};
use crate::domain::dto::common::PageQuery;
use crate::domain::entities::{Bill, NewBill};
use crate::domain::models::bill_extraction::BillExtraction;
use crate::repositories::bills::BillRepository;
use crate::services::carbon::calculator;
use crate::utils::string_utils::clean_optional_string;

const EXTRACTION_PROMPT: &str = "You read utility bills. Extract the fields below from the bill image \
and answer with a single JSON object only, no prose:\n\
{\n\
  \"bill_type\": \"electricity\" | \"water\" | \"gas\",\n\
  \"provider\": string | null,\n\
  \"units_consumed\": number,\n\
  \"unit\": string (as printed, e.g. \"kWh\", \"KL\", \"m3\", \"SCM\", \"kg\"),\n\
  \"billing_period_start\": \"YYYY-MM-DD\" | null,\n\
  \"billing_period_end\": \"YYYY-MM-DD\" | null,\n\
  \"amount_due\": number | null,\n\
  \"currency\": ISO 4217 code | null\n\
}\n\
Use the consumption for the current billing period, not cumulative meter readings.";

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

#[service(name = "bill")]
pub struct BillService {
    bill_repo: Arc<BillRepository>,
    gemini: Arc<GeminiClient>,
}

impl BillService {
    pub async fn scan(&self, user_id: &str, request: &ScanBillRequest) -> AppResult<ScanBillResponse> {
        let payload = request.image_payload();
        check_image_size(payload, GeminiConfig::max_image_bytes())?;

        let mime_type = request.mime_type.trim().to_lowercase();
        let prompt = GenerateContentRequest::new(vec![Content::user(vec![
            Part::text(EXTRACTION_PROMPT),
            Part::inline_image(&mime_type, payload),
        ])])
        .json_output();

        let raw = self.gemini.generate(&prompt).await?;
        let extraction = BillExtraction::parse(&raw)?;
        let usage = extraction.normalize()?;
        let emissions_kg = calculator::bill_emissions_kg(&usage, &EmissionConfig::factors());

        let period_start = extraction.period_start();
        let period_end = extraction.period_end();

        let bill = self
            .bill_repo
            .insert(&NewBill {
                user_id: user_id.to_string(),
                bill_type: usage.bill_type,
                provider: clean_optional_string(extraction.provider.clone()),
                units_consumed: usage.quantity,
                unit: usage.unit.as_str().to_string(),
                billing_period_start: period_start,
                billing_period_end: period_end,
                amount_due: extraction.amount(),
                currency: clean_optional_string(extraction.currency.clone()).map(|c| c.to_uppercase()),
                emissions_kg,
            })
            .await?;

        log::info!(
            "🧾 고지서 스캔: user={} type={} {:.1}{} → {:.2}kg",
            user_id,
            usage.bill_type.as_str(),
            usage.quantity,
            usage.unit.as_str(),
            emissions_kg
        );

        Ok(ScanBillResponse {
            daily_average_kg: daily_average(emissions_kg, period_start, period_end),
            bill,
            awarded_badges: Vec::new(),
        })
    }

    pub async fn list(&self, user_id: &str, page: PageQuery) -> AppResult<Vec<Bill>> {
        self.bill_repo
            .find_by_user(user_id, Some(page.limit_or(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)), page.offset())
            .await
    }
}

/// base64를 디코딩해 이미지 크기를 확인합니다.
fn check_image_size(payload: &str, max_bytes: usize) -> AppResult<()> {
    let decoded = STANDARD
        .decode(payload)
        .map_err(|_| AppError::ValidationError("이미지가 올바른 base64가 아닙니다".to_string()))?;

    if decoded.is_empty() {
        return Err(AppError::ValidationError("이미지 데이터가 비어 있습니다".to_string()));
    }
    if decoded.len() > max_bytes {
        return Err(AppError::ValidationError(format!(
            "이미지는 최대 {}MB까지 업로드할 수 있습니다",
            max_bytes / (1024 * 1024)
        )));
    }

    Ok(())
}

/// 청구 기간(양 끝 포함) 기준 하루 평균. 기간을 모르거나 뒤집혀 있으면 `None`
fn daily_average(emissions_kg: f64, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<f64> {
    let (start, end) = (start?, end?);
    let days = (end - start).num_days() + 1;

    (days > 0).then(|| emissions_kg / days as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_daily_average_over_inclusive_period() {
        assert_eq!(daily_average(300.0, Some(date(4, 1)), Some(date(4, 30))), Some(10.0));
        assert_eq!(daily_average(5.0, Some(date(4, 1)), Some(date(4, 1))), Some(5.0));
    }

    #[test]
    fn test_daily_average_needs_valid_period() {
        assert_eq!(daily_average(300.0, None, Some(date(4, 30))), None);
        assert_eq!(daily_average(300.0, Some(date(4, 30)), Some(date(4, 1))), None);
    }

    #[test]
    fn test_check_image_size() {
        let small = STANDARD.encode([0u8; 64]);
        assert!(check_image_size(&small, 1024).is_ok());

        let large = STANDARD.encode(vec![0u8; 2048]);
        assert!(matches!(check_image_size(&large, 1024), Err(AppError::ValidationError(_))));

        assert!(check_image_size("not base64 !!", 1024).is_err());
    }

    #[test]
    fn test_extraction_prompt_requests_json() {
        let request = GenerateContentRequest::new(vec![Content::user(vec![
            Part::text(EXTRACTION_PROMPT),
            Part::inline_image("image/png", "iVBORw0KGgo"),
        ])])
        .json_output();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert!(json["contents"][0]["parts"][0]["text"].as_str().unwrap().contains("units_consumed"));
    }
}
