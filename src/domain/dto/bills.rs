//! 고지서 스캔 요청/응답 DTO

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::entities::{Badge, Bill};

/// Gemini가 받는 이미지 형식
pub const SUPPORTED_IMAGE_TYPES: [&str; 5] =
    ["image/jpeg", "image/png", "image/webp", "image/heic", "image/heif"];

/// `POST /api/v1/bills/scan`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ScanBillRequest {
    /// base64 이미지 (`data:image/png;base64,` 접두사 허용)
    #[validate(length(min = 16, message = "이미지 데이터가 비어 있습니다"))]
    pub image_base64: String,

    #[validate(custom(function = "validate_mime_type"))]
    pub mime_type: String,
}

fn validate_mime_type(mime_type: &str) -> Result<(), ValidationError> {
    if SUPPORTED_IMAGE_TYPES.contains(&mime_type.trim().to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_mime_type")
            .with_message("지원하지 않는 이미지 형식입니다 (jpeg, png, webp, heic)".into()))
    }
}

impl ScanBillRequest {
    /// data URL 접두사와 공백을 제거한 base64 본문
    pub fn image_payload(&self) -> &str {
        let trimmed = self.image_base64.trim();
        match trimmed.split_once(";base64,") {
            Some((prefix, data)) if prefix.starts_with("data:") => data,
            _ => trimmed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanBillResponse {
    pub bill: Bill,

    /// 같은 사용량을 하루 활동으로 환산했을 때와 비교하기 위한 일 평균 배출량
    pub daily_average_kg: Option<f64>,

    /// 이번 스캔으로 새로 획득한 배지
    pub awarded_badges: Vec<Badge>,
}
