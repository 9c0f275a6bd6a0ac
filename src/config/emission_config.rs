//! 배출 계수 설정
//!
//! 지역별로 크게 달라지는 전력망/수도 계수만 환경 변수로 재정의합니다.
//!
//! ```bash
//! export GRID_EMISSION_FACTOR="0.82"      # kg CO2e / kWh
//! export WATER_EMISSION_FACTOR="0.000344" # kg CO2e / L
//! ```

use crate::domain::models::emissions::EmissionFactors;
use super::parsed_var;

pub struct EmissionConfig;

impl EmissionConfig {
    /// 기본 테이블에 환경 변수 재정의를 적용한 계수
    pub fn factors() -> EmissionFactors {
        let defaults = EmissionFactors::default();

        EmissionFactors {
            grid_kg_per_kwh: Self::non_negative(
                parsed_var("GRID_EMISSION_FACTOR", defaults.grid_kg_per_kwh),
                defaults.grid_kg_per_kwh,
            ),
            water_kg_per_litre: Self::non_negative(
                parsed_var("WATER_EMISSION_FACTOR", defaults.water_kg_per_litre),
                defaults.water_kg_per_litre,
            ),
            ..defaults
        }
    }

    fn non_negative(value: f64, fallback: f64) -> f64 {
        if value.is_finite() && value >= 0.0 {
            value
        } else {
            log::warn!("잘못된 배출 계수 {} 무시, 기본값 {} 사용", value, fallback);
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative_rejects_invalid_values() {
        assert_eq!(EmissionConfig::non_negative(-0.5, 0.82), 0.82);
        assert_eq!(EmissionConfig::non_negative(f64::NAN, 0.82), 0.82);
        assert_eq!(EmissionConfig::non_negative(0.7, 0.82), 0.7);
    }
}
