//! 탄소 배출 계산 모델
//!
//! 일일 활동 입력([`ActivityInput`]), 계산 결과([`EmissionBreakdown`]),
//! 배출 계수 테이블([`EmissionFactors`])을 정의합니다.
//!
//! # 계수 출처 및 단위
//!
//! | 항목 | 단위 |
//! |------|------|
//! | 교통 | kg CO2e / km (승객 1인 기준) |
//! | 전력망 | kg CO2e / kWh (기본값: 인도 CEA 그리드 평균 0.82) |
//! | 수도 | kg CO2e / L (상수 처리 및 공급) |
//! | 식단 | kg CO2e / 주 (21끼 기준) |
//! | 가전 | kWh / 일 (사용 시) |

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::core::errors::{AppError, AppResult};

/// 한 주 기준 끼니 수 (식단 주간 계수를 끼니당 계수로 환산)
pub const MEALS_PER_WEEK: f64 = 21.0;

/// 전기/수도 사용 수준
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageLevel {
    Low,
    Typical,
    High,
}

impl UsageLevel {
    pub const ALL: [UsageLevel; 3] = [UsageLevel::Low, UsageLevel::Typical, UsageLevel::High];
}

/// 식단 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    Vegan,
    Vegetarian,
    Pescatarian,
    #[default]
    Omnivore,
    HeavyMeat,
}

/// 이동 수단
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Car,
    ElectricCar,
    Motorbike,
    Bus,
    Train,
    Metro,
    AutoRickshaw,
    Flight,
    Bicycle,
    Walk,
}

/// 사용 여부만 기록하는 고전력 가전
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Appliance {
    AirConditioner,
    WaterHeater,
    WashingMachine,
    ClothesDryer,
    Dishwasher,
}

/// 이동 한 건
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Trip {
    pub mode: TravelMode,

    #[validate(range(min = 0.0, max = 20000.0, message = "이동 거리는 0-20000km 사이여야 합니다"))]
    pub distance_km: f64,
}

/// 하루 활동 입력
///
/// 모든 필드는 선택이며, 생략된 항목은 배출량 0으로 계산됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ActivityInput {
    #[serde(default)]
    pub electricity: Option<UsageLevel>,

    #[serde(default)]
    pub water: Option<UsageLevel>,

    #[serde(default)]
    #[validate(range(max = 10, message = "끼니 수는 0-10 사이여야 합니다"))]
    pub meals: u8,

    #[serde(default)]
    pub diet: DietType,

    #[serde(default)]
    #[validate(length(max = 50, message = "이동은 하루 최대 50건까지 기록할 수 있습니다"))]
    #[validate(nested)]
    pub trips: Vec<Trip>,

    #[serde(default)]
    pub appliances: BTreeSet<Appliance>,
}

impl ActivityInput {
    /// 범위 검증과 유한값 검증을 함께 수행합니다.
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;

        if self.trips.iter().any(|trip| !trip.distance_km.is_finite()) {
            return Err(AppError::ValidationError(
                "이동 거리는 유한한 숫자여야 합니다".to_string(),
            ));
        }

        Ok(())
    }
}

/// 카테고리별 배출량 (kg CO2e)
///
/// `total_kg`는 항상 다섯 하위 합계의 합입니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionBreakdown {
    pub transport_kg: f64,
    pub electricity_kg: f64,
    pub water_kg: f64,
    pub food_kg: f64,
    pub appliance_kg: f64,
    pub total_kg: f64,
}

impl EmissionBreakdown {
    /// 하위 합계로부터 총합을 계산해 생성합니다.
    pub fn from_parts(
        transport_kg: f64,
        electricity_kg: f64,
        water_kg: f64,
        food_kg: f64,
        appliance_kg: f64,
    ) -> Self {
        Self {
            transport_kg,
            electricity_kg,
            water_kg,
            food_kg,
            appliance_kg,
            total_kg: transport_kg + electricity_kg + water_kg + food_kg + appliance_kg,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.total_kg == 0.0
    }
}

/// 배출 계수 테이블
///
/// 전력망/수도 계수는 지역마다 달라 설정으로 재정의할 수 있고,
/// 나머지 계수는 고정 테이블입니다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionFactors {
    /// kg CO2e / kWh
    pub grid_kg_per_kwh: f64,
    /// kg CO2e / L
    pub water_kg_per_litre: f64,
    /// kg CO2e / m³ (도시가스)
    pub natural_gas_kg_per_m3: f64,
    /// kg CO2e / kg (LPG)
    pub lpg_kg_per_kg: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            grid_kg_per_kwh: 0.82,
            water_kg_per_litre: 0.000344,
            natural_gas_kg_per_m3: 1.9,
            lpg_kg_per_kg: 2.98,
        }
    }
}

impl EmissionFactors {
    /// 이동 수단별 km당 배출량
    pub fn travel_kg_per_km(&self, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Car => 0.192,
            TravelMode::ElectricCar => 0.053,
            TravelMode::Motorbike => 0.103,
            TravelMode::Bus => 0.105,
            TravelMode::Train => 0.041,
            TravelMode::Metro => 0.035,
            TravelMode::AutoRickshaw => 0.065,
            TravelMode::Flight => 0.255,
            TravelMode::Bicycle | TravelMode::Walk => 0.0,
        }
    }

    /// 사용 수준별 하루 전력 사용량 (kWh)
    pub fn electricity_kwh(&self, level: UsageLevel) -> f64 {
        match level {
            UsageLevel::Low => 4.0,
            UsageLevel::Typical => 8.0,
            UsageLevel::High => 15.0,
        }
    }

    /// 사용 수준별 하루 물 사용량 (L)
    pub fn water_litres(&self, level: UsageLevel) -> f64 {
        match level {
            UsageLevel::Low => 90.0,
            UsageLevel::Typical => 135.0,
            UsageLevel::High => 250.0,
        }
    }

    /// 식단별 주간 배출량 (kg CO2e / 주, 21끼 기준)
    pub fn diet_weekly_kg(&self, diet: DietType) -> f64 {
        match diet {
            DietType::Vegan => 10.5,
            DietType::Vegetarian => 13.3,
            DietType::Pescatarian => 17.5,
            DietType::Omnivore => 24.5,
            DietType::HeavyMeat => 38.5,
        }
    }

    /// 가전별 하루 전력 사용량 (kWh)
    pub fn appliance_kwh(&self, appliance: Appliance) -> f64 {
        match appliance {
            Appliance::AirConditioner => 6.0,
            Appliance::WaterHeater => 3.0,
            Appliance::WashingMachine => 0.9,
            Appliance::ClothesDryer => 2.5,
            Appliance::Dishwasher => 1.2,
        }
    }
}
