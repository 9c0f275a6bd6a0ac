//! 일일 배출량 계산기
//!
//! 입력과 계수만으로 결과가 정해지는 순수 함수입니다. 반올림은 표시 계층에서만 하며,
//! 총합은 다섯 하위 합계의 정확한 합입니다.
//!
//! ```text
//! transport   = Σ distance_km × travel_kg_per_km(mode)
//! electricity = electricity_kwh(level) × grid_kg_per_kwh
//! water       = water_litres(level) × water_kg_per_litre
//! food        = diet_weekly_kg(diet) / 21 × meals
//! appliances  = Σ appliance_kwh(flag) × grid_kg_per_kwh
//! ```

use crate::domain::models::bill_extraction::{NormalizedUsage, UsageUnit};
use crate::domain::models::emissions::{
    ActivityInput, EmissionBreakdown, EmissionFactors, MEALS_PER_WEEK,
};

/// 하루 활동의 카테고리별 배출량을 계산합니다.
pub fn calculate(input: &ActivityInput, factors: &EmissionFactors) -> EmissionBreakdown {
    EmissionBreakdown::from_parts(
        transport_kg(input, factors),
        electricity_kg(input, factors),
        water_kg(input, factors),
        food_kg(input, factors),
        appliance_kg(input, factors),
    )
}

fn transport_kg(input: &ActivityInput, factors: &EmissionFactors) -> f64 {
    input
        .trips
        .iter()
        .map(|trip| trip.distance_km * factors.travel_kg_per_km(trip.mode))
        .sum()
}

fn electricity_kg(input: &ActivityInput, factors: &EmissionFactors) -> f64 {
    input
        .electricity
        .map(|level| factors.electricity_kwh(level) * factors.grid_kg_per_kwh)
        .unwrap_or(0.0)
}

fn water_kg(input: &ActivityInput, factors: &EmissionFactors) -> f64 {
    input
        .water
        .map(|level| factors.water_litres(level) * factors.water_kg_per_litre)
        .unwrap_or(0.0)
}

fn food_kg(input: &ActivityInput, factors: &EmissionFactors) -> f64 {
    factors.diet_weekly_kg(input.diet) / MEALS_PER_WEEK * f64::from(input.meals)
}

fn appliance_kg(input: &ActivityInput, factors: &EmissionFactors) -> f64 {
    let kwh: f64 = input
        .appliances
        .iter()
        .map(|appliance| factors.appliance_kwh(*appliance))
        .sum();

    kwh * factors.grid_kg_per_kwh
}

/// 고지서 사용량의 배출량 (kg CO2e)
pub fn bill_emissions_kg(usage: &NormalizedUsage, factors: &EmissionFactors) -> f64 {
    let per_unit = match usage.unit {
        UsageUnit::KilowattHour => factors.grid_kg_per_kwh,
        UsageUnit::Litre => factors.water_kg_per_litre,
        UsageUnit::CubicMetre => factors.natural_gas_kg_per_m3,
        UsageUnit::Kilogram => factors.lpg_kg_per_kg,
    };

    usage.quantity * per_unit
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use crate::domain::entities::BillType;
    use crate::domain::models::emissions::{Appliance, DietType, TravelMode, Trip, UsageLevel};

    const EPS: f64 = 1e-9;

    fn busy_day() -> ActivityInput {
        ActivityInput {
            electricity: Some(UsageLevel::High),
            water: Some(UsageLevel::Typical),
            meals: 3,
            diet: DietType::Omnivore,
            trips: vec![
                Trip { mode: TravelMode::Car, distance_km: 12.5 },
                Trip { mode: TravelMode::Metro, distance_km: 8.0 },
                Trip { mode: TravelMode::Walk, distance_km: 2.0 },
            ],
            appliances: BTreeSet::from([Appliance::AirConditioner, Appliance::WashingMachine]),
        }
    }

    #[test]
    fn test_total_is_sum_of_subtotals() {
        let result = calculate(&busy_day(), &EmissionFactors::default());
        let sum = result.transport_kg
            + result.electricity_kg
            + result.water_kg
            + result.food_kg
            + result.appliance_kg;

        assert_eq!(result.total_kg, sum);
        assert!(result.total_kg > 0.0);
    }

    #[test]
    fn test_zero_input_yields_zero() {
        let result = calculate(&ActivityInput::default(), &EmissionFactors::default());

        assert!(result.is_zero());
        assert_eq!(result, EmissionBreakdown::default());
    }

    #[test]
    fn test_category_formulas() {
        let factors = EmissionFactors::default();
        let result = calculate(&busy_day(), &factors);

        assert!((result.transport_kg - (12.5 * 0.192 + 8.0 * 0.035)).abs() < EPS);
        assert!((result.electricity_kg - 15.0 * 0.82).abs() < EPS);
        assert!((result.water_kg - 135.0 * 0.000344).abs() < EPS);
        assert!((result.food_kg - 24.5 / 21.0 * 3.0).abs() < EPS);
        assert!((result.appliance_kg - (6.0 + 0.9) * 0.82).abs() < EPS);
    }

    #[test]
    fn test_raising_usage_level_never_lowers_subtotal() {
        let factors = EmissionFactors::default();

        for pair in UsageLevel::ALL.windows(2) {
            let lower = calculate(
                &ActivityInput { electricity: Some(pair[0]), water: Some(pair[0]), ..Default::default() },
                &factors,
            );
            let higher = calculate(
                &ActivityInput { electricity: Some(pair[1]), water: Some(pair[1]), ..Default::default() },
                &factors,
            );

            assert!(lower.electricity_kg <= higher.electricity_kg);
            assert!(lower.water_kg <= higher.water_kg);
        }
    }

    #[test]
    fn test_active_travel_is_free() {
        let input = ActivityInput {
            trips: vec![
                Trip { mode: TravelMode::Bicycle, distance_km: 30.0 },
                Trip { mode: TravelMode::Walk, distance_km: 5.0 },
            ],
            ..Default::default()
        };

        assert!(calculate(&input, &EmissionFactors::default()).is_zero());
    }

    #[test]
    fn test_calculation_is_deterministic_and_uses_overridden_grid_factor() {
        let input = busy_day();
        let cleaner_grid = EmissionFactors { grid_kg_per_kwh: 0.4, ..Default::default() };

        assert_eq!(calculate(&input, &cleaner_grid), calculate(&input, &cleaner_grid));
        assert!(
            calculate(&input, &cleaner_grid).electricity_kg
                < calculate(&input, &EmissionFactors::default()).electricity_kg
        );
    }

    #[test]
    fn test_bill_emissions_per_unit() {
        let factors = EmissionFactors::default();
        let electricity = NormalizedUsage {
            bill_type: BillType::Electricity,
            quantity: 250.0,
            unit: UsageUnit::KilowattHour,
        };
        let lpg = NormalizedUsage { bill_type: BillType::Gas, quantity: 14.2, unit: UsageUnit::Kilogram };

        assert!((bill_emissions_kg(&electricity, &factors) - 205.0).abs() < EPS);
        assert!((bill_emissions_kg(&lpg, &factors) - 14.2 * 2.98).abs() < EPS);
    }
}
