use super::types::{AppreciationScenario, BuyingInputs, MaintenanceCost};

pub const LOW_APPRECIATION_RATE: f64 = 2.0;
pub const MEDIUM_APPRECIATION_RATE: f64 = 4.0;
pub const HIGH_APPRECIATION_RATE: f64 = 6.0;

pub fn monthly_property_tax(home_value: f64, property_tax_rate: f64) -> f64 {
    home_value * property_tax_rate / 100.0 / 12.0
}

pub fn monthly_home_insurance(home_value: f64, home_insurance_rate: f64) -> f64 {
    home_value * home_insurance_rate / 100.0 / 12.0
}

pub fn monthly_maintenance(home_value: f64, maintenance: MaintenanceCost) -> f64 {
    match maintenance {
        MaintenanceCost::PercentOfValue(rate) => home_value * rate / 100.0 / 12.0,
        MaintenanceCost::AnnualFlat(annual) => annual / 12.0,
    }
}

/// Annual appreciation in percent for the selected scenario.
pub fn appreciation_rate_percent(buying: &BuyingInputs) -> f64 {
    match buying.appreciation_scenario {
        AppreciationScenario::Low => LOW_APPRECIATION_RATE,
        AppreciationScenario::Medium => MEDIUM_APPRECIATION_RATE,
        AppreciationScenario::High => HIGH_APPRECIATION_RATE,
        AppreciationScenario::Custom => buying.custom_appreciation_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::LoanType;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn costs_scale_with_current_home_value() {
        assert_approx(monthly_property_tax(400_000.0, 1.2), 400.0);
        assert_approx(monthly_home_insurance(400_000.0, 0.5), 400_000.0 * 0.005 / 12.0);
        assert_approx(monthly_property_tax(500_000.0, 1.2), 500.0);
    }

    #[test]
    fn maintenance_modes() {
        assert_approx(
            monthly_maintenance(360_000.0, MaintenanceCost::PercentOfValue(1.0)),
            300.0,
        );
        assert_approx(
            monthly_maintenance(360_000.0, MaintenanceCost::AnnualFlat(2_400.0)),
            200.0,
        );
        assert_approx(
            monthly_maintenance(900_000.0, MaintenanceCost::AnnualFlat(2_400.0)),
            200.0,
        );
    }

    #[test]
    fn appreciation_scenarios_map_to_rates() {
        let mut buying = BuyingInputs {
            house_price: 1.0,
            down_payment_percent: 20.0,
            interest_rate: 6.0,
            loan_term_years: 30,
            loan_type: LoanType::Fixed,
            property_tax_rate: 0.0,
            home_insurance_rate: 0.0,
            maintenance: MaintenanceCost::AnnualFlat(0.0),
            appreciation_scenario: AppreciationScenario::Low,
            custom_appreciation_rate: 7.5,
            current_savings: 0.0,
        };
        assert_approx(appreciation_rate_percent(&buying), 2.0);
        buying.appreciation_scenario = AppreciationScenario::Medium;
        assert_approx(appreciation_rate_percent(&buying), 4.0);
        buying.appreciation_scenario = AppreciationScenario::High;
        assert_approx(appreciation_rate_percent(&buying), 6.0);
        buying.appreciation_scenario = AppreciationScenario::Custom;
        assert_approx(appreciation_rate_percent(&buying), 7.5);
    }
}
