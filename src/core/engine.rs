use super::buying::{BuyingSchedule, BuyingYear, simulate_buying};
use super::investment::{InvestmentAccount, capital_gains_tax};
use super::renting::{RentingSchedule, RentingYear, simulate_renting};
use super::types::{
    BetterOption, ComparisonResults, ComparisonSummary, FormData, InvestmentSnapshot,
    MonthlyBuyingDataPoint, MonthlyRentingDataPoint, YearlyBuyingResult, YearlyComparison,
    YearlyRentingResult,
};
use super::validation::{InputError, validate_form};

/// Share of the larger final wealth inside which the two options count as equal.
pub const EQUAL_OUTCOME_BAND: f64 = 0.01;

/// Which side of the comparison an investment account belongs to.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Side {
    Buying,
    Renting,
}

#[derive(Debug, Clone, Copy)]
struct MonthFlow {
    buying_contribution: f64,
    renting_contribution: f64,
}

/// Decides who invests the saved difference this month. The cheaper side contributes
/// `|buying - renting|`; a tie contributes nothing.
fn monthly_savings_flow(buying_outflow: f64, renting_outflow: f64) -> MonthFlow {
    let saved = (buying_outflow - renting_outflow).abs();
    let cheaper = if buying_outflow < renting_outflow {
        Some(Side::Buying)
    } else if renting_outflow < buying_outflow {
        Some(Side::Renting)
    } else {
        None
    };
    MonthFlow {
        buying_contribution: if cheaper == Some(Side::Buying) { saved } else { 0.0 },
        renting_contribution: if cheaper == Some(Side::Renting) { saved } else { 0.0 },
    }
}

/// Runs both scenarios and compares them over the resolved horizon.
pub fn run_comparison(form: &FormData) -> Result<ComparisonResults, InputError> {
    validate_form(form)?;

    let horizon = form.time_horizon_years();
    let buying = simulate_buying(&form.buying, horizon);
    let renting = simulate_renting(&form.renting, horizon);

    let results = combine_schedules(form, horizon, &buying, &renting);
    tracing::debug!(
        horizon,
        final_buying = results.summary.final_buying_wealth,
        final_renting = results.summary.final_renting_wealth,
        better = ?results.summary.better_option,
        "comparison complete"
    );
    Ok(results)
}

/// Second stage: attaches investment trajectories to the simulator skeletons.
///
/// Builds new records from the skeletons; the schedules themselves are left untouched.
fn combine_schedules(
    form: &FormData,
    horizon: u32,
    buying: &BuyingSchedule,
    renting: &RentingSchedule,
) -> ComparisonResults {
    let annual_return = form.investment.annual_return;
    let tax_rate = form.investment.capital_gains_tax_rate;
    let savings = form.buying.current_savings.max(0.0);

    // Renting keeps the down payment invested from day one.
    let mut buying_account = InvestmentAccount::new(savings - buying.down_payment);
    let mut renting_account = InvestmentAccount::new(savings);

    let mut buying_results = Vec::with_capacity(horizon as usize + 1);
    let mut renting_results = Vec::with_capacity(horizon as usize + 1);
    buying_results.push(buying_year_result(
        &buying.years[0],
        buying_account.snapshot(0.0),
        Vec::new(),
        0.0,
    ));
    renting_results.push(renting_year_result(
        &renting.years[0],
        renting_account.snapshot(0.0),
        Vec::new(),
        0.0,
    ));

    for (buying_year, renting_year) in buying.years.iter().zip(&renting.years).skip(1) {
        let mut buying_months = Vec::with_capacity(buying_year.months.len());
        let mut renting_months = Vec::with_capacity(renting_year.months.len());
        let mut buying_contributed = 0.0;
        let mut renting_contributed = 0.0;

        for (buying_month, renting_month) in buying_year.months.iter().zip(&renting_year.months) {
            buying_account.accrue(annual_return);
            renting_account.accrue(annual_return);

            let flow = monthly_savings_flow(buying_month.monthly_expenses, renting_month.rent);
            buying_account.contribute(flow.buying_contribution);
            renting_account.contribute(flow.renting_contribution);
            buying_contributed += flow.buying_contribution;
            renting_contributed += flow.renting_contribution;

            buying_months.push(MonthlyBuyingDataPoint {
                costs: *buying_month,
                investment: buying_account.snapshot(flow.buying_contribution),
                total_wealth_buying: buying_month.home_equity + buying_account.balance(),
            });
            renting_months.push(MonthlyRentingDataPoint {
                costs: *renting_month,
                investment: renting_account.snapshot(flow.renting_contribution),
                total_wealth_renting: renting_account.balance(),
            });
        }

        let terminal = buying_year.year == horizon;
        let buying_tax = if terminal {
            capital_gains_tax(buying_account.earnings(), tax_rate)
        } else {
            0.0
        };
        let renting_tax = if terminal {
            capital_gains_tax(renting_account.earnings(), tax_rate)
        } else {
            0.0
        };

        buying_results.push(buying_year_result(
            buying_year,
            buying_account.snapshot(buying_contributed),
            buying_months,
            buying_tax,
        ));
        renting_results.push(renting_year_result(
            renting_year,
            renting_account.snapshot(renting_contributed),
            renting_months,
            renting_tax,
        ));
    }

    let yearly_comparisons = build_yearly_comparisons(form, &buying_results, &renting_results);
    let summary = build_summary(&buying_results, &renting_results);

    ComparisonResults {
        time_horizon_years: horizon,
        down_payment: buying.down_payment,
        loan_amount: buying.loan_amount,
        monthly_mortgage_payment: buying.monthly_mortgage_payment,
        yearly_comparisons,
        buying_results,
        renting_results,
        summary,
    }
}

fn buying_year_result(
    year: &BuyingYear,
    investment: InvestmentSnapshot,
    monthly_data: Vec<MonthlyBuyingDataPoint>,
    capital_gains_tax_paid: f64,
) -> YearlyBuyingResult {
    YearlyBuyingResult {
        year: year.year,
        mortgage_payment: year.mortgage_payment,
        principal_paid: year.principal_paid,
        interest_paid: year.interest_paid,
        loan_balance: year.loan_balance,
        property_taxes: year.property_taxes,
        home_insurance: year.home_insurance,
        maintenance_costs: year.maintenance_costs,
        home_value: year.home_value,
        home_equity: year.home_equity,
        investment,
        capital_gains_tax_paid,
        total_wealth_buying: year.home_equity + investment.investments_with_earnings
            - capital_gains_tax_paid,
        monthly_data,
    }
}

fn renting_year_result(
    year: &RentingYear,
    investment: InvestmentSnapshot,
    monthly_data: Vec<MonthlyRentingDataPoint>,
    capital_gains_tax_paid: f64,
) -> YearlyRentingResult {
    YearlyRentingResult {
        year: year.year,
        total_rent: year.total_rent,
        monthly_rent: year.monthly_rent,
        investment,
        capital_gains_tax_paid,
        total_wealth_renting: investment.investments_with_earnings - capital_gains_tax_paid,
        monthly_data,
    }
}

fn build_yearly_comparisons(
    form: &FormData,
    buying_results: &[YearlyBuyingResult],
    renting_results: &[YearlyRentingResult],
) -> Vec<YearlyComparison> {
    let mut cumulative_buying_costs = 0.0;
    let mut cumulative_renting_costs = 0.0;

    buying_results
        .iter()
        .zip(renting_results)
        .map(|(buying, renting)| {
            cumulative_buying_costs += buying.total_costs();
            cumulative_renting_costs += renting.total_rent;
            YearlyComparison {
                year: buying.year,
                buying_wealth: buying.total_wealth_buying,
                renting_wealth: renting.total_wealth_renting,
                difference: buying.total_wealth_buying - renting.total_wealth_renting,
                cumulative_buying_costs,
                cumulative_renting_costs,
                buying_contributions: buying.investment.contribution,
                renting_contributions: renting.investment.contribution,
                projected_annual_income: projected_income(form, buying.year),
            }
        })
        .collect()
}

/// Income in `year`, growing from year 2 onwards when income growth is enabled.
fn projected_income(form: &FormData, year: u32) -> f64 {
    let general = &form.general;
    if year == 0 {
        return 0.0;
    }
    if !general.income_increase {
        return general.annual_income;
    }
    general.annual_income * (1.0 + general.annual_income_growth_rate / 100.0).powi(year as i32 - 1)
}

fn build_summary(
    buying_results: &[YearlyBuyingResult],
    renting_results: &[YearlyRentingResult],
) -> ComparisonSummary {
    let final_buying_wealth = finite_or_zero(
        buying_results
            .last()
            .map_or(0.0, |year| year.total_wealth_buying),
    );
    let final_renting_wealth = finite_or_zero(
        renting_results
            .last()
            .map_or(0.0, |year| year.total_wealth_renting),
    );
    let difference = final_buying_wealth - final_renting_wealth;

    ComparisonSummary {
        final_buying_wealth,
        final_renting_wealth,
        difference: finite_or_zero(difference.abs()),
        better_option: better_option(final_buying_wealth, final_renting_wealth),
    }
}

/// Verdict with a band of [`EQUAL_OUTCOME_BAND`] of the larger magnitude around zero.
pub fn better_option(final_buying_wealth: f64, final_renting_wealth: f64) -> BetterOption {
    let difference = final_buying_wealth - final_renting_wealth;
    let threshold = final_buying_wealth
        .abs()
        .max(final_renting_wealth.abs())
        * EQUAL_OUTCOME_BAND;
    if difference > threshold {
        BetterOption::Buying
    } else if difference < -threshold {
        BetterOption::Renting
    } else {
        BetterOption::Equal
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{
        AppreciationScenario, BuyingInputs, GeneralInputs, InvestmentInputs, LoanType,
        MaintenanceCost, RentingInputs,
    };
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn sample_form() -> FormData {
        FormData {
            general: GeneralInputs {
                time_horizon_years: None,
                annual_income: 72_000.0,
                income_increase: false,
                annual_income_growth_rate: 3.0,
                require_savings_for_down_payment: true,
            },
            buying: BuyingInputs {
                house_price: 400_000.0,
                down_payment_percent: 20.0,
                interest_rate: 6.0,
                loan_term_years: 30,
                loan_type: LoanType::Fixed,
                property_tax_rate: 1.2,
                home_insurance_rate: 0.5,
                maintenance: MaintenanceCost::PercentOfValue(1.0),
                appreciation_scenario: AppreciationScenario::Medium,
                custom_appreciation_rate: 4.0,
                current_savings: 80_000.0,
            },
            renting: RentingInputs {
                monthly_rent: 2_000.0,
                annual_rent_increase: 3.0,
            },
            investment: InvestmentInputs {
                annual_return: 10.0,
                capital_gains_tax_rate: 15.0,
            },
        }
    }

    /// Everything grows at 0% and costs nothing, so only the initial allocation matters.
    fn still_world_form() -> FormData {
        let mut form = sample_form();
        form.buying.interest_rate = 0.0;
        form.buying.property_tax_rate = 0.0;
        form.buying.home_insurance_rate = 0.0;
        form.buying.maintenance = MaintenanceCost::AnnualFlat(0.0);
        form.buying.appreciation_scenario = AppreciationScenario::Custom;
        form.buying.custom_appreciation_rate = 0.0;
        form.renting.annual_rent_increase = 0.0;
        form.investment.annual_return = 0.0;
        form
    }

    #[test]
    fn end_to_end_default_scenario() {
        let results = run_comparison(&sample_form()).expect("valid inputs");

        assert_eq!(results.time_horizon_years, 30);
        assert_eq!(results.buying_results.len(), 31);
        assert_eq!(results.renting_results.len(), 31);
        assert_eq!(results.yearly_comparisons.len(), 31);
        assert_approx(results.loan_amount, 320_000.0);
        assert_approx(results.down_payment, 80_000.0);
        assert_approx_tol(results.monthly_mortgage_payment, 1_918.56, 0.01);

        let buying0 = &results.buying_results[0];
        let renting0 = &results.renting_results[0];
        assert_approx(buying0.home_equity, 80_000.0);
        assert_approx(buying0.investment.investments_with_earnings, 0.0);
        assert_approx(buying0.total_wealth_buying, 80_000.0);
        assert_approx(renting0.investment.investments_with_earnings, 80_000.0);
        assert_approx(renting0.investment.amount_invested, 80_000.0);
        assert_approx(renting0.investment.investment_earnings, 0.0);
        assert_approx(renting0.total_wealth_renting, 80_000.0);

        for year in results.buying_results.iter().skip(1) {
            for month in &year.monthly_data {
                assert_approx_tol(month.costs.mortgage_payment, 1_918.56, 0.01);
            }
        }
        assert!(results.buying_results[30].loan_balance.abs() < 1e-6);
    }

    #[test]
    fn capital_gains_tax_applied_once_in_terminal_year() {
        let results = run_comparison(&sample_form()).expect("valid inputs");
        let horizon = results.time_horizon_years as usize;

        for (idx, (buying, renting)) in results
            .buying_results
            .iter()
            .zip(&results.renting_results)
            .enumerate()
        {
            if idx == horizon {
                continue;
            }
            assert_eq!(buying.capital_gains_tax_paid, 0.0);
            assert_eq!(renting.capital_gains_tax_paid, 0.0);
        }

        let buying = &results.buying_results[horizon];
        let renting = &results.renting_results[horizon];
        assert_approx(
            renting.capital_gains_tax_paid,
            renting.investment.investment_earnings.max(0.0) * 0.15,
        );
        assert_approx(
            buying.capital_gains_tax_paid,
            buying.investment.investment_earnings.max(0.0) * 0.15,
        );
        assert!(renting.capital_gains_tax_paid > 0.0);
        assert_approx(
            renting.total_wealth_renting,
            renting.investment.investments_with_earnings - renting.capital_gains_tax_paid,
        );
        assert_approx(
            buying.total_wealth_buying,
            buying.home_equity + buying.investment.investments_with_earnings
                - buying.capital_gains_tax_paid,
        );
        assert_approx(results.summary.final_renting_wealth, renting.total_wealth_renting);
        assert_approx(results.summary.final_buying_wealth, buying.total_wealth_buying);
    }

    #[test]
    fn oracle_first_month_contribution_goes_to_cheaper_side() {
        let results = run_comparison(&sample_form()).expect("valid inputs");
        let buying = &results.buying_results[1].monthly_data[0];
        let renting = &results.renting_results[1].monthly_data[0];

        // Buying costs mortgage + tax + insurance + maintenance, well above 2000 rent.
        let saved = buying.costs.monthly_expenses - 2_000.0;
        assert!(saved > 0.0);
        assert_eq!(buying.investment.contribution, 0.0);
        assert_approx(renting.investment.contribution, saved);

        // Return accrues on the opening balance before the month's contribution.
        let grown = 80_000.0 * 1.10_f64.powf(1.0 / 12.0);
        assert_approx(renting.investment.investments_with_earnings, grown + saved);
        assert_approx(renting.investment.amount_invested, 80_000.0 + saved);
        assert_approx(renting.investment.investment_earnings, grown - 80_000.0);
    }

    #[test]
    fn yearly_snapshot_closes_on_last_month() {
        let results = run_comparison(&sample_form()).expect("valid inputs");
        for year in results.renting_results.iter().skip(1) {
            let last = year.monthly_data.last().expect("twelve months");
            assert_approx(
                year.investment.investments_with_earnings,
                last.investment.investments_with_earnings,
            );
            let contributed = year
                .monthly_data
                .iter()
                .map(|m| m.investment.contribution)
                .sum::<f64>();
            assert_approx(year.investment.contribution, contributed);
        }
    }

    #[test]
    fn cumulative_costs_start_after_year_zero() {
        let results = run_comparison(&sample_form()).expect("valid inputs");
        let year0 = &results.yearly_comparisons[0];
        assert_eq!(year0.cumulative_buying_costs, 0.0);
        assert_eq!(year0.cumulative_renting_costs, 0.0);

        let year1 = &results.yearly_comparisons[1];
        assert_approx(year1.cumulative_renting_costs, 24_000.0);
        assert_approx(
            year1.cumulative_buying_costs,
            results.buying_results[1].total_costs(),
        );
        let year2 = &results.yearly_comparisons[2];
        assert_approx(year2.cumulative_renting_costs, 24_000.0 + 24_720.0);
        for comparison in &results.yearly_comparisons {
            assert_approx(
                comparison.difference,
                comparison.buying_wealth - comparison.renting_wealth,
            );
        }
    }

    #[test]
    fn identical_outflows_make_no_contributions() {
        let mut form = still_world_form();
        form.buying.down_payment_percent = 100.0;
        form.buying.current_savings = 500_000.0;
        form.renting.monthly_rent = 0.0;
        form.buying.custom_appreciation_rate = 3.0;
        form.investment.annual_return = 7.0;
        form.general.time_horizon_years = Some(10);

        let results = run_comparison(&form).expect("valid inputs");
        for (buying, renting) in results.buying_results.iter().zip(&results.renting_results) {
            assert_eq!(buying.investment.contribution, 0.0);
            assert_eq!(renting.investment.contribution, 0.0);
            for month in &buying.monthly_data {
                assert_eq!(month.investment.contribution, 0.0);
            }
        }

        // Both sides grow their initial balances; buying additionally holds the house.
        let year10 = &results.yearly_comparisons[10];
        let buying10 = &results.buying_results[10];
        let renting10 = &results.renting_results[10];
        assert_approx_tol(
            buying10.investment.investments_with_earnings,
            100_000.0 * 1.07_f64.powi(10),
            1e-4,
        );
        assert_approx_tol(
            renting10.investment.investments_with_earnings,
            500_000.0 * 1.07_f64.powi(10),
            1e-3,
        );
        assert_approx_tol(buying10.home_equity, 400_000.0 * 1.03_f64.powi(10), 1e-3);
        assert_approx(
            year10.difference,
            buying10.total_wealth_buying - renting10.total_wealth_renting,
        );
    }

    #[test]
    fn still_world_wealth_is_conserved() {
        let mut form = still_world_form();
        form.buying.current_savings = 100_000.0;
        form.buying.down_payment_percent = 20.0;
        form.renting.monthly_rent = 2_000.0;
        form.buying.loan_term_years = 10;

        let results = run_comparison(&form).expect("valid inputs");
        // Zero-rate mortgage: 320000 / 120 months.
        assert_approx(results.monthly_mortgage_payment, 320_000.0 / 120.0);
        let monthly_gap = 320_000.0 / 120.0 - 2_000.0;

        let last = &results.renting_results[10];
        assert_approx(last.investment.investments_with_earnings, 100_000.0 + monthly_gap * 120.0);
        assert_approx(last.capital_gains_tax_paid, 0.0);

        let buying_last = &results.buying_results[10];
        assert_approx(buying_last.home_equity, 400_000.0);
        assert_approx(buying_last.total_wealth_buying, 400_000.0 + 20_000.0);
        assert_approx(last.total_wealth_renting, 180_000.0);
        assert_eq!(results.summary.better_option, BetterOption::Buying);
        for year in &results.yearly_comparisons {
            assert!(year.buying_wealth.is_finite() && year.renting_wealth.is_finite());
        }
    }

    #[test]
    fn horizon_shorter_than_loan_term_taxes_the_horizon_year() {
        let mut form = sample_form();
        form.general.time_horizon_years = Some(5);
        let results = run_comparison(&form).expect("valid inputs");

        assert_eq!(results.buying_results.len(), 6);
        assert!(results.renting_results[5].capital_gains_tax_paid > 0.0);
        assert_eq!(results.renting_results[4].capital_gains_tax_paid, 0.0);
        assert!(results.buying_results[5].loan_balance > 0.0);
    }

    #[test]
    fn savings_gate_refuses_to_calculate() {
        let mut form = sample_form();
        form.buying.current_savings = 20_000.0;
        let err = run_comparison(&form).expect_err("insufficient savings");
        assert!(matches!(err, InputError::InsufficientSavings { .. }));

        form.general.require_savings_for_down_payment = false;
        let results = run_comparison(&form).expect("gate disabled");
        assert_approx(results.buying_results[0].investment.investments_with_earnings, 0.0);
        assert_approx(results.renting_results[0].investment.investments_with_earnings, 20_000.0);
    }

    #[test]
    fn projected_income_grows_only_when_enabled() {
        let mut form = sample_form();
        let results = run_comparison(&form).expect("valid inputs");
        assert_eq!(results.yearly_comparisons[0].projected_annual_income, 0.0);
        assert_approx(results.yearly_comparisons[5].projected_annual_income, 72_000.0);

        form.general.income_increase = true;
        let results = run_comparison(&form).expect("valid inputs");
        assert_approx(results.yearly_comparisons[1].projected_annual_income, 72_000.0);
        assert_approx(results.yearly_comparisons[2].projected_annual_income, 74_160.0);
    }

    #[test]
    fn better_option_uses_one_percent_band() {
        assert_eq!(better_option(100_000.0, 99_500.0), BetterOption::Equal);
        assert_eq!(better_option(100_000.0, 98_000.0), BetterOption::Buying);
        assert_eq!(better_option(98_000.0, 100_000.0), BetterOption::Renting);
        assert_eq!(better_option(0.0, 0.0), BetterOption::Equal);
    }

    #[test]
    fn monthly_savings_flow_favours_cheaper_side() {
        let flow = monthly_savings_flow(2_500.0, 2_000.0);
        assert_approx(flow.renting_contribution, 500.0);
        assert_eq!(flow.buying_contribution, 0.0);

        let flow = monthly_savings_flow(1_800.0, 2_000.0);
        assert_approx(flow.buying_contribution, 200.0);
        assert_eq!(flow.renting_contribution, 0.0);

        let flow = monthly_savings_flow(2_000.0, 2_000.0);
        assert_eq!(flow.buying_contribution, 0.0);
        assert_eq!(flow.renting_contribution, 0.0);
    }

    proptest! {
        #[test]
        fn degenerate_rates_stay_finite(
            down in 0.0_f64..=100.0,
            rate in 0.0_f64..10.0,
            appreciation in 0.0_f64..8.0,
            rent_increase in 0.0_f64..6.0,
            annual_return in 0.0_f64..12.0,
            horizon in 1_u32..35,
        ) {
            let mut form = sample_form();
            form.general.require_savings_for_down_payment = false;
            form.general.time_horizon_years = Some(horizon);
            form.buying.down_payment_percent = down;
            form.buying.interest_rate = rate;
            form.buying.appreciation_scenario = AppreciationScenario::Custom;
            form.buying.custom_appreciation_rate = appreciation;
            form.renting.annual_rent_increase = rent_increase;
            form.investment.annual_return = annual_return;

            let results = run_comparison(&form).expect("valid inputs");
            prop_assert!(results.summary.final_buying_wealth.is_finite());
            prop_assert!(results.summary.final_renting_wealth.is_finite());
            prop_assert!(results.summary.difference >= 0.0);
            for (buying, renting) in results.buying_results.iter().zip(&results.renting_results) {
                prop_assert!(buying.capital_gains_tax_paid >= 0.0);
                prop_assert!(renting.capital_gains_tax_paid >= 0.0);
                prop_assert!(buying.investment.investments_with_earnings >= 0.0);
                prop_assert!(renting.investment.investments_with_earnings >= 0.0);
            }
        }
    }
}
