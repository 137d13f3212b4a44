mod buying;
mod engine;
mod investment;
mod mortgage;
mod property;
mod renting;
mod solver;
mod timeline;
mod types;
mod validation;

pub use buying::{BuyingSchedule, BuyingYear, simulate_buying};
pub use engine::{EQUAL_OUTCOME_BAND, better_option, run_comparison};
pub use investment::{InvestmentAccount, capital_gains_tax, monthly_rate, monthly_return};
pub use mortgage::{Amortization, AmortizationStep, MortgageTerms};
pub use property::{
    HIGH_APPRECIATION_RATE, LOW_APPRECIATION_RATE, MEDIUM_APPRECIATION_RATE,
    appreciation_rate_percent, monthly_home_insurance, monthly_maintenance, monthly_property_tax,
};
pub use renting::{RentingSchedule, RentingYear, simulate_renting};
pub use solver::{
    DownPaymentGoal, DownPaymentPlan, GrowthMonth, GrowthYear, IncomeType, PlannerConfig,
    PlannerInputs, PlannerIteration, SavingsPlan, plan_down_payment, solve_savings_plan,
};
pub use timeline::{MONTHS_PER_YEAR, MonthIndex, months_by_year, months_of_year, total_months};
pub use types::{
    AppreciationScenario, BetterOption, BuyingInputs, BuyingMonth, ComparisonResults,
    ComparisonSummary, FormData, GeneralInputs, InvestmentInputs, InvestmentSnapshot, LoanType,
    MaintenanceCost, MonthlyBuyingDataPoint, MonthlyRentingDataPoint, RentingInputs, RentingMonth,
    YearlyBuyingResult, YearlyComparison, YearlyRentingResult,
};
pub use validation::{
    InputError, MAX_HORIZON_YEARS, format_currency, validate_form, validate_savings,
};
