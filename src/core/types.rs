use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LoanType {
    Fixed,
    /// Accepted as input but rejected by validation; only fixed-rate loans are simulated.
    Adjustable,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AppreciationScenario {
    Low,
    Medium,
    High,
    Custom,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MaintenanceCost {
    /// Annual maintenance as a percent of the current home value.
    PercentOfValue(f64),
    /// Flat annual maintenance amount.
    AnnualFlat(f64),
}

#[derive(Debug, Clone)]
pub struct GeneralInputs {
    /// `None` means the horizon equals the loan term.
    pub time_horizon_years: Option<u32>,
    pub annual_income: f64,
    pub income_increase: bool,
    pub annual_income_growth_rate: f64,
    pub require_savings_for_down_payment: bool,
}

#[derive(Debug, Clone)]
pub struct BuyingInputs {
    pub house_price: f64,
    pub down_payment_percent: f64,
    pub interest_rate: f64,
    pub loan_term_years: u32,
    pub loan_type: LoanType,
    pub property_tax_rate: f64,
    pub home_insurance_rate: f64,
    pub maintenance: MaintenanceCost,
    pub appreciation_scenario: AppreciationScenario,
    pub custom_appreciation_rate: f64,
    pub current_savings: f64,
}

impl BuyingInputs {
    pub fn down_payment_amount(&self) -> f64 {
        self.house_price * self.down_payment_percent.clamp(0.0, 100.0) / 100.0
    }

    pub fn loan_amount(&self) -> f64 {
        (self.house_price - self.down_payment_amount()).max(0.0)
    }
}

#[derive(Debug, Clone)]
pub struct RentingInputs {
    pub monthly_rent: f64,
    pub annual_rent_increase: f64,
}

#[derive(Debug, Clone)]
pub struct InvestmentInputs {
    pub annual_return: f64,
    pub capital_gains_tax_rate: f64,
}

#[derive(Debug, Clone)]
pub struct FormData {
    pub general: GeneralInputs,
    pub buying: BuyingInputs,
    pub renting: RentingInputs,
    pub investment: InvestmentInputs,
}

impl FormData {
    pub fn time_horizon_years(&self) -> u32 {
        self.general
            .time_horizon_years
            .unwrap_or(self.buying.loan_term_years)
    }
}

/// Investment state of one scenario at the close of a month or year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentSnapshot {
    /// New principal added in the period.
    pub contribution: f64,
    /// Cumulative principal including the initial balance.
    pub amount_invested: f64,
    pub investment_earnings: f64,
    pub investments_with_earnings: f64,
}

/// Housing state and costs of one buying month, before investments are attached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyingMonth {
    pub month: u32,
    pub home_value: f64,
    pub home_equity: f64,
    pub loan_balance: f64,
    pub mortgage_payment: f64,
    pub principal_payment: f64,
    pub interest_payment: f64,
    pub property_taxes: f64,
    pub home_insurance: f64,
    pub maintenance_costs: f64,
    pub monthly_expenses: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentingMonth {
    pub month: u32,
    pub rent: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBuyingDataPoint {
    #[serde(flatten)]
    pub costs: BuyingMonth,
    #[serde(flatten)]
    pub investment: InvestmentSnapshot,
    pub total_wealth_buying: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRentingDataPoint {
    #[serde(flatten)]
    pub costs: RentingMonth,
    #[serde(flatten)]
    pub investment: InvestmentSnapshot,
    pub total_wealth_renting: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyBuyingResult {
    pub year: u32,
    pub mortgage_payment: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub loan_balance: f64,
    pub property_taxes: f64,
    pub home_insurance: f64,
    pub maintenance_costs: f64,
    pub home_value: f64,
    pub home_equity: f64,
    #[serde(flatten)]
    pub investment: InvestmentSnapshot,
    pub capital_gains_tax_paid: f64,
    pub total_wealth_buying: f64,
    pub monthly_data: Vec<MonthlyBuyingDataPoint>,
}

impl YearlyBuyingResult {
    pub fn total_costs(&self) -> f64 {
        self.mortgage_payment + self.property_taxes + self.home_insurance + self.maintenance_costs
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyRentingResult {
    pub year: u32,
    pub total_rent: f64,
    pub monthly_rent: f64,
    #[serde(flatten)]
    pub investment: InvestmentSnapshot,
    pub capital_gains_tax_paid: f64,
    pub total_wealth_renting: f64,
    pub monthly_data: Vec<MonthlyRentingDataPoint>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyComparison {
    pub year: u32,
    pub buying_wealth: f64,
    pub renting_wealth: f64,
    pub difference: f64,
    pub cumulative_buying_costs: f64,
    pub cumulative_renting_costs: f64,
    pub buying_contributions: f64,
    pub renting_contributions: f64,
    pub projected_annual_income: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BetterOption {
    Buying,
    Renting,
    Equal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub final_buying_wealth: f64,
    pub final_renting_wealth: f64,
    /// Absolute difference between the two final figures.
    pub difference: f64,
    pub better_option: BetterOption,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResults {
    pub time_horizon_years: u32,
    pub down_payment: f64,
    pub loan_amount: f64,
    pub monthly_mortgage_payment: f64,
    pub yearly_comparisons: Vec<YearlyComparison>,
    pub buying_results: Vec<YearlyBuyingResult>,
    pub renting_results: Vec<YearlyRentingResult>,
    pub summary: ComparisonSummary,
}
