use thiserror::Error;

use super::types::{AppreciationScenario, FormData, LoanType, MaintenanceCost};

/// Longest horizon, loan term or savings timeline accepted, in years.
pub const MAX_HORIZON_YEARS: u32 = 100;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },

    #[error("Adjustable-rate mortgages are not supported yet")]
    UnsupportedLoanType,

    #[error("{}", insufficient_savings_message(.savings, .down_payment))]
    InsufficientSavings { savings: f64, down_payment: f64 },
}

impl InputError {
    fn invalid(field: &'static str, message: &str) -> Self {
        InputError::InvalidValue {
            field,
            message: message.to_string(),
        }
    }
}

/// Checks that current savings cover the down payment.
///
/// Returns the user-facing message when they do not, `None` otherwise.
pub fn validate_savings(
    savings: f64,
    house_price: f64,
    down_payment_percent: f64,
) -> Option<String> {
    let down_payment = house_price * (down_payment_percent / 100.0);
    if savings < down_payment {
        Some(insufficient_savings_message(&savings, &down_payment))
    } else {
        None
    }
}

fn insufficient_savings_message(savings: &f64, down_payment: &f64) -> String {
    format!(
        "Your current savings ({}) are less than the required down payment ({})",
        format_currency(*savings),
        format_currency(*down_payment)
    )
}

/// Dollar amount with thousands separators; cents only when non-zero.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    match cents % 100 {
        0 => format!("{sign}${grouped}"),
        frac => format!("{sign}${grouped}.{frac:02}"),
    }
}

/// Rejects inputs the simulation cannot run with, then applies the savings gate when enabled.
pub fn validate_form(form: &FormData) -> Result<(), InputError> {
    let general = &form.general;
    let buying = &form.buying;
    let renting = &form.renting;
    let investment = &form.investment;

    if !buying.house_price.is_finite() || buying.house_price <= 0.0 {
        return Err(InputError::invalid("housePrice", "must be > 0"));
    }
    if !(0.0..=100.0).contains(&buying.down_payment_percent) {
        return Err(InputError::invalid(
            "downPaymentPercent",
            "must be between 0 and 100",
        ));
    }
    if !buying.interest_rate.is_finite() || buying.interest_rate < 0.0 {
        return Err(InputError::invalid("interestRate", "must be >= 0"));
    }
    if buying.loan_term_years == 0 {
        return Err(InputError::invalid("loanTerm", "must be > 0"));
    }
    if buying.loan_term_years > MAX_HORIZON_YEARS {
        return Err(InputError::invalid(
            "loanTerm",
            &format!("must be <= {MAX_HORIZON_YEARS}"),
        ));
    }
    if buying.loan_type == LoanType::Adjustable {
        return Err(InputError::UnsupportedLoanType);
    }
    for (field, rate) in [
        ("propertyTaxRate", buying.property_tax_rate),
        ("homeInsuranceRate", buying.home_insurance_rate),
    ] {
        if !rate.is_finite() || rate < 0.0 {
            return Err(InputError::invalid(field, "must be >= 0"));
        }
    }
    let maintenance = match buying.maintenance {
        MaintenanceCost::PercentOfValue(rate) => rate,
        MaintenanceCost::AnnualFlat(amount) => amount,
    };
    if !maintenance.is_finite() || maintenance < 0.0 {
        return Err(InputError::invalid("maintenanceCosts", "must be >= 0"));
    }
    if buying.appreciation_scenario == AppreciationScenario::Custom
        && (!buying.custom_appreciation_rate.is_finite()
            || buying.custom_appreciation_rate <= -100.0)
    {
        return Err(InputError::invalid("customAppreciationRate", "must be > -100"));
    }
    if !buying.current_savings.is_finite() || buying.current_savings < 0.0 {
        return Err(InputError::invalid("currentSavings", "must be >= 0"));
    }

    if !renting.monthly_rent.is_finite() || renting.monthly_rent < 0.0 {
        return Err(InputError::invalid("monthlyRent", "must be >= 0"));
    }
    if !renting.annual_rent_increase.is_finite() || renting.annual_rent_increase <= -100.0 {
        return Err(InputError::invalid("annualRentIncrease", "must be > -100"));
    }

    if !investment.annual_return.is_finite() || investment.annual_return <= -100.0 {
        return Err(InputError::invalid("annualReturn", "must be > -100"));
    }
    if !(0.0..=100.0).contains(&investment.capital_gains_tax_rate) {
        return Err(InputError::invalid(
            "capitalGainsTaxRate",
            "must be between 0 and 100",
        ));
    }

    if form.time_horizon_years() == 0 {
        return Err(InputError::invalid("timeHorizon", "must be > 0"));
    }
    if form.time_horizon_years() > MAX_HORIZON_YEARS {
        return Err(InputError::invalid(
            "timeHorizon",
            &format!("must be <= {MAX_HORIZON_YEARS}"),
        ));
    }
    if !general.annual_income.is_finite() || general.annual_income < 0.0 {
        return Err(InputError::invalid("annualIncome", "must be >= 0"));
    }
    if general.income_increase
        && (!general.annual_income_growth_rate.is_finite()
            || general.annual_income_growth_rate <= -100.0)
    {
        return Err(InputError::invalid("annualIncomeGrowthRate", "must be > -100"));
    }

    if general.require_savings_for_down_payment
        && validate_savings(
            buying.current_savings,
            buying.house_price,
            buying.down_payment_percent,
        )
        .is_some()
    {
        return Err(InputError::InsufficientSavings {
            savings: buying.current_savings,
            down_payment: buying.down_payment_amount(),
        });
    }

    Ok(())
}
