use serde::Serialize;

use super::investment::{InvestmentAccount, capital_gains_tax};
use super::timeline::{months_by_year, total_months};
use super::validation::{InputError, MAX_HORIZON_YEARS};

/// Upper-bound doublings allowed while bracketing the answer.
const MAX_BRACKET_DOUBLINGS: u32 = 64;

#[derive(Debug, Clone, Copy)]
pub struct PlannerInputs {
    pub target_amount: f64,
    pub starting_balance: f64,
    pub months_to_save: u32,
    pub annual_return: f64,
    pub capital_gains_tax_rate: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct PlannerConfig {
    /// Search stops once the bracket on the monthly contribution is this narrow.
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            tolerance: 1.0,
            max_iterations: 64,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerIteration {
    pub iteration: u32,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub candidate_value: f64,
    pub after_tax_balance: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthMonth {
    pub month: u32,
    pub starting_balance: f64,
    pub contribution: f64,
    pub investment_return: f64,
    pub ending_balance: f64,
}

/// One year (possibly partial) of the savings plan.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthYear {
    pub period: u32,
    pub starting_balance: f64,
    /// Contributions made during this year.
    pub contribution: f64,
    /// Returns earned during this year.
    pub investment_return: f64,
    /// Closing balance; net of tax in the final year.
    pub ending_balance: f64,
    pub total_contributions: f64,
    pub total_returns: f64,
    pub capital_gains: f64,
    pub monthly_data: Vec<GrowthMonth>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsPlan {
    pub target_amount: f64,
    pub monthly_contribution: f64,
    pub after_tax_balance: f64,
    pub converged: bool,
    pub message: String,
    pub iterations: Vec<PlannerIteration>,
    pub schedule: Vec<GrowthYear>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IncomeType {
    Annual,
    Monthly,
}

#[derive(Debug, Clone, Copy)]
pub struct DownPaymentGoal {
    pub home_price: f64,
    pub down_payment_percent: f64,
    pub timeline_years: u32,
    pub current_savings: f64,
    pub annual_return: f64,
    pub capital_gains_tax_rate: f64,
    pub income: f64,
    pub income_type: IncomeType,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownPaymentPlan {
    pub down_payment_amount: f64,
    /// Down payment still to be covered after current savings.
    pub amount_needed: f64,
    pub monthly_income: f64,
    /// Monthly income left after the required contribution; negative when unaffordable.
    pub monthly_money_left: f64,
    #[serde(flatten)]
    pub savings_plan: SavingsPlan,
}

/// Smallest monthly contribution whose after-tax balance reaches the target.
///
/// Binary search over `[0, hi]`; the answer is always the feasible bound.
pub fn solve_savings_plan(
    inputs: PlannerInputs,
    config: PlannerConfig,
) -> Result<SavingsPlan, InputError> {
    validate_planner(inputs, config)?;

    let mut iterations = Vec::with_capacity(config.max_iterations as usize);
    let converged;
    let message;
    let monthly_contribution;

    if after_tax_balance(inputs, 0.0) >= inputs.target_amount {
        monthly_contribution = 0.0;
        converged = true;
        message = "Current savings already reach the target.".to_string();
    } else {
        let naive = (inputs.target_amount - inputs.starting_balance).max(0.0)
            / inputs.months_to_save as f64;
        let mut hi = (naive * 3.0).max(config.tolerance);
        let mut doublings = 0;
        while after_tax_balance(inputs, hi) < inputs.target_amount
            && doublings < MAX_BRACKET_DOUBLINGS
        {
            hi *= 2.0;
            doublings += 1;
        }

        if after_tax_balance(inputs, hi) < inputs.target_amount {
            monthly_contribution = hi;
            converged = false;
            message = "No feasible contribution found; returning best estimate.".to_string();
        } else {
            let mut lo = 0.0;
            let mut it = 0;
            let mut done = hi - lo <= config.tolerance;
            while !done && it < config.max_iterations {
                it += 1;
                let mid = (lo + hi) * 0.5;
                let balance = after_tax_balance(inputs, mid);
                iterations.push(PlannerIteration {
                    iteration: it,
                    lower_bound: lo,
                    upper_bound: hi,
                    candidate_value: mid,
                    after_tax_balance: balance,
                });

                if balance >= inputs.target_amount {
                    hi = mid;
                } else {
                    lo = mid;
                }
                done = hi - lo <= config.tolerance;
            }

            monthly_contribution = hi;
            converged = done;
            message = if converged {
                "Solved required monthly contribution.".to_string()
            } else {
                "Reached max iterations before tolerance was met; returning best estimate."
                    .to_string()
            };
        }
    }

    let schedule = growth_schedule(inputs, monthly_contribution);
    let after_tax = schedule.last().map_or(inputs.starting_balance, |y| y.ending_balance);
    tracing::debug!(
        monthly_contribution,
        after_tax,
        iterations = iterations.len(),
        converged,
        "savings plan solved"
    );

    Ok(SavingsPlan {
        target_amount: inputs.target_amount,
        monthly_contribution,
        after_tax_balance: after_tax,
        converged,
        message,
        iterations,
        schedule,
    })
}

/// Savings plan for a home down payment, with the income breakdown around it.
pub fn plan_down_payment(goal: DownPaymentGoal) -> Result<DownPaymentPlan, InputError> {
    if !goal.home_price.is_finite() || goal.home_price <= 0.0 {
        return Err(invalid("homePrice", "must be > 0"));
    }
    if !(0.0..=100.0).contains(&goal.down_payment_percent) {
        return Err(invalid("downPaymentPercent", "must be between 0 and 100"));
    }
    if !goal.income.is_finite() || goal.income < 0.0 {
        return Err(invalid("income", "must be >= 0"));
    }

    let down_payment_amount = goal.home_price * (goal.down_payment_percent / 100.0);
    let savings_plan = solve_savings_plan(
        PlannerInputs {
            target_amount: down_payment_amount,
            starting_balance: goal.current_savings,
            months_to_save: total_months(goal.timeline_years),
            annual_return: goal.annual_return,
            capital_gains_tax_rate: goal.capital_gains_tax_rate,
        },
        PlannerConfig::default(),
    )?;

    let monthly_income = match goal.income_type {
        IncomeType::Annual => goal.income / 12.0,
        IncomeType::Monthly => goal.income,
    };

    Ok(DownPaymentPlan {
        down_payment_amount,
        amount_needed: (down_payment_amount - goal.current_savings).max(0.0),
        monthly_income,
        monthly_money_left: monthly_income - savings_plan.monthly_contribution,
        savings_plan,
    })
}

/// Balance after `months_to_save` months of return-then-contribution, net of tax on the returns.
fn after_tax_balance(inputs: PlannerInputs, monthly_contribution: f64) -> f64 {
    let mut account = InvestmentAccount::new(inputs.starting_balance);
    for _ in 0..inputs.months_to_save {
        account.accrue(inputs.annual_return);
        account.contribute(monthly_contribution);
    }
    account.balance() - capital_gains_tax(account.earnings(), inputs.capital_gains_tax_rate)
}

fn growth_schedule(inputs: PlannerInputs, monthly_contribution: f64) -> Vec<GrowthYear> {
    let mut account = InvestmentAccount::new(inputs.starting_balance);
    let mut schedule = Vec::new();

    for (period, months) in months_by_year(inputs.months_to_save) {
        let year_start = account.balance();
        let mut monthly_data = Vec::with_capacity(months.len());
        for index in months {
            let starting_balance = account.balance();
            let investment_return = account.accrue(inputs.annual_return);
            account.contribute(monthly_contribution);
            monthly_data.push(GrowthMonth {
                month: index.month_of_year(),
                starting_balance,
                contribution: monthly_contribution,
                investment_return,
                ending_balance: account.balance(),
            });
        }

        schedule.push(GrowthYear {
            period,
            starting_balance: year_start,
            contribution: monthly_data.iter().map(|m| m.contribution).sum(),
            investment_return: monthly_data.iter().map(|m| m.investment_return).sum(),
            ending_balance: account.balance(),
            total_contributions: account.contributions(),
            total_returns: account.earnings(),
            capital_gains: 0.0,
            monthly_data,
        });
    }

    if let Some(last) = schedule.last_mut() {
        last.capital_gains = capital_gains_tax(last.total_returns, inputs.capital_gains_tax_rate);
        last.ending_balance -= last.capital_gains;
    }
    schedule
}

fn invalid(field: &'static str, message: &str) -> InputError {
    InputError::InvalidValue {
        field,
        message: message.to_string(),
    }
}

fn validate_planner(inputs: PlannerInputs, config: PlannerConfig) -> Result<(), InputError> {
    if !inputs.target_amount.is_finite() || inputs.target_amount < 0.0 {
        return Err(invalid("targetAmount", "must be >= 0"));
    }
    if !inputs.starting_balance.is_finite() || inputs.starting_balance < 0.0 {
        return Err(invalid("currentSavings", "must be >= 0"));
    }
    if inputs.months_to_save == 0 {
        return Err(invalid("timelineYears", "must be > 0"));
    }
    if inputs.months_to_save > total_months(MAX_HORIZON_YEARS) {
        return Err(invalid(
            "timelineYears",
            &format!("must be <= {MAX_HORIZON_YEARS}"),
        ));
    }
    if !inputs.annual_return.is_finite() || inputs.annual_return <= -100.0 {
        return Err(invalid("annualReturn", "must be > -100"));
    }
    if !(0.0..=100.0).contains(&inputs.capital_gains_tax_rate) {
        return Err(invalid("capitalGainsTaxRate", "must be between 0 and 100"));
    }
    if !config.tolerance.is_finite() || config.tolerance <= 0.0 {
        return Err(invalid("tolerance", "must be > 0"));
    }
    if config.max_iterations == 0 {
        return Err(invalid("maxIterations", "must be > 0"));
    }
    Ok(())
}
