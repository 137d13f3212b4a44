use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    AppreciationScenario, BuyingInputs, ComparisonResults, DownPaymentGoal, DownPaymentPlan,
    FormData, GeneralInputs, IncomeType, InputError, InvestmentInputs, LoanType, MaintenanceCost,
    MAX_HORIZON_YEARS, RentingInputs, format_currency, plan_down_payment, run_comparison,
    validate_savings,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliLoanType {
    Fixed,
    Adjustable,
}

impl From<CliLoanType> for LoanType {
    fn from(value: CliLoanType) -> Self {
        match value {
            CliLoanType::Fixed => LoanType::Fixed,
            CliLoanType::Adjustable => LoanType::Adjustable,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliAppreciation {
    Low,
    Medium,
    High,
    Custom,
}

impl From<CliAppreciation> for AppreciationScenario {
    fn from(value: CliAppreciation) -> Self {
        match value {
            CliAppreciation::Low => AppreciationScenario::Low,
            CliAppreciation::Medium => AppreciationScenario::Medium,
            CliAppreciation::High => AppreciationScenario::High,
            CliAppreciation::Custom => AppreciationScenario::Custom,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliMaintenanceMode {
    /// `--maintenance-costs` is a percent of the home value per year.
    Percent,
    /// `--maintenance-costs` is a flat amount per year.
    Flat,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliIncomeType {
    Annual,
    Monthly,
}

impl From<CliIncomeType> for IncomeType {
    fn from(value: CliIncomeType) -> Self {
        match value {
            CliIncomeType::Annual => IncomeType::Annual,
            CliIncomeType::Monthly => IncomeType::Monthly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiLoanType {
    #[serde(alias = "fixed-rate", alias = "fixedRate")]
    Fixed,
    #[serde(alias = "arm", alias = "adjustable-rate", alias = "adjustableRate")]
    Adjustable,
}

impl From<ApiLoanType> for CliLoanType {
    fn from(value: ApiLoanType) -> Self {
        match value {
            ApiLoanType::Fixed => CliLoanType::Fixed,
            ApiLoanType::Adjustable => CliLoanType::Adjustable,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiAppreciation {
    #[serde(alias = "Low")]
    Low,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
    #[serde(alias = "Custom")]
    Custom,
}

impl From<ApiAppreciation> for CliAppreciation {
    fn from(value: ApiAppreciation) -> Self {
        match value {
            ApiAppreciation::Low => CliAppreciation::Low,
            ApiAppreciation::Medium => CliAppreciation::Medium,
            ApiAppreciation::High => CliAppreciation::High,
            ApiAppreciation::Custom => CliAppreciation::Custom,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiIncomeType {
    #[serde(alias = "yearly")]
    Annual,
    Monthly,
}

impl From<ApiIncomeType> for CliIncomeType {
    fn from(value: ApiIncomeType) -> Self {
        match value {
            ApiIncomeType::Annual => CliIncomeType::Annual,
            ApiIncomeType::Monthly => CliIncomeType::Monthly,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ComparePayload {
    house_price: Option<f64>,
    down_payment_percent: Option<f64>,
    interest_rate: Option<f64>,
    #[serde(alias = "loanTermYears")]
    loan_term: Option<u32>,
    loan_type: Option<ApiLoanType>,
    property_tax_rate: Option<f64>,
    home_insurance_rate: Option<f64>,
    maintenance_costs: Option<f64>,
    use_percentage_for_maintenance: Option<bool>,
    appreciation_scenario: Option<ApiAppreciation>,
    custom_appreciation_rate: Option<f64>,
    current_savings: Option<f64>,

    monthly_rent: Option<f64>,
    annual_rent_increase: Option<f64>,

    annual_return: Option<f64>,
    capital_gains_tax_rate: Option<f64>,

    #[serde(alias = "timeHorizonYears")]
    time_horizon: Option<u32>,
    annual_income: Option<f64>,
    income_increase: Option<bool>,
    annual_income_growth_rate: Option<f64>,
    #[serde(alias = "useSavingsForDownPayment")]
    require_savings_for_down_payment: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ValidatePayload {
    current_savings: Option<f64>,
    house_price: Option<f64>,
    down_payment_percent: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DownPaymentPayload {
    #[serde(alias = "housePrice")]
    home_price: Option<f64>,
    down_payment_percent: Option<f64>,
    timeline_years: Option<u32>,
    current_savings: Option<f64>,
    #[serde(alias = "annualReturnRate")]
    annual_return: Option<f64>,
    capital_gains_tax_rate: Option<f64>,
    income: Option<f64>,
    income_type: Option<ApiIncomeType>,
}

#[derive(Parser, Debug)]
#[command(
    name = "rentbuy",
    about = "Compare the long-run wealth of buying a home against renting and investing"
)]
pub struct App {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the buy-versus-rent comparison.
    Compare(CompareCli),
    /// Solve the monthly savings needed for a down payment.
    Plan(PlanCli),
    /// Start the HTTP API.
    Serve {
        #[arg(default_value_t = 8080)]
        port: u16,
    },
}

#[derive(Args, Debug)]
struct CompareCli {
    #[arg(long, default_value_t = 400_000.0)]
    house_price: f64,
    #[arg(long, default_value_t = 20.0, help = "Down payment in percent of the price")]
    down_payment_percent: f64,
    #[arg(long, default_value_t = 6.0, help = "Annual mortgage rate in percent")]
    interest_rate: f64,
    #[arg(long, default_value_t = 30)]
    loan_term: u32,
    #[arg(long, value_enum, default_value_t = CliLoanType::Fixed)]
    loan_type: CliLoanType,
    #[arg(
        long,
        default_value_t = 1.2,
        help = "Annual property tax in percent of the home value"
    )]
    property_tax_rate: f64,
    #[arg(
        long,
        default_value_t = 0.5,
        help = "Annual home insurance in percent of the home value"
    )]
    home_insurance_rate: f64,
    #[arg(long, default_value_t = 1.0)]
    maintenance_costs: f64,
    #[arg(long, value_enum, default_value_t = CliMaintenanceMode::Percent)]
    maintenance_mode: CliMaintenanceMode,
    #[arg(long, value_enum, default_value_t = CliAppreciation::Medium)]
    appreciation: CliAppreciation,
    #[arg(
        long,
        default_value_t = 4.0,
        help = "Annual appreciation in percent, used with --appreciation custom"
    )]
    custom_appreciation_rate: f64,
    #[arg(long, default_value_t = 80_000.0)]
    current_savings: f64,

    #[arg(long, default_value_t = 2_000.0)]
    monthly_rent: f64,
    #[arg(long, default_value_t = 3.0, help = "Annual rent increase in percent")]
    annual_rent_increase: f64,

    #[arg(long, default_value_t = 10.0, help = "Annual investment return in percent")]
    annual_return: f64,
    #[arg(long, default_value_t = 15.0)]
    capital_gains_tax_rate: f64,

    #[arg(long, help = "Years to compare; defaults to --loan-term")]
    time_horizon: Option<u32>,
    #[arg(long, default_value_t = 72_000.0)]
    annual_income: f64,
    #[arg(long, default_value_t = false)]
    income_increase: bool,
    #[arg(long, default_value_t = 3.0)]
    annual_income_growth_rate: f64,
    #[arg(
        long,
        default_value_t = false,
        help = "Skip the check that current savings cover the down payment"
    )]
    allow_insufficient_savings: bool,

    #[arg(long, default_value_t = false, help = "Print the full results as JSON")]
    json: bool,
}

#[derive(Args, Debug)]
struct PlanCli {
    #[arg(long, default_value_t = 500_000.0)]
    home_price: f64,
    #[arg(long, default_value_t = 20.0)]
    down_payment_percent: f64,
    #[arg(long, default_value_t = 5)]
    timeline_years: u32,
    #[arg(long, default_value_t = 10_000.0)]
    current_savings: f64,
    #[arg(long, default_value_t = 10.0)]
    annual_return: f64,
    #[arg(long, default_value_t = 15.0)]
    capital_gains_tax_rate: f64,
    #[arg(long, default_value_t = 6_000.0, help = "Post-tax income")]
    income: f64,
    #[arg(long, value_enum, default_value_t = CliIncomeType::Monthly)]
    income_type: CliIncomeType,
    #[arg(long, default_value_t = false, help = "Print the full plan as JSON")]
    json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateResponse {
    valid: bool,
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(cli: &CompareCli) -> Result<FormData, String> {
    if cli.loan_term == 0 {
        return Err("--loan-term must be > 0".to_string());
    }

    if cli.loan_term > MAX_HORIZON_YEARS {
        return Err(format!("--loan-term must be <= {MAX_HORIZON_YEARS}"));
    }

    if cli.time_horizon == Some(0) {
        return Err("--time-horizon must be > 0".to_string());
    }

    if cli.time_horizon.is_some_and(|years| years > MAX_HORIZON_YEARS) {
        return Err(format!("--time-horizon must be <= {MAX_HORIZON_YEARS}"));
    }

    if !(0.0..=100.0).contains(&cli.down_payment_percent) {
        return Err("--down-payment-percent must be between 0 and 100".to_string());
    }

    if !(0.0..=100.0).contains(&cli.capital_gains_tax_rate) {
        return Err("--capital-gains-tax-rate must be between 0 and 100".to_string());
    }

    if cli.appreciation == CliAppreciation::Custom && cli.custom_appreciation_rate <= -100.0 {
        return Err("--custom-appreciation-rate must be > -100".to_string());
    }

    if cli.income_increase && cli.annual_income_growth_rate <= -100.0 {
        return Err("--annual-income-growth-rate must be > -100".to_string());
    }

    let maintenance = match cli.maintenance_mode {
        CliMaintenanceMode::Percent => MaintenanceCost::PercentOfValue(cli.maintenance_costs),
        CliMaintenanceMode::Flat => MaintenanceCost::AnnualFlat(cli.maintenance_costs),
    };

    Ok(FormData {
        general: GeneralInputs {
            time_horizon_years: cli.time_horizon,
            annual_income: cli.annual_income,
            income_increase: cli.income_increase,
            annual_income_growth_rate: cli.annual_income_growth_rate,
            require_savings_for_down_payment: !cli.allow_insufficient_savings,
        },
        buying: BuyingInputs {
            house_price: cli.house_price,
            down_payment_percent: cli.down_payment_percent,
            interest_rate: cli.interest_rate,
            loan_term_years: cli.loan_term,
            loan_type: cli.loan_type.into(),
            property_tax_rate: cli.property_tax_rate,
            home_insurance_rate: cli.home_insurance_rate,
            maintenance,
            appreciation_scenario: cli.appreciation.into(),
            custom_appreciation_rate: cli.custom_appreciation_rate,
            current_savings: cli.current_savings,
        },
        renting: RentingInputs {
            monthly_rent: cli.monthly_rent,
            annual_rent_increase: cli.annual_rent_increase,
        },
        investment: InvestmentInputs {
            annual_return: cli.annual_return,
            capital_gains_tax_rate: cli.capital_gains_tax_rate,
        },
    })
}

fn build_goal(cli: &PlanCli) -> Result<DownPaymentGoal, String> {
    if cli.timeline_years == 0 {
        return Err("--timeline-years must be > 0".to_string());
    }

    if cli.timeline_years > MAX_HORIZON_YEARS {
        return Err(format!("--timeline-years must be <= {MAX_HORIZON_YEARS}"));
    }

    if cli.current_savings < 0.0 {
        return Err("--current-savings must be >= 0".to_string());
    }

    if cli.income < 0.0 {
        return Err("--income must be >= 0".to_string());
    }

    Ok(DownPaymentGoal {
        home_price: cli.home_price,
        down_payment_percent: cli.down_payment_percent,
        timeline_years: cli.timeline_years,
        current_savings: cli.current_savings,
        annual_return: cli.annual_return,
        capital_gains_tax_rate: cli.capital_gains_tax_rate,
        income: cli.income,
        income_type: cli.income_type.into(),
    })
}

/// Dispatches a parsed command line.
pub async fn run_app(app: App) -> Result<(), String> {
    match app.command {
        Command::Compare(cli) => {
            let form = build_inputs(&cli)?;
            let results = run_comparison(&form).map_err(|e| e.to_string())?;
            if cli.json {
                print_json(&results)
            } else {
                print_comparison(&results);
                Ok(())
            }
        }
        Command::Plan(cli) => {
            let goal = build_goal(&cli)?;
            let plan = plan_down_payment(goal).map_err(|e| e.to_string())?;
            if cli.json {
                print_json(&plan)
            } else {
                print_plan(&plan);
                Ok(())
            }
        }
        Command::Serve { port } => run_http_server(port)
            .await
            .map_err(|e| format!("Server error: {e}")),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize output: {e}"))?;
    println!("{json}");
    Ok(())
}

fn print_comparison(results: &ComparisonResults) {
    println!(
        "Loan {} | down payment {} | mortgage {}/month over {} years",
        format_currency(results.loan_amount),
        format_currency(results.down_payment),
        format_currency(results.monthly_mortgage_payment),
        results.time_horizon_years
    );
    println!(
        "{:>4}  {:>16}  {:>16}  {:>16}",
        "year", "buying", "renting", "difference"
    );
    for year in &results.yearly_comparisons {
        println!(
            "{:>4}  {:>16}  {:>16}  {:>16}",
            year.year,
            format_currency(year.buying_wealth.round()),
            format_currency(year.renting_wealth.round()),
            format_currency(year.difference.round())
        );
    }
    let summary = &results.summary;
    println!(
        "Better option: {:?} by {}",
        summary.better_option,
        format_currency(summary.difference.round())
    );
}

fn print_plan(plan: &DownPaymentPlan) {
    println!(
        "Down payment {} ({} still needed)",
        format_currency(plan.down_payment_amount),
        format_currency(plan.amount_needed)
    );
    println!(
        "Save {}/month, leaving {} of {} monthly income",
        format_currency(plan.savings_plan.monthly_contribution),
        format_currency(plan.monthly_money_left),
        format_currency(plan.monthly_income)
    );
    for year in &plan.savings_plan.schedule {
        println!(
            "year {:>2}: balance {} (returns {}, tax {})",
            year.period,
            format_currency(year.ending_balance),
            format_currency(year.total_returns),
            format_currency(year.capital_gains)
        );
    }
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/compare",
            get(compare_get_handler).post(compare_post_handler),
        )
        .route(
            "/api/validate",
            get(validate_get_handler).post(validate_post_handler),
        )
        .route(
            "/api/down-payment",
            get(down_payment_get_handler).post(down_payment_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "rent-vs-buy HTTP API listening");
    tracing::info!("local access: http://127.0.0.1:{port}/api/compare");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn compare_get_handler(Query(payload): Query<ComparePayload>) -> Response {
    compare_handler_impl(payload)
}

async fn compare_post_handler(Json(payload): Json<ComparePayload>) -> Response {
    compare_handler_impl(payload)
}

fn compare_handler_impl(payload: ComparePayload) -> Response {
    let form = match form_from_payload(payload) {
        Ok(form) => form,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    match run_comparison(&form) {
        Ok(results) => {
            tracing::info!(
                horizon = results.time_horizon_years,
                better = ?results.summary.better_option,
                "comparison served"
            );
            json_response(StatusCode::OK, results)
        }
        Err(err) => {
            tracing::info!(error = %err, "comparison rejected");
            error_response(status_for(&err), &err.to_string())
        }
    }
}

async fn validate_get_handler(Query(payload): Query<ValidatePayload>) -> Response {
    validate_handler_impl(payload)
}

async fn validate_post_handler(Json(payload): Json<ValidatePayload>) -> Response {
    validate_handler_impl(payload)
}

fn validate_handler_impl(payload: ValidatePayload) -> Response {
    match validate_from_payload(payload) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

fn validate_from_payload(payload: ValidatePayload) -> Result<ValidateResponse, String> {
    let defaults = default_compare_cli();
    let savings = payload.current_savings.unwrap_or(defaults.current_savings);
    let house_price = payload.house_price.unwrap_or(defaults.house_price);
    let down_payment_percent = payload
        .down_payment_percent
        .unwrap_or(defaults.down_payment_percent);

    if !savings.is_finite() || savings < 0.0 {
        return Err("currentSavings must be >= 0".to_string());
    }
    if !house_price.is_finite() || house_price <= 0.0 {
        return Err("housePrice must be > 0".to_string());
    }
    if !(0.0..=100.0).contains(&down_payment_percent) {
        return Err("downPaymentPercent must be between 0 and 100".to_string());
    }

    let message = validate_savings(savings, house_price, down_payment_percent);
    Ok(ValidateResponse {
        valid: message.is_none(),
        message,
    })
}

async fn down_payment_get_handler(Query(payload): Query<DownPaymentPayload>) -> Response {
    down_payment_handler_impl(payload)
}

async fn down_payment_post_handler(Json(payload): Json<DownPaymentPayload>) -> Response {
    down_payment_handler_impl(payload)
}

fn down_payment_handler_impl(payload: DownPaymentPayload) -> Response {
    let goal = match goal_from_payload(payload) {
        Ok(goal) => goal,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    match plan_down_payment(goal) {
        Ok(plan) => {
            tracing::info!(
                monthly_contribution = plan.savings_plan.monthly_contribution,
                converged = plan.savings_plan.converged,
                "down payment plan served"
            );
            json_response(StatusCode::OK, plan)
        }
        Err(err) => error_response(status_for(&err), &err.to_string()),
    }
}

fn status_for(err: &InputError) -> StatusCode {
    match err {
        InputError::InsufficientSavings { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        InputError::InvalidValue { .. } | InputError::UnsupportedLoanType => {
            StatusCode::BAD_REQUEST
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn form_from_json(json: &str) -> Result<FormData, String> {
    let payload = serde_json::from_str::<ComparePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    form_from_payload(payload)
}

fn form_from_payload(payload: ComparePayload) -> Result<FormData, String> {
    let mut cli = default_compare_cli();

    if let Some(v) = payload.house_price {
        cli.house_price = v;
    }
    if let Some(v) = payload.down_payment_percent {
        cli.down_payment_percent = v;
    }
    if let Some(v) = payload.interest_rate {
        cli.interest_rate = v;
    }
    if let Some(v) = payload.loan_term {
        cli.loan_term = v;
    }
    if let Some(v) = payload.loan_type {
        cli.loan_type = v.into();
    }
    if let Some(v) = payload.property_tax_rate {
        cli.property_tax_rate = v;
    }
    if let Some(v) = payload.home_insurance_rate {
        cli.home_insurance_rate = v;
    }
    if let Some(v) = payload.maintenance_costs {
        cli.maintenance_costs = v;
    }
    if let Some(v) = payload.use_percentage_for_maintenance {
        cli.maintenance_mode = if v {
            CliMaintenanceMode::Percent
        } else {
            CliMaintenanceMode::Flat
        };
    }
    if let Some(v) = payload.appreciation_scenario {
        cli.appreciation = v.into();
    }
    if let Some(v) = payload.custom_appreciation_rate {
        cli.custom_appreciation_rate = v;
    }
    if let Some(v) = payload.current_savings {
        cli.current_savings = v;
    }

    if let Some(v) = payload.monthly_rent {
        cli.monthly_rent = v;
    }
    if let Some(v) = payload.annual_rent_increase {
        cli.annual_rent_increase = v;
    }

    if let Some(v) = payload.annual_return {
        cli.annual_return = v;
    }
    if let Some(v) = payload.capital_gains_tax_rate {
        cli.capital_gains_tax_rate = v;
    }

    if payload.time_horizon.is_some() {
        cli.time_horizon = payload.time_horizon;
    }
    if let Some(v) = payload.annual_income {
        cli.annual_income = v;
    }
    if let Some(v) = payload.income_increase {
        cli.income_increase = v;
    }
    if let Some(v) = payload.annual_income_growth_rate {
        cli.annual_income_growth_rate = v;
    }
    if let Some(v) = payload.require_savings_for_down_payment {
        cli.allow_insufficient_savings = !v;
    }

    build_inputs(&cli).map_err(flag_to_camel)
}

fn goal_from_payload(payload: DownPaymentPayload) -> Result<DownPaymentGoal, String> {
    let mut cli = default_plan_cli();

    if let Some(v) = payload.home_price {
        cli.home_price = v;
    }
    if let Some(v) = payload.down_payment_percent {
        cli.down_payment_percent = v;
    }
    if let Some(v) = payload.timeline_years {
        cli.timeline_years = v;
    }
    if let Some(v) = payload.current_savings {
        cli.current_savings = v;
    }
    if let Some(v) = payload.annual_return {
        cli.annual_return = v;
    }
    if let Some(v) = payload.capital_gains_tax_rate {
        cli.capital_gains_tax_rate = v;
    }
    if let Some(v) = payload.income {
        cli.income = v;
    }
    if let Some(v) = payload.income_type {
        cli.income_type = v.into();
    }

    build_goal(&cli).map_err(flag_to_camel)
}

/// Rewrites a leading `--kebab-flag` in a CLI message to the matching camelCase API key.
fn flag_to_camel(msg: String) -> String {
    let Some(rest) = msg.strip_prefix("--") else {
        return msg;
    };
    let (flag, tail) = rest.split_once(' ').unwrap_or((rest, ""));
    let mut key = String::with_capacity(flag.len());
    let mut upper = false;
    for ch in flag.chars() {
        if ch == '-' {
            upper = true;
        } else if upper {
            key.extend(ch.to_uppercase());
            upper = false;
        } else {
            key.push(ch);
        }
    }
    if tail.is_empty() {
        key
    } else {
        format!("{key} {tail}")
    }
}

fn default_compare_cli() -> CompareCli {
    CompareCli {
        house_price: 400_000.0,
        down_payment_percent: 20.0,
        interest_rate: 6.0,
        loan_term: 30,
        loan_type: CliLoanType::Fixed,
        property_tax_rate: 1.2,
        home_insurance_rate: 0.5,
        maintenance_costs: 1.0,
        maintenance_mode: CliMaintenanceMode::Percent,
        appreciation: CliAppreciation::Medium,
        custom_appreciation_rate: 4.0,
        current_savings: 80_000.0,
        monthly_rent: 2_000.0,
        annual_rent_increase: 3.0,
        annual_return: 10.0,
        capital_gains_tax_rate: 15.0,
        time_horizon: None,
        annual_income: 72_000.0,
        income_increase: false,
        annual_income_growth_rate: 3.0,
        allow_insufficient_savings: false,
        json: true,
    }
}

fn default_plan_cli() -> PlanCli {
    PlanCli {
        home_price: 500_000.0,
        down_payment_percent: 20.0,
        timeline_years: 5,
        current_savings: 10_000.0,
        annual_return: 10.0,
        capital_gains_tax_rate: 15.0,
        income: 6_000.0,
        income_type: CliIncomeType::Monthly,
        json: true,
    }
}
