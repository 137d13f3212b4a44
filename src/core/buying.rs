use super::investment::monthly_rate;
use super::mortgage::{AmortizationStep, MortgageTerms};
use super::property::{
    appreciation_rate_percent, monthly_home_insurance, monthly_maintenance, monthly_property_tax,
};
use super::timeline::months_of_year;
use super::types::{BuyingInputs, BuyingMonth};

/// One year of the buying skeleton. Year 0 carries the purchase state and no months.
#[derive(Debug, Clone)]
pub struct BuyingYear {
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
    pub months: Vec<BuyingMonth>,
}

impl BuyingYear {
    pub fn total_costs(&self) -> f64 {
        self.mortgage_payment + self.property_taxes + self.home_insurance + self.maintenance_costs
    }
}

#[derive(Debug, Clone)]
pub struct BuyingSchedule {
    pub down_payment: f64,
    pub loan_amount: f64,
    pub monthly_mortgage_payment: f64,
    pub years: Vec<BuyingYear>,
}

/// Home value, loan and ownership costs for years `0..=horizon_years`.
///
/// Appreciation is applied at the start of each month and that month's costs use the appreciated
/// value. Months after the loan term carry no mortgage figures.
pub fn simulate_buying(buying: &BuyingInputs, horizon_years: u32) -> BuyingSchedule {
    let down_payment = buying.down_payment_amount();
    let loan_amount = buying.loan_amount();
    let terms = MortgageTerms {
        principal: loan_amount,
        annual_rate_percent: buying.interest_rate,
        term_years: buying.loan_term_years,
    };
    let appreciation = monthly_rate(appreciation_rate_percent(buying));

    let mut years = Vec::with_capacity(horizon_years as usize + 1);
    years.push(BuyingYear {
        year: 0,
        mortgage_payment: 0.0,
        principal_paid: 0.0,
        interest_paid: 0.0,
        loan_balance: loan_amount,
        property_taxes: 0.0,
        home_insurance: 0.0,
        maintenance_costs: 0.0,
        home_value: buying.house_price,
        home_equity: buying.house_price - loan_amount,
        months: Vec::new(),
    });

    let mut amortization = terms.schedule();
    let mut home_value = buying.house_price;

    for year in 1..=horizon_years {
        let mut months = Vec::with_capacity(12);
        for index in months_of_year(year) {
            home_value *= 1.0 + appreciation;

            let step = amortization
                .next()
                .unwrap_or_else(AmortizationStep::paid_off);
            let loan_balance = step.remaining_balance;

            let property_taxes = monthly_property_tax(home_value, buying.property_tax_rate);
            let home_insurance = monthly_home_insurance(home_value, buying.home_insurance_rate);
            let maintenance_costs = monthly_maintenance(home_value, buying.maintenance);
            let mortgage_payment = step.payment();

            months.push(BuyingMonth {
                month: index.month_of_year(),
                home_value,
                home_equity: home_value - loan_balance,
                loan_balance,
                mortgage_payment,
                principal_payment: step.principal_payment,
                interest_payment: step.interest_payment,
                property_taxes,
                home_insurance,
                maintenance_costs,
                monthly_expenses: mortgage_payment
                    + property_taxes
                    + home_insurance
                    + maintenance_costs,
            });
        }
        years.push(aggregate_year(year, months));
    }

    BuyingSchedule {
        down_payment,
        loan_amount,
        monthly_mortgage_payment: terms.monthly_payment(),
        years,
    }
}

fn aggregate_year(year: u32, months: Vec<BuyingMonth>) -> BuyingYear {
    let principal_paid = months.iter().map(|m| m.principal_payment).sum::<f64>();
    let interest_paid = months.iter().map(|m| m.interest_payment).sum::<f64>();
    let closing = months.last().copied();

    BuyingYear {
        year,
        mortgage_payment: principal_paid + interest_paid,
        principal_paid,
        interest_paid,
        loan_balance: closing.map_or(0.0, |m| m.loan_balance),
        property_taxes: months.iter().map(|m| m.property_taxes).sum(),
        home_insurance: months.iter().map(|m| m.home_insurance).sum(),
        maintenance_costs: months.iter().map(|m| m.maintenance_costs).sum(),
        home_value: closing.map_or(0.0, |m| m.home_value),
        home_equity: closing.map_or(0.0, |m| m.home_equity),
        months,
    }
}
