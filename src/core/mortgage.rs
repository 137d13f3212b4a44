use super::timeline::total_months;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MortgageTerms {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmortizationStep {
    pub principal_payment: f64,
    pub interest_payment: f64,
    pub remaining_balance: f64,
}

impl AmortizationStep {
    pub fn payment(self) -> f64 {
        self.principal_payment + self.interest_payment
    }

    pub fn paid_off() -> Self {
        Self {
            principal_payment: 0.0,
            interest_payment: 0.0,
            remaining_balance: 0.0,
        }
    }
}

impl MortgageTerms {
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 12.0 / 100.0
    }

    pub fn term_months(&self) -> u32 {
        total_months(self.term_years)
    }

    /// Fixed payment of a fully amortizing loan.
    pub fn monthly_payment(&self) -> f64 {
        let n = self.term_months();
        if self.principal <= 0.0 || n == 0 {
            return 0.0;
        }
        let r = self.monthly_rate();
        if r == 0.0 {
            return self.principal / n as f64;
        }
        // 1 - (1+r)^-n, kept accurate for tiny rates.
        let discount = -(-(n as f64) * r.ln_1p()).exp_m1();
        self.principal * r / discount
    }

    /// Principal/interest split for 1-based `month`.
    ///
    /// Replays the schedule from month 1, so the result is identical to iterating
    /// [`MortgageTerms::schedule`]. Months past the term are zero.
    pub fn amortization_for_month(&self, month: u32) -> AmortizationStep {
        if month == 0 {
            return AmortizationStep {
                principal_payment: 0.0,
                interest_payment: 0.0,
                remaining_balance: self.principal.max(0.0),
            };
        }
        self.schedule()
            .nth(month as usize - 1)
            .unwrap_or_else(AmortizationStep::paid_off)
    }

    pub fn schedule(&self) -> Amortization {
        Amortization {
            balance: self.principal.max(0.0),
            payment: self.monthly_payment(),
            rate: self.monthly_rate(),
            months_left: self.term_months(),
        }
    }
}

/// Running amortization schedule, one item per month of the term.
#[derive(Debug, Clone)]
pub struct Amortization {
    balance: f64,
    payment: f64,
    rate: f64,
    months_left: u32,
}

impl Iterator for Amortization {
    type Item = AmortizationStep;

    fn next(&mut self) -> Option<AmortizationStep> {
        if self.months_left == 0 {
            return None;
        }
        self.months_left -= 1;

        let interest_payment = self.balance * self.rate;
        let principal_payment = self.payment - interest_payment;
        self.balance = (self.balance - principal_payment).max(0.0);

        Some(AmortizationStep {
            principal_payment,
            interest_payment,
            remaining_balance: self.balance,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.months_left as usize;
        (left, Some(left))
    }
}
