use super::types::InvestmentSnapshot;

/// Monthly rate equivalent to `annual_percent` compounded twelve times.
pub fn monthly_rate(annual_percent: f64) -> f64 {
    let growth = 1.0 + annual_percent / 100.0;
    if growth <= 0.0 {
        return -1.0;
    }
    growth.powf(1.0 / 12.0) - 1.0
}

pub fn monthly_return(balance: f64, annual_percent: f64) -> f64 {
    balance * monthly_rate(annual_percent)
}

/// Flat tax on positive earnings; losses never produce a credit.
pub fn capital_gains_tax(earnings: f64, rate_percent: f64) -> f64 {
    earnings.max(0.0) * rate_percent / 100.0
}

/// Running balance of one scenario's invested savings.
///
/// Contributions are tracked apart from the balance so that earnings can be isolated for tax.
#[derive(Debug, Clone, Copy)]
pub struct InvestmentAccount {
    balance: f64,
    contributions: f64,
}

impl InvestmentAccount {
    pub fn new(initial: f64) -> Self {
        let initial = initial.max(0.0);
        Self {
            balance: initial,
            contributions: initial,
        }
    }

    /// Applies one month of growth and returns the amount earned.
    pub fn accrue(&mut self, annual_percent: f64) -> f64 {
        let earned = monthly_return(self.balance, annual_percent);
        self.balance += earned;
        earned
    }

    pub fn contribute(&mut self, amount: f64) {
        let amount = amount.max(0.0);
        self.balance += amount;
        self.contributions += amount;
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn contributions(&self) -> f64 {
        self.contributions
    }

    pub fn earnings(&self) -> f64 {
        self.balance - self.contributions
    }

    pub fn snapshot(&self, contribution: f64) -> InvestmentSnapshot {
        InvestmentSnapshot {
            contribution,
            amount_invested: self.contributions,
            investment_earnings: self.earnings(),
            investments_with_earnings: self.balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn zero_return_leaves_balance_unchanged() {
        assert_eq!(monthly_rate(0.0), 0.0);
        assert_eq!(monthly_return(10_000.0, 0.0), 0.0);
    }

    #[test]
    fn total_loss_rate_is_clamped() {
        assert_approx(monthly_rate(-100.0), -1.0);
        assert_approx(monthly_rate(-150.0), -1.0);
    }

    #[test]
    fn capital_gains_tax_only_on_positive_earnings() {
        assert_approx(capital_gains_tax(10_000.0, 15.0), 1_500.0);
        assert_eq!(capital_gains_tax(-5_000.0, 15.0), 0.0);
        assert_eq!(capital_gains_tax(0.0, 15.0), 0.0);
    }

    #[test]
    fn contribution_does_not_earn_in_its_first_month() {
        let mut account = InvestmentAccount::new(0.0);
        let earned = account.accrue(10.0);
        account.contribute(1_000.0);
        assert_eq!(earned, 0.0);
        assert_approx(account.balance(), 1_000.0);
        assert_approx(account.earnings(), 0.0);

        let earned = account.accrue(10.0);
        assert_approx(earned, 1_000.0 * monthly_rate(10.0));
        assert_approx(account.earnings(), earned);
        assert_approx(account.contributions(), 1_000.0);
    }

    #[test]
    fn snapshot_reports_cumulative_principal_and_earnings() {
        let mut account = InvestmentAccount::new(5_000.0);
        account.accrue(12.0);
        account.contribute(250.0);
        let snapshot = account.snapshot(250.0);
        assert_approx(snapshot.amount_invested, 5_250.0);
        assert_approx(
            snapshot.investments_with_earnings,
            snapshot.amount_invested + snapshot.investment_earnings,
        );
        assert_approx(snapshot.contribution, 250.0);
    }

    proptest! {
        #[test]
        fn twelve_monthly_steps_compound_to_the_annual_rate(
            annual in -50.0_f64..40.0,
            start in 1.0_f64..1_000_000.0,
        ) {
            let mut account = InvestmentAccount::new(start);
            for _ in 0..12 {
                account.accrue(annual);
            }
            let expected = start * (1.0 + annual / 100.0);
            prop_assert!((account.balance() - expected).abs() <= expected.abs() * 1e-9 + 1e-9);
        }

        #[test]
        fn tax_is_never_negative(earnings in -1e7_f64..1e7, rate in 0.0_f64..100.0) {
            prop_assert!(capital_gains_tax(earnings, rate) >= 0.0);
        }
    }
}
