use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::interest::monthly_rate_from_annual_percentage;

/// income-contingent payment for one month
///
/// Nothing is due below the threshold; above it the borrower pays
/// `monthly_rate` of the excess, never more than the outstanding balance.
pub fn calculate_payment(
    salary: Money,
    monthly_rate: Rate,
    threshold: Money,
    balance: Money,
) -> Money {
    if salary < threshold {
        return Money::ZERO;
    }

    (salary - threshold).apply_rate(monthly_rate).min(balance)
}

/// repayment terms: the salary threshold and the monthly rate on earnings above it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepaymentPolicy {
    pub threshold: Money,
    pub monthly_rate: Rate,
}

impl RepaymentPolicy {
    pub fn new(threshold: Money, monthly_rate: Rate) -> Result<Self> {
        if threshold.is_negative() {
            return Err(LoanError::InvalidParameter {
                name: "repayment_threshold".to_string(),
                message: format!("must not be negative, got {}", threshold),
            });
        }
        if monthly_rate < Rate::ZERO {
            return Err(LoanError::InvalidParameter {
                name: "monthly_repayment_rate".to_string(),
                message: format!("must not be negative, got {}", monthly_rate),
            });
        }

        Ok(Self { threshold, monthly_rate })
    }

    /// build from the annual percentage of salary over the threshold (9 for 9%)
    pub fn from_annual_percentage(threshold: Money, percentage: Decimal) -> Result<Self> {
        let monthly_rate = monthly_rate_from_annual_percentage(percentage)?;
        Self::new(threshold, monthly_rate)
    }

    pub fn payment_due(&self, salary: Money, balance: Money) -> Money {
        calculate_payment(salary, self.monthly_rate, self.threshold, balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rate() -> Rate {
        Rate::from_decimal(dec!(0.01))
    }

    #[test]
    fn test_nothing_due_below_threshold() {
        let payment = calculate_payment(
            Money::from_major(20_000),
            rate(),
            Money::from_major(27_295),
            Money::from_major(50_000),
        );
        assert_eq!(payment, Money::ZERO);
    }

    #[test]
    fn test_salary_at_threshold_pays_zero_excess() {
        let payment = calculate_payment(
            Money::from_major(27_295),
            rate(),
            Money::from_major(27_295),
            Money::from_major(50_000),
        );
        assert_eq!(payment, Money::ZERO);
    }

    #[test]
    fn test_pays_rate_on_excess() {
        let payment = calculate_payment(
            Money::from_major(40_000),
            rate(),
            Money::from_major(27_295),
            Money::from_major(50_000),
        );
        assert_eq!(payment, Money::from_str_exact("127.05").unwrap());
    }

    #[test]
    fn test_capped_at_balance() {
        let balance = Money::from_str_exact("42.10").unwrap();
        let payment = calculate_payment(
            Money::from_major(40_000),
            rate(),
            Money::from_major(27_295),
            balance,
        );
        assert_eq!(payment, balance);
    }

    #[test]
    fn test_policy_from_annual_percentage() {
        let policy =
            RepaymentPolicy::from_annual_percentage(Money::from_major(27_295), dec!(9)).unwrap();
        let expected = 1.09_f64.powf(1.0 / 12.0) - 1.0;

        assert!((policy.monthly_rate.as_f64().unwrap() - expected).abs() < 1e-17);

        let due = policy.payment_due(Money::from_major(40_000), Money::from_major(50_000));
        assert_eq!(due, Money::from_major(12_705).apply_rate(policy.monthly_rate));
    }

    #[test]
    fn test_policy_rejects_negative_threshold() {
        let result = RepaymentPolicy::new(Money::from_major(-1), rate());
        assert!(matches!(result, Err(LoanError::InvalidParameter { .. })));
    }
}
