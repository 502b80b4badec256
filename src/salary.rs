use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};

/// salary that grows once a year at a rate which itself decays each year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryProjection {
    salary: Money,
    growth_rate: Rate,
    annealing_rate: Rate,
}

impl SalaryProjection {
    /// `annealing_rate` must lie in [0, 1]; 0.9 shrinks the growth rate by 10% a year
    pub fn new(salary: Money, growth_rate: Rate, annealing_rate: Rate) -> Result<Self> {
        if salary.is_negative() {
            return Err(LoanError::InvalidParameter {
                name: "salary".to_string(),
                message: format!("must not be negative, got {}", salary),
            });
        }
        if growth_rate < Rate::ZERO {
            return Err(LoanError::InvalidParameter {
                name: "salary_growth_rate".to_string(),
                message: format!("must not be negative, got {}", growth_rate),
            });
        }
        if annealing_rate < Rate::ZERO || annealing_rate > Rate::ONE {
            return Err(LoanError::InvalidParameter {
                name: "salary_growth_annealing_rate".to_string(),
                message: format!("must be between 0% and 100%, got {}", annealing_rate),
            });
        }

        Ok(Self { salary, growth_rate, annealing_rate })
    }

    pub fn salary(&self) -> Money {
        self.salary
    }

    pub fn growth_rate(&self) -> Rate {
        self.growth_rate
    }

    /// year-end step: grow the salary, then anneal the growth rate
    pub fn advance_year(&mut self) {
        self.salary = self.salary.grow(self.growth_rate);
        self.growth_rate = (self.growth_rate * self.annealing_rate).max(Rate::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_growth_then_annealing() {
        let mut projection = SalaryProjection::new(
            Money::from_major(30_000),
            Rate::from_decimal(dec!(0.10)),
            Rate::from_decimal(dec!(0.5)),
        )
        .unwrap();

        projection.advance_year();
        assert_eq!(projection.salary(), Money::from_major(33_000));
        assert_eq!(projection.growth_rate(), Rate::from_decimal(dec!(0.05)));

        projection.advance_year();
        assert_eq!(projection.salary(), Money::from_major(34_650));
        assert_eq!(projection.growth_rate(), Rate::from_decimal(dec!(0.025)));
    }

    #[test]
    fn test_growth_rate_never_increases() {
        let mut projection = SalaryProjection::new(
            Money::from_major(30_000),
            Rate::from_decimal(dec!(0.04)),
            Rate::from_decimal(dec!(0.9)),
        )
        .unwrap();

        let mut previous = projection.growth_rate();
        for _ in 0..40 {
            projection.advance_year();
            assert!(projection.growth_rate() <= previous);
            assert!(projection.growth_rate() >= Rate::ZERO);
            previous = projection.growth_rate();
        }
    }

    #[test]
    fn test_zero_annealing_stops_growth_after_first_year() {
        let mut projection = SalaryProjection::new(
            Money::from_major(30_000),
            Rate::from_decimal(dec!(0.03)),
            Rate::ZERO,
        )
        .unwrap();

        projection.advance_year();
        projection.advance_year();
        assert_eq!(projection.salary(), Money::from_major(30_900));
    }

    #[test]
    fn test_rejects_annealing_above_one() {
        let result = SalaryProjection::new(
            Money::from_major(30_000),
            Rate::from_decimal(dec!(0.03)),
            Rate::from_decimal(dec!(1.1)),
        );
        assert!(matches!(result, Err(LoanError::InvalidParameter { .. })));
    }
}
