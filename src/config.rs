use std::fmt::Display;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::simulation::SimulationParameters;

/// Plan 2 repayment terms (England, courses started 2012-2022)
pub mod plan2 {
    use crate::decimal::Money;

    /// annual salary below which nothing is repaid
    pub const REPAYMENT_THRESHOLD: i64 = 27_295;

    /// years after the first repayment year before the balance is written off
    pub const LOAN_LENGTH_YEARS: u32 = 30;

    pub fn repayment_threshold() -> Money {
        Money::from_major(REPAYMENT_THRESHOLD)
    }
}

/// bounds and defaults for operator input
pub mod limits {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    pub const MIN_SALARY: i64 = 0;
    pub const MAX_SALARY: i64 = 1_000_000;
    pub const DEFAULT_SALARY: i64 = 30_000;

    pub const MIN_OWABLE: i64 = 0;
    pub const MAX_OWABLE: i64 = 500_000;
    pub const DEFAULT_OWABLE: i64 = 50_000;

    pub const EARLIEST_GRADUATION_YEAR: i32 = 2012;
    pub const LATEST_GRADUATION_YEAR: i32 = 2025;
    pub const DEFAULT_GRADUATION_YEAR: i32 = 2020;

    pub const MIN_REPAYMENT_PERCENTAGE: u32 = 9;
    pub const MAX_REPAYMENT_PERCENTAGE: u32 = 30;
    pub const DEFAULT_REPAYMENT_PERCENTAGE: u32 = 9;

    pub const MIN_GROWTH_RATE_PERC: u32 = 0;
    pub const MAX_GROWTH_RATE_PERC: u32 = 20;
    pub const DEFAULT_GROWTH_RATE_PERC: u32 = 3;

    pub const MIN_GROWTH_ANNEALING_RATE_PERC: u32 = 0;
    pub const MAX_GROWTH_ANNEALING_RATE_PERC: u32 = 100;
    pub const DEFAULT_GROWTH_ANNEALING_RATE_PERC: u32 = 90;

    pub const MIN_INTEREST_RATE_PERC: Decimal = dec!(0.1);
    pub const MAX_INTEREST_RATE_PERC: Decimal = dec!(10);
    pub const DEFAULT_INTEREST_RATE_PERC: Decimal = dec!(4.3);
}

/// operator inputs for a forecast, percentages as stated (9 for 9%)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub salary: Money,
    /// balance owed today
    pub balance: Money,
    pub graduation_year: i32,
    /// percentage of salary over the threshold repaid each year
    pub repayment_percentage: Decimal,
    /// one-off payment made today
    pub lump_sum: Money,
    pub salary_growth_percentage: Decimal,
    /// percentage of last year's growth rate kept each year
    pub salary_growth_annealing_percentage: Decimal,
    pub interest_rate_percentage: Decimal,
    pub repayment_threshold: Money,
    pub loan_term_years: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            salary: Money::from_major(limits::DEFAULT_SALARY),
            balance: Money::from_major(limits::DEFAULT_OWABLE),
            graduation_year: limits::DEFAULT_GRADUATION_YEAR,
            repayment_percentage: Decimal::from(limits::DEFAULT_REPAYMENT_PERCENTAGE),
            lump_sum: Money::ZERO,
            salary_growth_percentage: Decimal::from(limits::DEFAULT_GROWTH_RATE_PERC),
            salary_growth_annealing_percentage: Decimal::from(limits::DEFAULT_GROWTH_ANNEALING_RATE_PERC),
            interest_rate_percentage: limits::DEFAULT_INTEREST_RATE_PERC,
            repayment_threshold: plan2::repayment_threshold(),
            loan_term_years: plan2::LOAN_LENGTH_YEARS,
        }
    }
}

impl ForecastConfig {
    /// plan 2 defaults for a borrower's salary, balance and graduation year
    pub fn plan2(salary: Money, balance: Money, graduation_year: i32) -> Self {
        Self {
            salary,
            balance,
            graduation_year,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LoanError::Config {
            message: format!("failed to parse configuration: {}", e),
        })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| LoanError::Config {
            message: format!("failed to read '{}': {}", path.display(), e),
        })?;
        Self::from_json_str(&contents)
    }

    /// repayments start the april after graduating
    pub fn first_repayment_year(&self) -> i32 {
        self.graduation_year + 1
    }

    /// whole years of the term remaining as of `current_year`
    pub fn years_left_to_pay(&self, current_year: i32) -> i32 {
        let years_paid = current_year - self.first_repayment_year();
        self.loan_term_years as i32 - years_paid
    }

    /// check every input against the operator bounds
    pub fn validate(&self) -> Result<()> {
        check_range(
            "salary",
            self.salary,
            Money::from_major(limits::MIN_SALARY),
            Money::from_major(limits::MAX_SALARY),
        )?;
        check_range(
            "balance",
            self.balance,
            Money::from_major(limits::MIN_OWABLE),
            Money::from_major(limits::MAX_OWABLE),
        )?;
        check_range(
            "graduation_year",
            self.graduation_year,
            limits::EARLIEST_GRADUATION_YEAR,
            limits::LATEST_GRADUATION_YEAR,
        )?;
        check_range(
            "repayment_percentage",
            self.repayment_percentage,
            Decimal::from(limits::MIN_REPAYMENT_PERCENTAGE),
            Decimal::from(limits::MAX_REPAYMENT_PERCENTAGE),
        )?;
        check_range("lump_sum", self.lump_sum, Money::ZERO, self.balance)?;
        check_range(
            "salary_growth_percentage",
            self.salary_growth_percentage,
            Decimal::from(limits::MIN_GROWTH_RATE_PERC),
            Decimal::from(limits::MAX_GROWTH_RATE_PERC),
        )?;
        check_range(
            "salary_growth_annealing_percentage",
            self.salary_growth_annealing_percentage,
            Decimal::from(limits::MIN_GROWTH_ANNEALING_RATE_PERC),
            Decimal::from(limits::MAX_GROWTH_ANNEALING_RATE_PERC),
        )?;
        check_range(
            "interest_rate_percentage",
            self.interest_rate_percentage,
            limits::MIN_INTEREST_RATE_PERC,
            limits::MAX_INTEREST_RATE_PERC,
        )?;

        if self.repayment_threshold.is_negative() {
            return Err(LoanError::InvalidParameter {
                name: "repayment_threshold".to_string(),
                message: format!("must not be negative, got {}", self.repayment_threshold),
            });
        }
        if self.loan_term_years == 0 {
            return Err(LoanError::InvalidParameter {
                name: "loan_term_years".to_string(),
                message: "must be at least one year".to_string(),
            });
        }

        Ok(())
    }

    /// validate and convert percentages to the fractions the engine expects
    pub fn to_parameters(&self) -> Result<SimulationParameters> {
        self.validate()?;

        Ok(SimulationParameters {
            balance: self.balance,
            lump_sum: self.lump_sum,
            salary: self.salary,
            annual_repayment_rate: Rate::from_percentage(self.repayment_percentage),
            salary_growth_rate: Rate::from_percentage(self.salary_growth_percentage),
            salary_growth_annealing_rate: Rate::from_percentage(self.salary_growth_annealing_percentage),
            first_repayment_year: self.first_repayment_year(),
            loan_term_years: self.loan_term_years,
            repayment_threshold: self.repayment_threshold,
            annual_interest_rate: Rate::from_percentage(self.interest_rate_percentage),
        })
    }
}

fn check_range<T: PartialOrd + Display>(name: &str, value: T, min: T, max: T) -> Result<()> {
    if value < min || value > max {
        return Err(LoanError::InvalidParameter {
            name: name.to_string(),
            message: format!("{} is outside {}..={}", value, min, max),
        });
    }
    Ok(())
}
