use chrono::NaiveDate;

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};

/// check if year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// number of calendar days in the given month
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        4 | 6 | 9 | 11 => Ok(30),
        2 if is_leap_year(year) => Ok(29),
        2 => Ok(28),
        _ => Err(LoanError::InvalidDate {
            message: format!("month {} is not between 1 and 12", month),
        }),
    }
}

/// last calendar day of the given month
pub fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    let day = days_in_month(year, month)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| LoanError::InvalidDate {
        message: format!("{}-{:02} is outside the supported calendar", year, month),
    })
}

/// engine for accruing daily-compounded interest that is posted once a month
#[derive(Debug, Clone, Copy)]
pub struct AccrualEngine {
    daily_rate: Rate,
}

impl AccrualEngine {
    pub fn new(daily_rate: Rate) -> Self {
        Self { daily_rate }
    }

    pub fn daily_rate(&self) -> Rate {
        self.daily_rate
    }

    /// interest for a single day on the given balance
    pub fn daily_interest(&self, balance: Money) -> Money {
        balance.apply_rate(self.daily_rate)
    }

    /// compound daily over every day of the month
    ///
    /// Each day's interest is charged on the opening balance plus all interest
    /// accrued earlier in the same month.
    pub fn accrue_month(&self, balance: Money, year: i32, month: u32) -> Result<MonthlyAccrual> {
        let days = days_in_month(year, month)?;

        let mut running = balance;
        let mut interest = Money::ZERO;
        for _ in 0..days {
            let daily = self.daily_interest(running);
            running += daily;
            interest += daily;
        }

        Ok(MonthlyAccrual {
            year,
            month,
            days,
            principal_base: balance,
            interest_amount: interest,
            daily_rate: self.daily_rate,
        })
    }
}

/// monthly accrual record
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAccrual {
    pub year: i32,
    pub month: u32,
    pub days: u32,
    pub principal_base: Money,
    pub interest_amount: Money,
    pub daily_rate: Rate,
}
