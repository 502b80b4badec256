use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a forecast run
pub type ForecastId = Uuid;

/// one row of the forecast: the lump sum, or a single calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub date: NaiveDate,
    /// interest posted this period
    pub interest: Money,
    /// salary at the start of the period
    pub salary: Money,
    pub payment: Money,
    /// balance after the payment
    pub balance: Money,
}

/// how the loan ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanOutcome {
    /// fully repaid
    Settled { date: NaiveDate },
    /// term expired with a balance left, which is forgiven
    WrittenOff { date: NaiveDate, amount: Money },
}

impl LoanOutcome {
    pub fn date(&self) -> NaiveDate {
        match self {
            LoanOutcome::Settled { date } | LoanOutcome::WrittenOff { date, .. } => *date,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, LoanOutcome::Settled { .. })
    }

    pub fn written_off_amount(&self) -> Money {
        match self {
            LoanOutcome::Settled { .. } => Money::ZERO,
            LoanOutcome::WrittenOff { amount, .. } => *amount,
        }
    }
}

/// grouping used when summarising a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AggregationPeriod {
    #[default]
    Year,
    Month,
}
