use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    #[error("invalid interest rate: {rate} (must be strictly between 0% and 100%)")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("balance must not be negative: {balance}")]
    NegativeBalance {
        balance: Money,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        name: String,
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("configuration error: {message}")]
    Config {
        message: String,
    },

    #[error("output error: {message}")]
    Output {
        message: String,
    },
}

impl LoanError {
    /// true for precondition violations on caller-supplied values
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            LoanError::InvalidInterestRate { .. }
                | LoanError::NegativeBalance { .. }
                | LoanError::InvalidPaymentAmount { .. }
                | LoanError::InvalidParameter { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_class() {
        let err = LoanError::InvalidPaymentAmount { amount: Money::from_major(-1) };
        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "invalid payment amount: -1");

        let err = LoanError::CalculationError { message: "overflow".to_string() };
        assert!(!err.is_invalid_argument());
    }
}
