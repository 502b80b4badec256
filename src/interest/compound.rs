use rust_decimal::Decimal;

use crate::decimal::Rate;
use crate::errors::{LoanError, Result};

/// average calendar year length used to de-annualise the interest rate
pub const DAYS_PER_YEAR: f64 = 365.25;

pub const MONTHS_PER_YEAR: f64 = 12.0;

/// compounding frequency for geometric rate conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CompoundingFrequency {
    Daily,
    Monthly,
}

impl CompoundingFrequency {
    /// number of compounding periods per year
    pub fn periods_per_year(&self) -> f64 {
        match self {
            CompoundingFrequency::Daily => DAYS_PER_YEAR,
            CompoundingFrequency::Monthly => MONTHS_PER_YEAR,
        }
    }
}

/// geometric per-period equivalent of an annual rate: `(1 + a)^(1/n) - 1`
///
/// Evaluated in f64 so the result matches the floating-point formula
/// bit for bit before it is brought back into decimal form.
pub fn effective_period_rate(annual_rate: Rate, frequency: CompoundingFrequency) -> Result<Rate> {
    let annual = annual_rate.as_f64().ok_or_else(|| LoanError::CalculationError {
        message: format!("rate {} is not representable as f64", annual_rate),
    })?;

    let period = (1.0 + annual).powf(1.0 / frequency.periods_per_year()) - 1.0;

    Rate::from_f64(period).ok_or_else(|| LoanError::CalculationError {
        message: format!("{:?} rate derived from {} is not a finite number", frequency, annual_rate),
    })
}

/// daily rate `r_d` such that `(1 + r_d)^365.25 = 1 + a`
pub fn daily_rate_from_annual(annual_rate: Rate) -> Result<Rate> {
    effective_period_rate(annual_rate, CompoundingFrequency::Daily)
}

/// monthly repayment rate from an annual percentage of salary over the threshold,
/// e.g. 9 gives `(1.09)^(1/12) - 1`
pub fn monthly_rate_from_annual_percentage(percentage: Decimal) -> Result<Rate> {
    effective_period_rate(Rate::from_percentage(percentage), CompoundingFrequency::Monthly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_daily_rate_matches_float_formula() {
        let daily = daily_rate_from_annual(Rate::from_decimal(dec!(0.04))).unwrap();
        let expected = 1.04_f64.powf(1.0 / 365.25) - 1.0;

        assert!((daily.as_f64().unwrap() - expected).abs() < 1e-17);
    }

    #[test]
    fn test_daily_rate_compounds_back_to_annual() {
        let daily = daily_rate_from_annual(Rate::from_decimal(dec!(0.073))).unwrap();
        let annual = (1.0 + daily.as_f64().unwrap()).powf(DAYS_PER_YEAR) - 1.0;

        assert!((annual - 0.073).abs() < 1e-12);
    }

    #[test]
    fn test_monthly_repayment_rate() {
        let monthly = monthly_rate_from_annual_percentage(dec!(9)).unwrap();
        let expected = 1.09_f64.powf(1.0 / 12.0) - 1.0;

        assert!((monthly.as_f64().unwrap() - expected).abs() < 1e-17);
        // roughly 0.72% a month
        assert!(monthly.as_decimal() > dec!(0.0072));
        assert!(monthly.as_decimal() < dec!(0.0073));
    }

    #[test]
    fn test_periods_per_year() {
        assert_eq!(CompoundingFrequency::Daily.periods_per_year(), 365.25);
        assert_eq!(CompoundingFrequency::Monthly.periods_per_year(), 12.0);
    }
}
