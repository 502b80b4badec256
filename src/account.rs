use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::interest::{daily_rate_from_annual, AccrualEngine};

/// outstanding student loan balance with daily-compounded, monthly-posted interest
#[derive(Debug, Clone)]
pub struct LoanAccount {
    balance: Money,
    annual_interest_rate: Rate,
    accrual: AccrualEngine,
}

impl LoanAccount {
    /// open an account; the rate must be strictly between 0 and 1
    pub fn new(balance: Money, annual_interest_rate: Rate) -> Result<Self> {
        if annual_interest_rate <= Rate::ZERO || annual_interest_rate >= Rate::ONE {
            return Err(LoanError::InvalidInterestRate {
                rate: annual_interest_rate,
            });
        }

        if balance.is_negative() {
            return Err(LoanError::NegativeBalance { balance });
        }

        let daily_rate = daily_rate_from_annual(annual_interest_rate)?;

        Ok(Self {
            balance,
            annual_interest_rate,
            accrual: AccrualEngine::new(daily_rate),
        })
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn annual_interest_rate(&self) -> Rate {
        self.annual_interest_rate
    }

    pub fn daily_interest_rate(&self) -> Rate {
        self.accrual.daily_rate()
    }

    /// post a month of daily-compounded interest to the balance and return it
    pub fn accrue_monthly_interest(&mut self, month: u32, year: i32) -> Result<Money> {
        let accrual = self.accrual.accrue_month(self.balance, year, month)?;
        self.balance += accrual.interest_amount;
        Ok(accrual.interest_amount)
    }

    /// reduce the balance by `amount`
    ///
    /// The balance is not clamped: paying more than is owed leaves it negative.
    pub fn pay(&mut self, amount: Money) -> Result<()> {
        if amount.is_negative() {
            return Err(LoanError::InvalidPaymentAmount { amount });
        }

        self.balance -= amount;
        Ok(())
    }

    /// nothing left to repay
    pub fn is_settled(&self) -> bool {
        !self.balance.is_positive()
    }
}
