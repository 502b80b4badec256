use chrono::{Datelike, NaiveDate};
use hourglass_rs::SafeTimeProvider;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::account::LoanAccount;
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::events::{Event, EventStore};
use crate::interest::{effective_period_rate, last_day_of_month, CompoundingFrequency};
use crate::payments::RepaymentPolicy;
use crate::salary::SalaryProjection;
use crate::types::{ForecastId, LoanOutcome, PeriodRecord};

/// scalar inputs for one forecast run; rates are fractions (0.09 for 9%)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// balance owed today, before any lump sum
    pub balance: Money,
    pub lump_sum: Money,
    pub salary: Money,
    /// share of salary over the threshold repaid per year
    pub annual_repayment_rate: Rate,
    pub salary_growth_rate: Rate,
    pub salary_growth_annealing_rate: Rate,
    pub first_repayment_year: i32,
    pub loan_term_years: u32,
    pub repayment_threshold: Money,
    pub annual_interest_rate: Rate,
}

impl SimulationParameters {
    /// last calendar year in which repayments are collected
    pub fn final_repayment_year(&self) -> Result<i32> {
        i32::try_from(self.loan_term_years)
            .ok()
            .and_then(|term| self.first_repayment_year.checked_add(term))
            .ok_or_else(|| LoanError::InvalidParameter {
                name: "loan_term_years".to_string(),
                message: format!("{} years is out of range", self.loan_term_years),
            })
    }

    /// geometric monthly equivalent of the annual repayment rate
    pub fn monthly_repayment_rate(&self) -> Result<Rate> {
        effective_period_rate(self.annual_repayment_rate, CompoundingFrequency::Monthly)
    }
}

/// result of a forecast run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub id: ForecastId,
    pub start_date: NaiveDate,
    pub parameters: SimulationParameters,
    /// lump-sum record first, then one record per month
    pub records: Vec<PeriodRecord>,
    pub events: EventStore,
    pub outcome: LoanOutcome,
}

impl Forecast {
    pub fn records(&self) -> &[PeriodRecord] {
        &self.records
    }

    /// monthly periods only, without the opening lump-sum record
    pub fn monthly_records(&self) -> &[PeriodRecord] {
        self.records.get(1..).unwrap_or(&[])
    }

    pub fn final_balance(&self) -> Money {
        self.records
            .last()
            .map(|r| r.balance)
            .unwrap_or(Money::ZERO)
    }
}

/// drives the monthly repayment loop
pub struct SimulationEngine {
    params: SimulationParameters,
}

impl SimulationEngine {
    pub fn new(params: SimulationParameters) -> Self {
        Self { params }
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    /// run starting today according to the time provider
    ///
    /// The clock is read once; everything after that is a pure function of
    /// the parameters and that date.
    pub fn run(&self, time_provider: &SafeTimeProvider) -> Result<Forecast> {
        self.run_from(time_provider.now().date_naive())
    }

    /// run starting on an explicit date
    pub fn run_from(&self, start_date: NaiveDate) -> Result<Forecast> {
        let params = &self.params;
        let forecast_id = Uuid::new_v4();
        let mut events = EventStore::new();

        if params.lump_sum.is_negative() {
            return Err(LoanError::InvalidPaymentAmount {
                amount: params.lump_sum,
            });
        }

        let mut account = LoanAccount::new(params.balance - params.lump_sum, params.annual_interest_rate)?;
        let policy = RepaymentPolicy::new(params.repayment_threshold, params.monthly_repayment_rate()?)?;
        let mut salary = SalaryProjection::new(
            params.salary,
            params.salary_growth_rate,
            params.salary_growth_annealing_rate,
        )?;
        let final_year = params.final_repayment_year()?;

        info!(
            "forecast {} starting {}: balance {}, lump sum {}, salary {}, interest {}, repayments until end of {}",
            forecast_id,
            start_date,
            params.balance,
            params.lump_sum,
            params.salary,
            params.annual_interest_rate,
            final_year
        );

        events.emit(Event::ForecastStarted {
            forecast_id,
            start_date,
            opening_balance: params.balance,
        });
        if params.lump_sum.is_positive() {
            events.emit(Event::LumpSumApplied {
                forecast_id,
                amount: params.lump_sum,
                new_balance: account.balance(),
                date: start_date,
            });
        }

        let mut records = vec![PeriodRecord {
            date: start_date,
            interest: Money::ZERO,
            salary: salary.salary(),
            payment: params.lump_sum,
            balance: account.balance(),
        }];

        let mut year = start_date.year();
        let mut month = start_date.month();
        let mut last_date = start_date;

        while year <= final_year && !account.is_settled() {
            let date = last_day_of_month(year, month)?;

            // interest is posted before the payment is taken
            let interest = account.accrue_monthly_interest(month, year)?;
            let current_salary = salary.salary();
            let payment = policy.payment_due(current_salary, account.balance());
            account.pay(payment)?;

            records.push(PeriodRecord {
                date,
                interest,
                salary: current_salary,
                payment,
                balance: account.balance(),
            });
            events.emit(Event::InterestAccrued {
                forecast_id,
                amount: interest,
                days: date.day(),
                date,
            });
            events.emit(Event::PaymentCollected {
                forecast_id,
                amount: payment,
                salary: current_salary,
                new_balance: account.balance(),
                date,
            });
            trace!("{}: interest {}, payment {}, balance {}", date, interest, payment, account.balance());

            last_date = date;
            if account.is_settled() {
                break;
            }

            if month == 12 {
                let applied_growth_rate = salary.growth_rate();
                salary.advance_year();
                debug!(
                    "salary grown to {} at {}, next growth rate {}",
                    salary.salary(),
                    applied_growth_rate,
                    salary.growth_rate()
                );
                events.emit(Event::SalaryGrown {
                    forecast_id,
                    previous_salary: current_salary,
                    new_salary: salary.salary(),
                    applied_growth_rate,
                    next_growth_rate: salary.growth_rate(),
                    date,
                });
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        }

        let outcome = if account.is_settled() {
            info!("forecast {}: loan settled on {}", forecast_id, last_date);
            events.emit(Event::LoanSettled {
                forecast_id,
                date: last_date,
            });
            LoanOutcome::Settled { date: last_date }
        } else {
            info!(
                "forecast {}: term expired on {}, {} written off",
                forecast_id,
                last_date,
                account.balance()
            );
            events.emit(Event::LoanWrittenOff {
                forecast_id,
                amount: account.balance(),
                date: last_date,
            });
            LoanOutcome::WrittenOff {
                date: last_date,
                amount: account.balance(),
            }
        };

        Ok(Forecast {
            id: forecast_id,
            start_date,
            parameters: params.clone(),
            records,
            events,
            outcome,
        })
    }
}

/// run a forecast with the given parameters, starting today per `time_provider`
pub fn run_simulation(
    params: &SimulationParameters,
    time_provider: &SafeTimeProvider,
) -> Result<Forecast> {
    SimulationEngine::new(params.clone()).run(time_provider)
}
