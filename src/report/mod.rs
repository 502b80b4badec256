//! Summaries of a forecast by calendar year or month
//!
//! Works purely on the period records, so any record sequence can be
//! summarised without access to the account or the engine.

pub mod render;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::simulation::Forecast;
use crate::types::{AggregationPeriod, LoanOutcome, PeriodRecord};

pub use render::{render_json, render_table, write_csv, ForecastReport};

/// one row of an aggregated forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// "2031" or "2031-04"
    pub period: String,
    /// balance at the end of the period
    pub balance: Money,
    pub payment: Money,
    pub interest: Money,
    pub first_salary: Money,
    pub last_salary: Money,
    /// everything paid up to and including this period
    pub cumulative_paid: Money,
}

/// headline figures for a whole forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// lump sum plus every monthly payment
    pub total_paid: Money,
    pub total_interest: Money,
    pub repayment_months: usize,
    pub final_balance: Money,
    pub outcome: LoanOutcome,
}

impl ForecastSummary {
    pub fn from_forecast(forecast: &Forecast) -> Self {
        let records = forecast.records();

        Self {
            start_date: forecast.start_date,
            end_date: forecast.outcome.date(),
            total_paid: records.iter().map(|r| r.payment).sum(),
            total_interest: records.iter().map(|r| r.interest).sum(),
            repayment_months: forecast
                .monthly_records()
                .iter()
                .filter(|r| r.payment.is_positive())
                .count(),
            final_balance: forecast.final_balance(),
            outcome: forecast.outcome,
        }
    }
}

fn period_key(date: NaiveDate, period: AggregationPeriod) -> String {
    match period {
        AggregationPeriod::Year => date.year().to_string(),
        AggregationPeriod::Month => format!("{}-{:02}", date.year(), date.month()),
    }
}

/// group consecutive records by year or month
pub fn aggregate(records: &[PeriodRecord], period: AggregationPeriod) -> Vec<PeriodSummary> {
    let mut summaries: Vec<PeriodSummary> = Vec::new();
    let mut cumulative = Money::ZERO;

    for record in records {
        let key = period_key(record.date, period);
        cumulative += record.payment;

        match summaries.last_mut() {
            Some(current) if current.period == key => {
                current.balance = record.balance;
                current.payment += record.payment;
                current.interest += record.interest;
                current.last_salary = record.salary;
                current.cumulative_paid = cumulative;
            }
            _ => summaries.push(PeriodSummary {
                period: key,
                balance: record.balance,
                payment: record.payment,
                interest: record.interest,
                first_salary: record.salary,
                last_salary: record.salary,
                cumulative_paid: cumulative,
            }),
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::simulation::{SimulationEngine, SimulationParameters};
    use rust_decimal_macros::dec;

    fn record(y: i32, m: u32, d: u32, interest: i64, salary: i64, payment: i64, balance: i64) -> PeriodRecord {
        PeriodRecord {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            interest: Money::from_major(interest),
            salary: Money::from_major(salary),
            payment: Money::from_major(payment),
            balance: Money::from_major(balance),
        }
    }

    fn records() -> Vec<PeriodRecord> {
        vec![
            record(2024, 11, 7, 0, 30_000, 500, 9_500),
            record(2024, 11, 30, 30, 30_000, 100, 9_430),
            record(2024, 12, 31, 31, 30_000, 100, 9_361),
            record(2025, 1, 31, 31, 31_000, 110, 9_282),
            record(2025, 2, 28, 28, 31_000, 110, 9_200),
        ]
    }

    #[test]
    fn test_aggregate_by_year() {
        let summaries = aggregate(&records(), AggregationPeriod::Year);

        assert_eq!(summaries.len(), 2);

        let first = &summaries[0];
        assert_eq!(first.period, "2024");
        assert_eq!(first.balance, Money::from_major(9_361));
        assert_eq!(first.payment, Money::from_major(700));
        assert_eq!(first.interest, Money::from_major(61));
        assert_eq!(first.first_salary, Money::from_major(30_000));
        assert_eq!(first.last_salary, Money::from_major(30_000));
        assert_eq!(first.cumulative_paid, Money::from_major(700));

        let second = &summaries[1];
        assert_eq!(second.period, "2025");
        assert_eq!(second.balance, Money::from_major(9_200));
        assert_eq!(second.payment, Money::from_major(220));
        assert_eq!(second.first_salary, Money::from_major(31_000));
        assert_eq!(second.cumulative_paid, Money::from_major(920));
    }

    #[test]
    fn test_aggregate_by_month_merges_lump_sum_into_start_month() {
        let summaries = aggregate(&records(), AggregationPeriod::Month);

        let periods: Vec<&str> = summaries.iter().map(|s| s.period.as_str()).collect();
        assert_eq!(periods, vec!["2024-11", "2024-12", "2025-01", "2025-02"]);

        assert_eq!(summaries[0].payment, Money::from_major(600));
        assert_eq!(summaries[0].balance, Money::from_major(9_430));
        assert_eq!(summaries[3].cumulative_paid, Money::from_major(920));
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate(&[], AggregationPeriod::Year).is_empty());
    }

    #[test]
    fn test_summary_from_forecast() {
        let params = SimulationParameters {
            balance: Money::from_major(12_000),
            lump_sum: Money::from_major(2_000),
            salary: Money::from_major(40_000),
            annual_repayment_rate: Rate::from_percentage(dec!(9)),
            salary_growth_rate: Rate::ZERO,
            salary_growth_annealing_rate: Rate::ONE,
            first_repayment_year: 2020,
            loan_term_years: 30,
            repayment_threshold: Money::from_major(27_295),
            annual_interest_rate: Rate::from_decimal(dec!(0.04)),
        };
        let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let forecast = SimulationEngine::new(params).run_from(start).unwrap();

        let summary = ForecastSummary::from_forecast(&forecast);

        assert!(summary.outcome.is_settled());
        assert_eq!(summary.final_balance, Money::ZERO);
        // everything borrowed plus all interest was repaid
        assert_eq!(summary.total_paid, Money::from_major(12_000) + summary.total_interest);
        assert_eq!(summary.repayment_months, forecast.monthly_records().len());

        let yearly = aggregate(forecast.records(), AggregationPeriod::Year);
        assert_eq!(yearly.last().unwrap().cumulative_paid, summary.total_paid);
    }
}
