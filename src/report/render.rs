use std::io::Write;

use serde::{Deserialize, Serialize};
use tabled::{builder::Builder, Table};

use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::report::{aggregate, ForecastSummary, PeriodSummary};
use crate::simulation::Forecast;
use crate::types::{AggregationPeriod, LoanOutcome};

const HEADERS: [&str; 7] = [
    "period",
    "owed",
    "payment",
    "interest",
    "first_salary",
    "last_salary",
    "paid",
];

/// serialisable view of a forecast: headline figures plus aggregated rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    pub summary: ForecastSummary,
    pub aggregation: AggregationPeriod,
    pub periods: Vec<PeriodSummary>,
}

impl ForecastReport {
    pub fn new(forecast: &Forecast, aggregation: AggregationPeriod) -> Self {
        Self {
            summary: ForecastSummary::from_forecast(forecast),
            aggregation,
            periods: aggregate(forecast.records(), aggregation),
        }
    }
}

fn pounds(amount: Money) -> String {
    format!("{:.2}", amount.round_dp(2).as_decimal())
}

fn row(summary: &PeriodSummary) -> [String; 7] {
    [
        summary.period.clone(),
        pounds(summary.balance),
        pounds(summary.payment),
        pounds(summary.interest),
        pounds(summary.first_salary),
        pounds(summary.last_salary),
        pounds(summary.cumulative_paid),
    ]
}

/// text table of the aggregated rows followed by the headline figures
pub fn render_table(report: &ForecastReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(HEADERS);
    for summary in &report.periods {
        builder.push_record(row(summary));
    }
    let table = Table::from(builder);

    let summary = &report.summary;
    let outcome = match summary.outcome {
        LoanOutcome::Settled { date } => format!("settled on {}", date),
        LoanOutcome::WrittenOff { date, amount } => {
            format!("written off on {} with £{} outstanding", date, pounds(amount))
        }
    };

    format!(
        "{}\n\nTotal paid: £{}\nTotal interest: £{}\nMonths with a repayment: {}\nLoan {}\n",
        table,
        pounds(summary.total_paid),
        pounds(summary.total_interest),
        summary.repayment_months,
        outcome
    )
}

/// aggregated rows as csv, amounts rounded to pennies
pub fn write_csv<W: Write>(periods: &[PeriodSummary], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(HEADERS).map_err(csv_error)?;
    for summary in periods {
        wtr.write_record(row(summary)).map_err(csv_error)?;
    }

    wtr.flush().map_err(|e| LoanError::Output {
        message: format!("failed to flush csv: {}", e),
    })
}

fn csv_error(e: csv::Error) -> LoanError {
    LoanError::Output {
        message: format!("failed to write csv: {}", e),
    }
}

/// pretty-printed json
pub fn render_json(report: &ForecastReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(|e| LoanError::Output {
        message: format!("failed to serialise report: {}", e),
    })
}
