//! Forecast a UK Plan 2 student loan from the command line
//!
//! Inputs come from `--config <file.json>` (or the Plan 2 defaults), with any
//! flag given on the command line taking precedence.

use std::io;
use std::path::PathBuf;
use std::process;

use chrono::Datelike;
use clap::{Parser, ValueEnum};
use log::info;
use student_loan_forecaster::report::{render_json, render_table, write_csv};
use student_loan_forecaster::{
    run_simulation, AggregationPeriod, Decimal, ForecastConfig, ForecastReport, Money,
    SafeTimeProvider, TimeSource,
};

const DISCLAIMER: &str = "Illustrative estimate only, not financial advice. \
Based on Plan 2 loans (England, 2012-2022) and the assumptions given.";

#[derive(Parser)]
#[command(
    name = "forecast",
    version,
    about = "Forecast repayments of a UK Plan 2 student loan",
    long_about = "Simulates a Plan 2 student loan month by month: interest is calculated \
                  daily and added monthly, repayments are a share of salary above the \
                  threshold, and any balance left at the end of the term is written off."
)]
struct Cli {
    /// JSON file with forecast inputs
    #[arg(long)]
    config: Option<PathBuf>,

    /// Current annual salary (£)
    #[arg(long)]
    salary: Option<Money>,

    /// Amount currently owed (£)
    #[arg(long)]
    balance: Option<Money>,

    /// Year you graduated; repayments start the following April
    #[arg(long)]
    graduation_year: Option<i32>,

    /// Percentage of salary over the threshold repaid each year
    #[arg(long)]
    repayment_percentage: Option<Decimal>,

    /// Lump sum paid today (£)
    #[arg(long)]
    lump_sum: Option<Money>,

    /// Annual salary growth (%)
    #[arg(long)]
    salary_growth: Option<Decimal>,

    /// Share of last year's salary growth kept each year (%)
    #[arg(long)]
    salary_growth_annealing: Option<Decimal>,

    /// Loan interest rate (%)
    #[arg(long)]
    interest_rate: Option<Decimal>,

    /// Aggregate results by
    #[arg(long, default_value = "year")]
    group_by: GroupBy,

    /// Output format
    #[arg(long, default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GroupBy {
    Year,
    Month,
}

impl From<GroupBy> for AggregationPeriod {
    fn from(group_by: GroupBy) -> Self {
        match group_by {
            GroupBy::Year => AggregationPeriod::Year,
            GroupBy::Month => AggregationPeriod::Month,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl Cli {
    fn forecast_config(&self) -> Result<ForecastConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => ForecastConfig::from_json_file(path)?,
            None => ForecastConfig::default(),
        };

        if let Some(salary) = self.salary {
            config.salary = salary;
        }
        if let Some(balance) = self.balance {
            config.balance = balance;
        }
        if let Some(year) = self.graduation_year {
            config.graduation_year = year;
        }
        if let Some(percentage) = self.repayment_percentage {
            config.repayment_percentage = percentage;
        }
        if let Some(lump_sum) = self.lump_sum {
            config.lump_sum = lump_sum;
        }
        if let Some(growth) = self.salary_growth {
            config.salary_growth_percentage = growth;
        }
        if let Some(annealing) = self.salary_growth_annealing {
            config.salary_growth_annealing_percentage = annealing;
        }
        if let Some(rate) = self.interest_rate {
            config.interest_rate_percentage = rate;
        }

        Ok(config)
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.forecast_config()?;
    let params = config.to_parameters()?;

    let time = SafeTimeProvider::new(TimeSource::System);
    let forecast = run_simulation(&params, &time)?;
    info!("forecast {} produced {} records", forecast.id, forecast.records().len());

    let report = ForecastReport::new(&forecast, cli.group_by.into());

    match cli.output {
        OutputFormat::Table => {
            println!("{}\n", DISCLAIMER);
            println!(
                "Years left to pay: {}\n",
                config.years_left_to_pay(forecast.start_date.year())
            );
            print!("{}", render_table(&report));
        }
        OutputFormat::Csv => write_csv(&report.periods, io::stdout().lock())?,
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
