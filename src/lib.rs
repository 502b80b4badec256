pub mod account;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod interest;
pub mod payments;
pub mod report;
pub mod salary;
pub mod simulation;
pub mod types;

// re-export key types
pub use account::LoanAccount;
pub use config::ForecastConfig;
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use events::{Event, EventStore};
pub use interest::{daily_rate_from_annual, monthly_rate_from_annual_percentage, AccrualEngine};
pub use payments::{calculate_payment, RepaymentPolicy};
pub use report::{aggregate, ForecastReport, ForecastSummary, PeriodSummary};
pub use salary::SalaryProjection;
pub use simulation::{run_simulation, Forecast, SimulationEngine, SimulationParameters};
pub use types::{AggregationPeriod, ForecastId, LoanOutcome, PeriodRecord};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
