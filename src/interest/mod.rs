pub mod accrual;
pub mod compound;

pub use accrual::{days_in_month, is_leap_year, last_day_of_month, AccrualEngine, MonthlyAccrual};
pub use compound::{
    daily_rate_from_annual, effective_period_rate, monthly_rate_from_annual_percentage,
    CompoundingFrequency,
};
