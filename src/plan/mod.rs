//! Investment plans and plan file loading

mod data;
pub mod loader;

pub use data::{
    FixedRatePlan, InvestmentPlan, DEFAULT_ANNUAL_RATE_PERCENT, DEFAULT_DURATION_YEARS,
    DEFAULT_INITIAL_AMOUNT, DEFAULT_MONTHLY_CONTRIBUTION, MAX_ANNUAL_RATE_PERCENT,
    MAX_DURATION_YEARS, MIN_DURATION_YEARS,
};
pub use loader::{load_plans, load_plans_from_reader};
