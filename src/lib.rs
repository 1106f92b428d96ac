//! Investment Simulator - capital growth projections for periodic investing
//!
//! This library provides:
//! - Fixed-rate projections with yearly or monthly compounding
//! - Historical projections from month-over-month price changes of a
//!   catalog instrument
//! - Quote providers (Yahoo Finance over HTTP, local CSV price files)
//! - Summary extraction and text / CSV / JSON presentation
//! - Batch and multi-source scenario runs

pub mod error;
pub mod market;
pub mod plan;
pub mod projection;
pub mod report;
pub mod returns;
pub mod scenario;
pub mod settings;

// Re-export commonly used types
pub use error::SimulationError;
pub use plan::{FixedRatePlan, InvestmentPlan};
pub use projection::{ProjectionConfig, ProjectionEngine, ProjectionSummary, Trajectory};
pub use returns::{DateRange, FixedRate, ReturnSeries, ReturnSource};
pub use scenario::ScenarioRunner;
