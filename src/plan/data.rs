//! Contribution schedule and fixed-rate run parameters

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Inclusive bounds accepted by the input surface
pub const MAX_ANNUAL_RATE_PERCENT: f64 = 100.0;
pub const MIN_DURATION_YEARS: u32 = 1;
pub const MAX_DURATION_YEARS: u32 = 50;

/// Defaults offered to a new session
pub const DEFAULT_INITIAL_AMOUNT: f64 = 1000.0;
pub const DEFAULT_MONTHLY_CONTRIBUTION: f64 = 200.0;
pub const DEFAULT_ANNUAL_RATE_PERCENT: f64 = 5.0;
pub const DEFAULT_DURATION_YEARS: u32 = 10;

/// Money put in by the investor: a lump sum at period 0 and a fixed amount
/// at every later period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentPlan {
    pub initial_amount: f64,
    pub periodic_contribution: f64,
}

impl InvestmentPlan {
    /// Validated constructor: both amounts must be finite and non-negative
    pub fn new(initial_amount: f64, periodic_contribution: f64) -> Result<Self> {
        check_amount("initial_amount", initial_amount)?;
        check_amount("periodic_contribution", periodic_contribution)?;
        Ok(Self {
            initial_amount,
            periodic_contribution,
        })
    }
}

impl Default for InvestmentPlan {
    fn default() -> Self {
        Self {
            initial_amount: DEFAULT_INITIAL_AMOUNT,
            periodic_contribution: DEFAULT_MONTHLY_CONTRIBUTION,
        }
    }
}

fn check_amount(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimulationError::invalid_parameter(
            name,
            format!("must be a non-negative amount, got {}", value),
        ));
    }
    Ok(())
}

/// A named fixed-rate scenario, as entered by a user or read from a plan file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedRatePlan {
    pub name: String,
    pub plan: InvestmentPlan,
    pub annual_rate_percent: f64,
    pub duration_years: u32,
}

impl FixedRatePlan {
    pub fn new(
        name: impl Into<String>,
        plan: InvestmentPlan,
        annual_rate_percent: f64,
        duration_years: u32,
    ) -> Result<Self> {
        if !annual_rate_percent.is_finite()
            || !(0.0..=MAX_ANNUAL_RATE_PERCENT).contains(&annual_rate_percent)
        {
            return Err(SimulationError::invalid_parameter(
                "annual_rate_percent",
                format!("must be within [0, {}], got {}", MAX_ANNUAL_RATE_PERCENT, annual_rate_percent),
            ));
        }
        if !(MIN_DURATION_YEARS..=MAX_DURATION_YEARS).contains(&duration_years) {
            return Err(SimulationError::invalid_parameter(
                "duration_years",
                format!(
                    "must be within [{}, {}], got {}",
                    MIN_DURATION_YEARS, MAX_DURATION_YEARS, duration_years
                ),
            ));
        }

        Ok(Self {
            name: name.into(),
            plan,
            annual_rate_percent,
            duration_years,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_rejects_negative_and_nan() {
        assert!(InvestmentPlan::new(1000.0, 0.0).is_ok());
        assert!(matches!(
            InvestmentPlan::new(-1.0, 0.0),
            Err(SimulationError::InvalidParameter { name: "initial_amount", .. })
        ));
        assert!(matches!(
            InvestmentPlan::new(0.0, f64::NAN),
            Err(SimulationError::InvalidParameter { name: "periodic_contribution", .. })
        ));
    }

    #[test]
    fn test_fixed_rate_bounds() {
        let plan = InvestmentPlan::default();
        assert!(FixedRatePlan::new("edge", plan, 0.0, 1).is_ok());
        assert!(FixedRatePlan::new("edge", plan, 100.0, 50).is_ok());
        assert!(FixedRatePlan::new("rate", plan, 100.5, 10).is_err());
        assert!(FixedRatePlan::new("rate", plan, -0.1, 10).is_err());
        assert!(FixedRatePlan::new("short", plan, 5.0, 0).is_err());
        assert!(FixedRatePlan::new("long", plan, 5.0, 51).is_err());
    }
}
