//! Constant per-period returns derived from an annual rate

use serde::{Deserialize, Serialize};

use super::{Granularity, Period, ReturnSeries};
use crate::plan::InvestmentPlan;

/// Fixed annual rate applied over a whole number of years
///
/// Granularity follows the plan's contribution: a plan with no recurring
/// contribution compounds yearly at the annual rate, any other plan
/// compounds monthly at a twelfth of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedRate {
    pub annual_rate_percent: f64,
    pub duration_years: u32,
}

impl FixedRate {
    pub fn new(annual_rate_percent: f64, duration_years: u32) -> Self {
        Self {
            annual_rate_percent,
            duration_years,
        }
    }

    pub fn granularity(&self, plan: &InvestmentPlan) -> Granularity {
        if plan.periodic_contribution == 0.0 {
            Granularity::Yearly
        } else {
            Granularity::Monthly
        }
    }

    pub fn rate_per_period(&self, plan: &InvestmentPlan) -> f64 {
        match self.granularity(plan) {
            Granularity::Yearly => self.annual_rate_percent / 100.0,
            _ => self.annual_rate_percent / 12.0 / 100.0,
        }
    }

    pub fn period_count(&self, plan: &InvestmentPlan) -> u32 {
        match self.granularity(plan) {
            Granularity::Yearly => self.duration_years,
            _ => self.duration_years * 12,
        }
    }

    pub fn series(&self, plan: &InvestmentPlan) -> ReturnSeries {
        let granularity = self.granularity(plan);
        let rate = self.rate_per_period(plan);
        let label = |i: u32| match granularity {
            Granularity::Yearly => Period::Year(i),
            _ => Period::Month(i),
        };

        let n = self.period_count(plan);
        ReturnSeries::new(
            granularity,
            label(0),
            (1..=n).map(|i| (label(i), rate)).collect(),
        )
    }
}
