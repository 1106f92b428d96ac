//! Capital accumulation over a return series

use log::debug;

use super::state::ProjectionState;
use super::trajectory::{Trajectory, TrajectoryRow};
use crate::plan::InvestmentPlan;
use crate::returns::ReturnSeries;

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionConfig {
    /// Contribution schedule
    pub plan: InvestmentPlan,
}

impl ProjectionConfig {
    pub fn new(plan: InvestmentPlan) -> Self {
        Self { plan }
    }
}

/// Main projection engine
///
/// Holds only its configuration; every call to [`project`](Self::project)
/// starts from the plan's initial amount.
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Run the accumulation: one origin row, then one row per return
    pub fn project(&self, series: &ReturnSeries) -> Trajectory {
        let plan = &self.config.plan;
        let mut trajectory = Trajectory::new(series.granularity());
        let mut state = ProjectionState::from_plan(plan);

        trajectory.add_row(TrajectoryRow {
            period: series.origin(),
            period_return: 0.0,
            interest_earned: 0.0,
            capital: state.capital,
            contributions: state.contributions,
            interest: 0.0,
        });

        for &(period, period_return) in series.iter() {
            let interest_earned = state.advance(period_return, plan.periodic_contribution);
            trajectory.add_row(TrajectoryRow {
                period,
                period_return,
                interest_earned,
                capital: state.capital,
                contributions: state.contributions,
                interest: state.interest(),
            });
        }

        debug!(
            "Projected {} periods ({:?}): final capital {:.2}",
            series.len(),
            series.granularity(),
            state.capital
        );

        trajectory
    }
}
