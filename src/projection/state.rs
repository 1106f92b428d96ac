//! Running balance carried from one period to the next

use crate::plan::InvestmentPlan;

/// Balance of the investment at a point in the projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Total value of the investment
    pub capital: f64,

    /// Cumulative money put in, initial amount included
    pub contributions: f64,
}

impl ProjectionState {
    /// Initialize state from a plan at projection start
    pub fn from_plan(plan: &InvestmentPlan) -> Self {
        Self {
            capital: plan.initial_amount,
            contributions: plan.initial_amount,
        }
    }

    /// Apply one period: growth on the prior balance, then the contribution
    ///
    /// Returns the interest earned this period.
    pub fn advance(&mut self, period_return: f64, contribution: f64) -> f64 {
        let interest_earned = self.capital * period_return;
        self.capital = self.capital + contribution + interest_earned;
        self.contributions += contribution;
        interest_earned
    }

    /// Growth attributable to returns rather than contributions
    pub fn interest(&self) -> f64 {
        self.capital - self.contributions
    }
}
