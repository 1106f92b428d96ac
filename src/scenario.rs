//! Scenario runner: wires return sources, the provider and the engine
//!
//! Holds the catalog and provider settings once, then runs any number of
//! independent projections. Each run is a fresh pass; nothing carries over.
//!
//! # Example
//! ```ignore
//! let runner = ScenarioRunner::new(ProviderSettings::from_env());
//! let request = runner.historical_request("S&P 500 (ETF)", DateRange::default())?;
//! let trajectory = runner
//!     .run(plan, &ReturnSource::Historical(request), provider.as_ref())
//!     .await?;
//! ```

use log::info;

use crate::error::Result;
use crate::market::QuoteProvider;
use crate::plan::{FixedRatePlan, InvestmentPlan};
use crate::projection::{ProjectionConfig, ProjectionEngine, Trajectory};
use crate::returns::{DateRange, FixedRate, HistoricalRequest, InstrumentCatalog, ReturnSource};
use crate::settings::ProviderSettings;

#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    catalog: InstrumentCatalog,
    settings: ProviderSettings,
}

impl ScenarioRunner {
    /// Create runner with the built-in instrument catalog
    pub fn new(settings: ProviderSettings) -> Self {
        Self::with_catalog(InstrumentCatalog::default(), settings)
    }

    pub fn with_catalog(catalog: InstrumentCatalog, settings: ProviderSettings) -> Self {
        Self { catalog, settings }
    }

    pub fn catalog(&self) -> &InstrumentCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    /// Resolve an instrument for a historical run
    pub fn historical_request(&self, identifier: &str, range: DateRange) -> Result<HistoricalRequest> {
        HistoricalRequest::new(&self.catalog, identifier, range)
    }

    /// Run a single projection; errors from the source abort the run
    pub async fn run(
        &self,
        plan: InvestmentPlan,
        source: &ReturnSource,
        provider: &dyn QuoteProvider,
    ) -> Result<Trajectory> {
        let series = source.resolve(&plan, provider, &self.settings).await?;
        let trajectory = ProjectionEngine::new(ProjectionConfig::new(plan)).project(&series);

        let summary = trajectory.summary();
        info!(
            "{}: {} periods, final capital {:.2}",
            source.describe(),
            summary.periods,
            summary.final_capital
        );
        Ok(trajectory)
    }

    /// Fixed-rate run; needs no provider
    pub fn run_fixed(&self, fixed: &FixedRatePlan) -> Trajectory {
        let source = FixedRate::new(fixed.annual_rate_percent, fixed.duration_years);
        ProjectionEngine::new(ProjectionConfig::new(fixed.plan)).project(&source.series(&fixed.plan))
    }

    /// Run every plan independently, in order
    pub fn run_batch(&self, plans: &[FixedRatePlan]) -> Vec<Trajectory> {
        plans.iter().map(|p| self.run_fixed(p)).collect()
    }

    /// Run one plan against several sources; each result stands alone
    pub async fn run_scenarios(
        &self,
        plan: InvestmentPlan,
        sources: &[ReturnSource],
        provider: &dyn QuoteProvider,
    ) -> Vec<Result<Trajectory>> {
        let mut results = Vec::with_capacity(sources.len());
        for source in sources {
            results.push(self.run(plan, source, provider).await);
        }
        results
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(ProviderSettings::default())
    }
}
