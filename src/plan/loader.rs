//! Load fixed-rate plans from CSV
//!
//! Columns: `name,initial_amount,monthly_contribution,annual_rate_percent,duration_years`

use csv::Reader;
use std::error::Error;
use std::path::Path;

use super::{FixedRatePlan, InvestmentPlan};

/// Raw CSV row matching the plan file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    initial_amount: f64,
    monthly_contribution: f64,
    annual_rate_percent: f64,
    duration_years: u32,
}

impl CsvRow {
    fn to_plan(self) -> Result<FixedRatePlan, Box<dyn Error>> {
        let plan = InvestmentPlan::new(self.initial_amount, self.monthly_contribution)
            .map_err(|e| format!("Plan '{}': {}", self.name, e))?;
        let fixed = FixedRatePlan::new(self.name.clone(), plan, self.annual_rate_percent, self.duration_years)
            .map_err(|e| format!("Plan '{}': {}", self.name, e))?;
        Ok(fixed)
    }
}

/// Load all plans from a CSV file
pub fn load_plans<P: AsRef<Path>>(path: P) -> Result<Vec<FixedRatePlan>, Box<dyn Error>> {
    let file = std::fs::File::open(path)?;
    load_plans_from_reader(file)
}

/// Load plans from any reader (e.g., string buffer, stdin)
pub fn load_plans_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<FixedRatePlan>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut plans = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        plans.push(row.to_plan()?);
    }

    Ok(plans)
}
