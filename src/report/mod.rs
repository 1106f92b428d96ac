//! Presentation of projection results
//!
//! A [`Presenter`] receives either a finished trajectory or the error that
//! aborted the run, never both. Layers follow the stacked-area convention:
//! contributions form the base, capital the upper edge, and interest is the
//! gap between them.

mod format;

pub use format::format_currency;

use serde::Serialize;
use std::io::Write;
use thiserror::Error;

use crate::error::SimulationError;
use crate::projection::{ProjectionSummary, Trajectory};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait Presenter {
    fn render(&mut self, title: &str, trajectory: &Trajectory) -> Result<(), ReportError>;

    fn render_error(&mut self, error: &SimulationError) -> Result<(), ReportError>;
}

/// The three summary lines shown under every run
pub fn summary_lines(summary: &ProjectionSummary, currency: &str) -> [String; 3] {
    [
        format!("Final capital: {}", format_currency(summary.final_capital, currency)),
        format!(
            "Total contributions: {}",
            format_currency(summary.total_contributions, currency)
        ),
        format!("Total interest earned: {}", format_currency(summary.total_interest, currency)),
    ]
}

/// Human-readable summary, optionally followed by the period table
pub struct TextPresenter<W: Write> {
    out: W,
    currency: String,
    show_table: bool,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W, currency: impl Into<String>) -> Self {
        Self {
            out,
            currency: currency.into(),
            show_table: false,
        }
    }

    pub fn with_table(mut self, show_table: bool) -> Self {
        self.show_table = show_table;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn render(&mut self, title: &str, trajectory: &Trajectory) -> Result<(), ReportError> {
        writeln!(self.out, "{}", title)?;
        writeln!(self.out, "{}", "=".repeat(title.chars().count()))?;

        if self.show_table {
            writeln!(
                self.out,
                "{:>12} {:>18} {:>18} {:>18}",
                trajectory.granularity.axis_label(),
                "Contributions",
                "Capital",
                "Interest"
            )?;
            writeln!(self.out, "{}", "-".repeat(69))?;
            for row in &trajectory.rows {
                writeln!(
                    self.out,
                    "{:>12} {:>18} {:>18} {:>18}",
                    row.period.to_string(),
                    format_currency(row.contributions, ""),
                    format_currency(row.capital, ""),
                    format_currency(row.interest, ""),
                )?;
            }
            writeln!(self.out)?;
        }

        writeln!(self.out, "Summary")?;
        for line in summary_lines(&trajectory.summary(), &self.currency) {
            writeln!(self.out, "  - {}", line)?;
        }
        Ok(())
    }

    fn render_error(&mut self, error: &SimulationError) -> Result<(), ReportError> {
        writeln!(self.out, "Error: {}", error)?;
        Ok(())
    }
}

#[derive(Serialize)]
struct LayerRow {
    period: String,
    contributions: f64,
    capital: f64,
    interest: f64,
    period_return: f64,
}

/// Layered series export, one row per period
pub struct CsvPresenter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(out),
        }
    }
}

impl<W: Write> Presenter for CsvPresenter<W> {
    fn render(&mut self, _title: &str, trajectory: &Trajectory) -> Result<(), ReportError> {
        for row in &trajectory.rows {
            let period = match row.period {
                crate::returns::Period::Date(d) => d.to_string(),
                other => other.to_string(),
            };
            self.writer.serialize(LayerRow {
                period,
                contributions: row.contributions,
                capital: row.capital,
                interest: row.interest,
                period_return: row.period_return,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Leaves the export empty: no partial series is written for a failed run
    fn render_error(&mut self, _error: &SimulationError) -> Result<(), ReportError> {
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    summary: ProjectionSummary,
    trajectory: &'a Trajectory,
}

#[derive(Serialize)]
struct JsonError {
    error: String,
}

/// Machine-readable document with summary and full trajectory
pub struct JsonPresenter<W: Write> {
    out: W,
}

impl<W: Write> JsonPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn render(&mut self, title: &str, trajectory: &Trajectory) -> Result<(), ReportError> {
        let report = JsonReport {
            title,
            summary: trajectory.summary(),
            trajectory,
        };
        serde_json::to_writer_pretty(&mut self.out, &report)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn render_error(&mut self, error: &SimulationError) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(
            &mut self.out,
            &JsonError {
                error: error.to_string(),
            },
        )?;
        writeln!(self.out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::InvestmentPlan;
    use crate::projection::{ProjectionConfig, ProjectionEngine};
    use crate::returns::FixedRate;

    fn scenario_a() -> Trajectory {
        let plan = InvestmentPlan::new(1000.0, 0.0).unwrap();
        ProjectionEngine::new(ProjectionConfig::new(plan)).project(&FixedRate::new(5.0, 2).series(&plan))
    }

    #[test]
    fn test_summary_lines() {
        let lines = summary_lines(&scenario_a().summary(), "€");
        assert_eq!(lines[0], "Final capital: 1,102.50 €");
        assert_eq!(lines[1], "Total contributions: 1,000.00 €");
        assert_eq!(lines[2], "Total interest earned: 102.50 €");
    }

    #[test]
    fn test_text_presenter_with_table() {
        let mut presenter = TextPresenter::new(Vec::new(), "€").with_table(true);
        presenter.render("Growth", &scenario_a()).unwrap();
        let text = String::from_utf8(presenter.into_inner()).unwrap();

        assert!(text.starts_with("Growth\n======\n"));
        assert!(text.contains("Year 2"));
        assert!(text.contains("  - Final capital: 1,102.50 €"));
    }

    #[test]
    fn test_text_presenter_error_has_no_summary() {
        let mut presenter = TextPresenter::new(Vec::new(), "€");
        presenter
            .render_error(&SimulationError::UnrecognizedInstrument("XYZ".into()))
            .unwrap();
        let text = String::from_utf8(presenter.into_inner()).unwrap();

        assert_eq!(text, "Error: Unrecognized instrument: XYZ\n");
    }

    #[test]
    fn test_csv_layers() {
        let mut buffer = Vec::new();
        CsvPresenter::new(&mut buffer).render("Growth", &scenario_a()).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "period,contributions,capital,interest,period_return");
        assert_eq!(lines[1], "Year 0,1000.0,1000.0,0.0,0.0");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_json_document() {
        let mut buffer = Vec::new();
        JsonPresenter::new(&mut buffer).render("Growth", &scenario_a()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value["title"], "Growth");
        assert_eq!(value["summary"]["periods"], 2);
        assert_eq!(value["trajectory"]["rows"].as_array().unwrap().len(), 3);
        assert_eq!(value["trajectory"]["rows"][1]["period"]["kind"], "year");
    }
}
