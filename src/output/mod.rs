//! Output formatting for analysis results
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing

mod json;
mod text;

pub use json::write_json;
pub use text::write_text;

use serde::Serialize;
use std::io::{self, Write};

use crate::analyzer::HealthReport;
use crate::domain::{
    BatchAnalysis, LatestVersionReport, VersionComparisonReport, VersionExistsReport,
};
use crate::error::ToolError;
use crate::version::StabilityTier;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

impl OutputFormat {
    pub fn from_cli(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Classification response for one version string
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub version: String,
    #[serde(rename = "type")]
    pub tier: StabilityTier,
    pub is_stable: bool,
}

/// Comparison response for a version pair
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub current: String,
    pub latest: String,
    #[serde(flatten)]
    pub comparison: VersionComparisonReport,
}

/// Every response depscope can print
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Latest(LatestVersionReport),
    Exists(VersionExistsReport),
    Classification(ClassificationReport),
    Comparison(ComparisonReport),
    Batch(BatchAnalysis),
    Health(HealthReport),
    Failure(ToolError),
}

impl Report {
    /// Whether this report describes a failed operation
    pub fn is_failure(&self) -> bool {
        matches!(self, Report::Failure(_))
    }

    /// Whether the operation succeeded but with partial errors
    pub fn has_partial_errors(&self) -> bool {
        match self {
            Report::Batch(batch) => batch.summary.errors > 0,
            Report::Health(health) => health.summary.errors > 0,
            _ => false,
        }
    }
}

/// Render a report in the requested format
pub fn render(report: &Report, format: OutputFormat, out: &mut dyn Write) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(report, out),
        OutputFormat::Text => write_text(report, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnalysisSummary;

    #[test]
    fn test_output_format_from_cli() {
        assert_eq!(OutputFormat::from_cli(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_cli(false), OutputFormat::Text);
    }

    #[test]
    fn test_partial_errors_detection() {
        let batch = BatchAnalysis {
            results: Vec::new(),
            summary: AnalysisSummary {
                total: 3,
                outdated: 1,
                up_to_date: 1,
                errors: 1,
            },
            updates: Default::default(),
        };
        assert!(Report::Batch(batch).has_partial_errors());
    }

    #[test]
    fn test_failure_detection() {
        let report = Report::Failure(ToolError::internal("boom"));
        assert!(report.is_failure());
        assert!(!report.has_partial_errors());
    }
}
