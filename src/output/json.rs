//! JSON output for machine processing

use serde::Serialize;
use std::io::{self, Write};

/// Serialize a report as pretty-printed JSON followed by a newline
pub fn write_json<T: Serialize>(report: &T, out: &mut dyn Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
    writeln!(out, "{}", json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BatchAnalysis, DependencyAnalysisResult};
    use crate::error::ToolError;
    use crate::output::Report;
    use crate::version::{StabilityTier, UpdateType};

    #[test]
    fn test_batch_report_json_shape() {
        let report = Report::Batch(BatchAnalysis::new(vec![
            DependencyAnalysisResult::Found {
                dependency: "junit:junit".to_string(),
                current: Some("4.12".to_string()),
                latest: "4.13.2".to_string(),
                latest_type: StabilityTier::Stable,
                latest_stable: Some("4.13.2".to_string()),
                update_type: Some(UpdateType::Minor),
                is_outdated: true,
            },
            DependencyAnalysisResult::error("bad:bad", "boom"),
        ]));

        let mut output = Vec::new();
        write_json(&report, &mut output).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(parsed["results"][0]["status"], "found");
        assert_eq!(parsed["results"][0]["latest"], "4.13.2");
        assert_eq!(parsed["results"][1]["status"], "error");
        assert_eq!(parsed["summary"]["outdated"], 1);
        assert_eq!(parsed["summary"]["errors"], 1);
        assert_eq!(parsed["updates"]["minor"], 1);
    }

    #[test]
    fn test_failure_report_json_shape() {
        let report = Report::Failure(ToolError::rate_limited("too many requests"));

        let mut output = Vec::new();
        write_json(&report, &mut output).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(parsed["code"], "RATE_LIMITED");
        assert!(parsed["retry_after_secs"].is_u64());
    }

    #[test]
    fn test_output_ends_with_newline() {
        let report = Report::Failure(ToolError::internal("boom"));
        let mut output = Vec::new();
        write_json(&report, &mut output).unwrap();
        assert_eq!(output.last(), Some(&b'\n'));
    }
}
