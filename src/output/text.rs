//! Text output for human-readable display
//!
//! This module provides:
//! - Per-dependency result lines with colored update-type labels
//! - Tier tables for latest-version lookups
//! - Summary blocks for batch analysis and project health

use colored::Colorize;
use std::io::{self, Write};

use crate::analyzer::HealthReport;
use crate::domain::{
    BatchAnalysis, DependencyAnalysisResult, LatestVersionReport, LicenseFindings,
    SecurityFindings, VersionExistsReport,
};
use crate::error::ToolError;
use crate::health::RiskLevel;
use crate::output::{ClassificationReport, ComparisonReport, Report};
use crate::version::{StabilityTier, UpdateType, VersionEntry};

/// Minimum column width for dependency names
const MIN_NAME_WIDTH: usize = 20;

/// Render a report as human-readable text
pub fn write_text(report: &Report, out: &mut dyn Write) -> io::Result<()> {
    match report {
        Report::Latest(latest) => write_latest(latest, out),
        Report::Exists(exists) => write_exists(exists, out),
        Report::Classification(classification) => write_classification(classification, out),
        Report::Comparison(comparison) => write_comparison(comparison, out),
        Report::Batch(batch) => write_batch(batch, out),
        Report::Health(health) => write_health(health, out),
        Report::Failure(error) => write_failure(error, out),
    }
}

/// Colored label for an update type
fn update_type_label(update_type: UpdateType) -> String {
    match update_type {
        UpdateType::Major => "major".red().bold().to_string(),
        UpdateType::Minor => "minor".yellow().to_string(),
        UpdateType::Patch => "patch".green().to_string(),
        UpdateType::None => "none".dimmed().to_string(),
        UpdateType::Unknown => "?".dimmed().to_string(),
    }
}

/// Colored label for a stability tier
fn tier_label(tier: StabilityTier) -> String {
    match tier {
        StabilityTier::Stable => "stable".green().to_string(),
        StabilityTier::ReleaseCandidate => "rc".yellow().to_string(),
        StabilityTier::Beta => "beta".yellow().to_string(),
        StabilityTier::Alpha => "alpha".red().to_string(),
        StabilityTier::Milestone => "milestone".red().to_string(),
    }
}

/// Colored label for a risk level
fn risk_label(risk: RiskLevel) -> String {
    match risk {
        RiskLevel::Low => "low".green().to_string(),
        RiskLevel::Medium => "medium".yellow().to_string(),
        RiskLevel::High => "high".red().to_string(),
        RiskLevel::Critical => "critical".red().bold().to_string(),
    }
}

fn write_latest(report: &LatestVersionReport, out: &mut dyn Write) -> io::Result<()> {
    writeln!(
        out,
        "{} {}",
        report.dependency.bold(),
        format!("({} versions)", report.versions.total_versions).dimmed()
    )?;

    let preferred = report.preferred.as_ref();
    let mut write_row = |entry: Option<&VersionEntry>| -> io::Result<()> {
        let Some(entry) = entry else { return Ok(()) };
        let marker = if preferred.is_some_and(|p| p == entry) {
            " ← preferred".cyan().to_string()
        } else {
            String::new()
        };
        writeln!(
            out,
            "  {:12} {}{}",
            entry.tier.display_name(),
            entry.version,
            marker
        )
    };

    for tier in StabilityTier::PREFERENCE_ORDER {
        write_row(report.versions.for_tier(tier))?;
    }
    Ok(())
}

fn write_exists(report: &VersionExistsReport, out: &mut dyn Write) -> io::Result<()> {
    let verdict = if report.exists {
        "✓ exists".green().to_string()
    } else {
        "✗ not found".red().to_string()
    };
    writeln!(
        out,
        "{}:{} — {} [{}]",
        report.dependency.bold(),
        report.version,
        verdict,
        tier_label(report.tier)
    )
}

fn write_classification(report: &ClassificationReport, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{} [{}]", report.version.bold(), tier_label(report.tier))
}

fn write_comparison(report: &ComparisonReport, out: &mut dyn Write) -> io::Result<()> {
    let verdict = if report.comparison.is_newer {
        "newer".green().to_string()
    } else {
        "not newer".dimmed().to_string()
    };
    writeln!(
        out,
        "{} {} {} [{}] ({})",
        report.current,
        "→".dimmed(),
        report.latest.bold(),
        update_type_label(report.comparison.update_type),
        verdict
    )
}

/// Column width for aligned per-dependency lines
fn name_width(results: &[DependencyAnalysisResult]) -> usize {
    results
        .iter()
        .map(|r| r.dependency().len())
        .max()
        .unwrap_or(0)
        .max(MIN_NAME_WIDTH)
}

fn write_result_line(
    result: &DependencyAnalysisResult,
    width: usize,
    out: &mut dyn Write,
) -> io::Result<()> {
    match result {
        DependencyAnalysisResult::Found {
            dependency,
            current,
            latest,
            latest_type,
            is_outdated,
            update_type,
            ..
        } => {
            let name = format!("{:width$}", dependency, width = width);
            match current {
                Some(current) if *is_outdated => writeln!(
                    out,
                    "  {} {} {} {} [{}]",
                    name,
                    current.dimmed(),
                    "→".dimmed(),
                    latest.bright_white().bold(),
                    update_type_label(update_type.unwrap_or(UpdateType::Unknown))
                ),
                Some(current) => writeln!(
                    out,
                    "  {} {} {}",
                    name,
                    current,
                    "(up to date)".dimmed()
                ),
                None => writeln!(
                    out,
                    "  {} latest {} [{}]",
                    name,
                    latest.bright_white().bold(),
                    tier_label(*latest_type)
                ),
            }
        }
        DependencyAnalysisResult::NotFound { dependency, .. } => {
            writeln!(
                out,
                "  {} {}",
                format!("{:width$}", dependency, width = width).dimmed(),
                "not found".red()
            )
        }
        DependencyAnalysisResult::Error {
            dependency,
            message,
        } => {
            writeln!(
                out,
                "  {} {} {}",
                format!("{:width$}", dependency, width = width).dimmed(),
                "✗".red(),
                message.red()
            )
        }
    }
}

fn write_results(results: &[DependencyAnalysisResult], out: &mut dyn Write) -> io::Result<()> {
    let width = name_width(results);
    for result in results {
        write_result_line(result, width, out)?;
    }
    Ok(())
}

fn write_batch(batch: &BatchAnalysis, out: &mut dyn Write) -> io::Result<()> {
    write_results(&batch.results, out)?;
    writeln!(out)?;
    writeln!(out, "{}:", "Summary".bold())?;

    let summary = &batch.summary;
    if summary.outdated > 0 {
        let updates = &batch.updates;
        let mut parts = Vec::new();
        if updates.major > 0 {
            parts.push(format!("{} major", updates.major.to_string().red()));
        }
        if updates.minor > 0 {
            parts.push(format!("{} minor", updates.minor.to_string().yellow()));
        }
        if updates.patch > 0 {
            parts.push(format!("{} patch", updates.patch.to_string().green()));
        }
        let breakdown = if parts.is_empty() {
            String::new()
        } else {
            format!(" ({})", parts.join(", "))
        };
        writeln!(
            out,
            "  {} outdated{}",
            summary.outdated.to_string().yellow(),
            breakdown
        )?;
    }
    writeln!(
        out,
        "  {} up to date",
        summary.up_to_date.to_string().green()
    )?;
    if summary.errors > 0 {
        writeln!(out, "  {} errors", summary.errors.to_string().red())?;
    }
    Ok(())
}

fn write_security(findings: &SecurityFindings, out: &mut dyn Write) -> io::Result<()> {
    if findings.total_vulnerabilities == 0 {
        writeln!(
            out,
            "{} {} clean, {} unknown",
            "Security:".bold(),
            findings.clean_count.to_string().green(),
            findings.unknown_count
        )?;
        return Ok(());
    }

    let mut severities = Vec::new();
    if findings.critical_count > 0 {
        severities.push(format!(
            "{} critical",
            findings.critical_count.to_string().red().bold()
        ));
    }
    if findings.high_count > 0 {
        severities.push(format!("{} high", findings.high_count.to_string().red()));
    }
    if findings.medium_count > 0 {
        severities.push(format!(
            "{} medium",
            findings.medium_count.to_string().yellow()
        ));
    }
    if findings.low_count > 0 {
        severities.push(format!("{} low", findings.low_count));
    }
    writeln!(
        out,
        "{} {} vulnerable dependencies, {} vulnerabilities ({})",
        "Security:".bold(),
        findings.vulnerable_count.to_string().red(),
        findings.total_vulnerabilities,
        severities.join(", ")
    )?;
    for item in &findings.action_items {
        writeln!(out, "  {} {}", "!".red().bold(), item)?;
    }
    Ok(())
}

fn write_licenses(findings: &LicenseFindings, out: &mut dyn Write) -> io::Result<()> {
    writeln!(
        out,
        "{} {} permissive, {} copyleft, {} unknown",
        "Licenses:".bold(),
        findings.permissive_count.to_string().green(),
        findings.copyleft_count,
        findings.unknown_count
    )?;
    for flagged in &findings.flagged_dependencies {
        writeln!(out, "  {} {}", "⚑".yellow(), flagged)?;
    }
    Ok(())
}

fn write_health(report: &HealthReport, out: &mut dyn Write) -> io::Result<()> {
    writeln!(
        out,
        "{} {}/100 [{}]",
        "Health score:".bold(),
        report.score.to_string().bold(),
        risk_label(report.risk_level)
    )?;
    writeln!(out)?;

    let freshness = &report.freshness;
    writeln!(
        out,
        "{} {} fresh, {} current, {} aging, {} stale",
        "Freshness:".bold(),
        freshness.fresh.to_string().green(),
        freshness.current,
        freshness.aging.to_string().yellow(),
        freshness.stale.to_string().red()
    )?;
    write_security(&report.security, out)?;
    write_licenses(&report.licenses, out)?;

    writeln!(out)?;
    write_results(&report.dependencies, out)?;

    if report.summary.errors > 0 {
        writeln!(
            out,
            "\n{} dependencies could not be analyzed",
            report.summary.errors.to_string().red()
        )?;
    }
    Ok(())
}

fn write_failure(error: &ToolError, out: &mut dyn Write) -> io::Result<()> {
    writeln!(
        out,
        "{} [{}] {}",
        "Error".red().bold(),
        error.code,
        error.message
    )?;
    if let Some(secs) = error.retry_after_secs {
        writeln!(out, "  retry in {}s", secs)?;
    }
    Ok(())
}
