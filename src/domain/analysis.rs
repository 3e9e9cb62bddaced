//! Per-dependency analysis results and batch aggregates

use serde::{Deserialize, Serialize};

use crate::version::{StabilityTier, UpdateType, VersionEntry};

/// Outcome of analyzing one dependency. Exactly one variant per
/// dependency, never partially filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DependencyAnalysisResult {
    /// Registry lookup succeeded
    Found {
        dependency: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        current: Option<String>,
        latest: String,
        latest_type: StabilityTier,
        #[serde(skip_serializing_if = "Option::is_none")]
        latest_stable: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        update_type: Option<UpdateType>,
        is_outdated: bool,
    },
    /// Dependency does not exist in the registry
    NotFound {
        dependency: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        current: Option<String>,
    },
    /// Lookup failed (network, rate limit, timeout, bad input)
    Error { dependency: String, message: String },
}

impl DependencyAnalysisResult {
    pub fn not_found(dependency: impl Into<String>, current: Option<String>) -> Self {
        DependencyAnalysisResult::NotFound {
            dependency: dependency.into(),
            current,
        }
    }

    pub fn error(dependency: impl Into<String>, message: impl Into<String>) -> Self {
        DependencyAnalysisResult::Error {
            dependency: dependency.into(),
            message: message.into(),
        }
    }

    pub fn dependency(&self) -> &str {
        match self {
            DependencyAnalysisResult::Found { dependency, .. }
            | DependencyAnalysisResult::NotFound { dependency, .. }
            | DependencyAnalysisResult::Error { dependency, .. } => dependency,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, DependencyAnalysisResult::Found { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            DependencyAnalysisResult::Error { .. } | DependencyAnalysisResult::NotFound { .. }
        )
    }

    pub fn is_outdated(&self) -> bool {
        matches!(
            self,
            DependencyAnalysisResult::Found {
                is_outdated: true,
                ..
            }
        )
    }
}

/// Tally of batch results, computed from the per-dependency variants.
/// NotFound/Error dependencies count toward `errors`, never toward
/// `outdated`/`up_to_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total: usize,
    pub outdated: usize,
    pub up_to_date: usize,
    pub errors: usize,
}

impl AnalysisSummary {
    pub fn tally(results: &[DependencyAnalysisResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            match result {
                DependencyAnalysisResult::Found { is_outdated, .. } => {
                    if *is_outdated {
                        summary.outdated += 1;
                    } else {
                        summary.up_to_date += 1;
                    }
                }
                DependencyAnalysisResult::NotFound { .. }
                | DependencyAnalysisResult::Error { .. } => summary.errors += 1,
            }
        }
        summary
    }
}

/// Tally of update types over successful comparison entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateBreakdown {
    pub major: usize,
    pub minor: usize,
    pub patch: usize,
    pub none: usize,
}

impl UpdateBreakdown {
    pub fn tally(results: &[DependencyAnalysisResult]) -> Self {
        let mut breakdown = Self::default();
        for result in results {
            if let DependencyAnalysisResult::Found {
                update_type: Some(update_type),
                ..
            } = result
            {
                match update_type {
                    UpdateType::Major => breakdown.major += 1,
                    UpdateType::Minor => breakdown.minor += 1,
                    UpdateType::Patch => breakdown.patch += 1,
                    UpdateType::None => breakdown.none += 1,
                    UpdateType::Unknown => {}
                }
            }
        }
        breakdown
    }
}

/// Full batch analysis response: one entry per input dependency, in
/// input order, plus the summary tallies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchAnalysis {
    pub results: Vec<DependencyAnalysisResult>,
    pub summary: AnalysisSummary,
    pub updates: UpdateBreakdown,
}

impl BatchAnalysis {
    pub fn new(results: Vec<DependencyAnalysisResult>) -> Self {
        let summary = AnalysisSummary::tally(&results);
        let updates = UpdateBreakdown::tally(&results);
        Self {
            results,
            summary,
            updates,
        }
    }
}

/// Response for a single latest-version lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestVersionReport {
    pub dependency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred: Option<VersionEntry>,
    #[serde(flatten)]
    pub versions: crate::version::VersionsByType,
}

/// Response for a version-existence check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionExistsReport {
    pub dependency: String,
    pub version: String,
    pub exists: bool,
    #[serde(rename = "type")]
    pub tier: StabilityTier,
    pub is_stable: bool,
}

/// Response for a pure two-version comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionComparisonReport {
    pub update_type: UpdateType,
    pub is_newer: bool,
}
