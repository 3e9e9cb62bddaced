//! Callable dependency-intelligence operations
//!
//! `DependencyAnalyzer` binds the version engine to a registry source
//! and the scan collaborators, and exposes the operations consumed by
//! callers: latest-version lookup, existence checks, stability
//! classification, version comparison, batch analysis and project
//! health scoring.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    AgeReport, BatchAnalysis, Coordinate, DependencyAnalysisResult, Freshness,
    FreshnessBreakdown, LatestVersionReport, LicenseFindings, LicenseInfo, SecurityAssessment,
    SecurityFindings, VersionComparisonReport, VersionExistsReport,
};
use crate::error::{RegistryError, ToolError};
use crate::health::{HealthScore, HealthScorer, RiskLevel};
use crate::orchestrator::{BatchInput, BatchOrchestrator};
use crate::registry::{ArtifactVersion, VersionSource};
use crate::scan::{LicenseScanner, SecurityScanner};
use crate::version::{self, StabilityTier, VersionEntry, VersionsByType};

/// Stability preference applied when choosing the comparison target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityFilter {
    /// Latest version of any tier
    #[default]
    All,
    /// Only stable versions qualify as targets
    StableOnly,
    /// Stable when one exists, best pre-release otherwise
    PreferStable,
}

/// Options for batch analysis and project health
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisOptions {
    pub stability_filter: StabilityFilter,
    pub include_security_scan: bool,
    pub include_license_scan: bool,
}

/// Project health response
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub score: u8,
    pub risk_level: RiskLevel,
    pub summary: crate::domain::AnalysisSummary,
    pub freshness: FreshnessBreakdown,
    pub security: SecurityFindings,
    pub licenses: LicenseFindings,
    pub dependencies: Vec<DependencyAnalysisResult>,
}

/// Per-dependency probe gathered for health scoring
struct HealthProbe {
    result: DependencyAnalysisResult,
    freshness: Option<Freshness>,
    security: Option<SecurityAssessment>,
    license: Option<LicenseInfo>,
}

impl HealthProbe {
    fn failed(result: DependencyAnalysisResult) -> Self {
        Self {
            result,
            freshness: None,
            security: None,
            license: None,
        }
    }
}

/// The dependency-intelligence operation surface
pub struct DependencyAnalyzer<S> {
    source: Arc<S>,
    security_scanner: Option<Arc<dyn SecurityScanner>>,
    license_scanner: Option<Arc<dyn LicenseScanner>>,
    orchestrator: BatchOrchestrator,
    scorer: HealthScorer,
}

impl<S: VersionSource + 'static> DependencyAnalyzer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            security_scanner: None,
            license_scanner: None,
            orchestrator: BatchOrchestrator::new(),
            scorer: HealthScorer::new(),
        }
    }

    pub fn with_security_scanner(mut self, scanner: Arc<dyn SecurityScanner>) -> Self {
        self.security_scanner = Some(scanner);
        self
    }

    pub fn with_license_scanner(mut self, scanner: Arc<dyn LicenseScanner>) -> Self {
        self.license_scanner = Some(scanner);
        self
    }

    pub fn with_orchestrator(mut self, orchestrator: BatchOrchestrator) -> Self {
        self.orchestrator = orchestrator;
        self
    }

    /// Compare two version strings without touching the registry
    pub fn compare_versions(current: &str, latest: &str) -> VersionComparisonReport {
        VersionComparisonReport {
            update_type: version::update_type(Some(current), Some(latest)),
            is_newer: version::compare_versions(latest, current) == std::cmp::Ordering::Greater,
        }
    }

    /// Classify one version string into a stability tier
    pub fn classify_version(raw: &str) -> StabilityTier {
        version::classify_version(raw)
    }

    /// Latest versions of a dependency, organized by stability tier
    pub async fn latest_version(
        &self,
        dependency: &str,
        prefer_stable: bool,
    ) -> Result<LatestVersionReport, ToolError> {
        let coordinate = Coordinate::parse(dependency)?;
        let versions = self.fetch_version_strings(&coordinate).await?;

        let aggregated = VersionsByType::from_versions(
            coordinate.coordinate_string(),
            versions.iter().map(String::as_str),
        );
        let preferred = aggregated.preferred_version(prefer_stable).cloned();

        Ok(LatestVersionReport {
            dependency: coordinate.coordinate_string(),
            preferred,
            versions: aggregated,
        })
    }

    /// Check whether a specific version of a dependency exists
    pub async fn check_version_exists(
        &self,
        dependency: &str,
        version_param: Option<&str>,
    ) -> Result<VersionExistsReport, ToolError> {
        let coordinate = Coordinate::parse(dependency)?;
        let version_to_check = coordinate
            .version
            .clone()
            .or_else(|| version_param.map(str::to_string))
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                ToolError::invalid_input(
                    "version must be provided in the coordinate or as a parameter",
                )
            })?;

        let exists = match self.fetch_version_strings(&coordinate).await {
            Ok(versions) => versions.iter().any(|v| v == &version_to_check),
            Err(err) if err.code == crate::error::codes::INVALID_INPUT => false,
            Err(err) => return Err(err),
        };
        let tier = version::classify_version(&version_to_check);

        Ok(VersionExistsReport {
            dependency: coordinate.coordinate_string(),
            version: version_to_check,
            exists,
            tier,
            is_stable: tier == StabilityTier::Stable,
        })
    }

    /// Analyze many dependencies concurrently.
    ///
    /// Inputs are `group:artifact[:version]` coordinates; the version
    /// segment, when present, is the current version compared against.
    pub async fn analyze_batch(
        &self,
        dependencies: &[String],
        options: AnalysisOptions,
    ) -> Result<BatchAnalysis, ToolError> {
        let inputs = Self::to_batch_inputs(dependencies)?;
        let source = Arc::clone(&self.source);
        let stability = options.stability_filter;

        let batch = self
            .orchestrator
            .run(inputs, move |input| {
                let source = Arc::clone(&source);
                async move { analyze_one(source.as_ref(), &input, stability).await }
            })
            .await;

        Ok(batch)
    }

    /// Score overall project health across many dependencies
    pub async fn project_health(
        &self,
        dependencies: &[String],
        options: AnalysisOptions,
    ) -> Result<HealthReport, ToolError> {
        let inputs = Self::to_batch_inputs(dependencies)?;

        let source = Arc::clone(&self.source);
        let security_scanner = self
            .security_scanner
            .clone()
            .filter(|_| options.include_security_scan);
        let license_scanner = self
            .license_scanner
            .clone()
            .filter(|_| options.include_license_scan);
        let stability = options.stability_filter;

        let probes = self
            .orchestrator
            .run_with(
                inputs,
                move |input| {
                    let source = Arc::clone(&source);
                    let security_scanner = security_scanner.clone();
                    let license_scanner = license_scanner.clone();
                    async move {
                        probe_one(
                            source.as_ref(),
                            security_scanner.as_deref(),
                            license_scanner.as_deref(),
                            &input,
                            stability,
                        )
                        .await
                    }
                },
                |label, timeout| {
                    HealthProbe::failed(DependencyAnalysisResult::error(
                        label,
                        format!("timeout: exceeded {:?}", timeout),
                    ))
                },
            )
            .await;

        Ok(self.fold_health(probes))
    }

    fn fold_health(&self, probes: Vec<HealthProbe>) -> HealthReport {
        let mut freshness = FreshnessBreakdown::default();
        let mut assessments: Vec<(String, SecurityAssessment)> = Vec::new();
        let mut licenses: Vec<(String, LicenseInfo)> = Vec::new();
        let mut results = Vec::with_capacity(probes.len());

        for probe in probes {
            let dependency = probe.result.dependency().to_string();
            if let Some(f) = probe.freshness {
                freshness.add(f);
            }
            if let Some(assessment) = probe.security {
                assessments.push((dependency.clone(), assessment));
            }
            if let Some(license) = probe.license {
                licenses.push((dependency, license));
            }
            results.push(probe.result);
        }

        let security =
            SecurityFindings::from_assessments(assessments.iter().map(|(d, a)| (d.as_str(), a)));
        let license_findings =
            LicenseFindings::from_licenses(licenses.iter().map(|(d, l)| (d.as_str(), l)));

        let HealthScore { value, risk_level } =
            self.scorer.score(&freshness, &security, &license_findings);

        debug!(score = value, risk = ?risk_level, "project health computed");

        HealthReport {
            score: value,
            risk_level,
            summary: crate::domain::AnalysisSummary::tally(&results),
            freshness,
            security,
            licenses: license_findings,
            dependencies: results,
        }
    }

    async fn fetch_version_strings(
        &self,
        coordinate: &Coordinate,
    ) -> Result<Vec<String>, ToolError> {
        let versions = self
            .source
            .fetch_versions(&coordinate.without_version())
            .await?;
        Ok(versions.into_iter().map(|v| v.version).collect())
    }

    fn to_batch_inputs(dependencies: &[String]) -> Result<Vec<BatchInput>, ToolError> {
        if dependencies.is_empty() {
            return Err(ToolError::invalid_input(
                "no dependencies provided for analysis",
            ));
        }
        Ok(dependencies
            .iter()
            .map(|dep| BatchInput::new(dep.trim(), None))
            .collect())
    }
}

/// Resolve the comparison target under the stability preference
fn select_target(
    aggregated: &VersionsByType,
    stability: StabilityFilter,
) -> Option<VersionEntry> {
    match stability {
        StabilityFilter::All => aggregated.overall_latest().cloned(),
        StabilityFilter::StableOnly => aggregated.latest_stable.clone(),
        StabilityFilter::PreferStable => aggregated.preferred_version(true).cloned(),
    }
}

/// Analyze one dependency: fetch, aggregate, compare
async fn analyze_one<S: VersionSource + ?Sized>(
    source: &S,
    input: &BatchInput,
    stability: StabilityFilter,
) -> DependencyAnalysisResult {
    match analyze_one_inner(source, input, stability).await {
        Ok((result, _)) => result,
        Err(result) => result,
    }
}

/// Shared per-dependency analysis; on success also returns the release
/// timestamp list for freshness derivation
async fn analyze_one_inner<S: VersionSource + ?Sized>(
    source: &S,
    input: &BatchInput,
    stability: StabilityFilter,
) -> Result<(DependencyAnalysisResult, Vec<ArtifactVersion>), DependencyAnalysisResult> {
    let label = input.dependency.as_str();

    let coordinate = Coordinate::parse(label)
        .map_err(|e| DependencyAnalysisResult::error(label, e.to_string()))?;
    let dependency = coordinate.coordinate_string();
    let current = input
        .current
        .clone()
        .or_else(|| coordinate.version.clone());

    let versions = match source.fetch_versions(&coordinate.without_version()).await {
        Ok(versions) => versions,
        Err(RegistryError::NotFound { .. }) => {
            return Err(DependencyAnalysisResult::not_found(dependency, current));
        }
        Err(err) => {
            return Err(DependencyAnalysisResult::error(dependency, err.to_string()));
        }
    };

    let aggregated = VersionsByType::from_versions(
        dependency.clone(),
        versions.iter().map(|v| v.version.as_str()),
    );
    let latest_stable = aggregated.latest_stable.as_ref().map(|e| e.version.clone());

    let Some(target) = select_target(&aggregated, stability) else {
        return Err(DependencyAnalysisResult::error(
            dependency,
            "no version matches the requested stability filter",
        ));
    };

    let update_type = current
        .as_deref()
        .map(|c| version::update_type(Some(c), Some(&target.version)));
    let is_outdated = current
        .as_deref()
        .map(|c| version::compare_versions(c, &target.version) == std::cmp::Ordering::Less)
        .unwrap_or(false);

    let result = DependencyAnalysisResult::Found {
        dependency,
        current,
        latest: target.version,
        latest_type: target.tier,
        latest_stable,
        update_type,
        is_outdated,
    };
    Ok((result, versions))
}

/// Analyze one dependency and gather its health signals
async fn probe_one<S: VersionSource + ?Sized>(
    source: &S,
    security_scanner: Option<&dyn SecurityScanner>,
    license_scanner: Option<&dyn LicenseScanner>,
    input: &BatchInput,
    stability: StabilityFilter,
) -> HealthProbe {
    let (result, versions) = match analyze_one_inner(source, input, stability).await {
        Ok(pair) => pair,
        Err(result) => return HealthProbe::failed(result),
    };

    let DependencyAnalysisResult::Found {
        dependency,
        current,
        latest,
        ..
    } = &result
    else {
        return HealthProbe::failed(result);
    };

    // Freshness follows the newest release timestamp
    let freshness = versions
        .iter()
        .max_by_key(|v| v.released_at)
        .map(|newest| {
            AgeReport::from_release(
                dependency.clone(),
                newest.version.clone(),
                newest.released_at,
                chrono::Utc::now(),
            )
            .freshness
        });

    // Scans run against the version actually in use, falling back to
    // the comparison target when no current version is known
    let scan_version = current.as_deref().unwrap_or(latest.as_str());
    let coordinate = Coordinate::parse(dependency).expect("found result carries valid coordinate");

    let security = match security_scanner {
        Some(scanner) => Some(
            scanner
                .assess(&coordinate, scan_version)
                .await
                .unwrap_or_else(|e| SecurityAssessment::unknown(e.to_string())),
        ),
        None => None,
    };

    let license = match license_scanner {
        Some(scanner) => Some(
            scanner
                .lookup(&coordinate, scan_version)
                .await
                .unwrap_or_else(|_| LicenseInfo::unknown()),
        ),
        None => None,
    };

    HealthProbe {
        result,
        freshness,
        security,
        license,
    }
}
