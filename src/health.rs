//! Project health scoring
//!
//! Folds freshness, security and license findings into a single
//! 0–100 score with a deterministic weighting, plus a qualitative
//! risk label. Security findings dominate the label: any critical
//! vulnerability forces `critical` regardless of the numeric score.

use serde::{Deserialize, Serialize};

use crate::domain::{FreshnessBreakdown, LicenseFindings, SecurityFindings};

/// Starting score before deductions
const PERFECT_SCORE: i32 = 100;

/// Deduction per stale dependency
const STALE_PENALTY: i32 = 15;
/// Deduction per aging dependency
const AGING_PENALTY: i32 = 8;
/// Freshness deductions are capped so an old but otherwise healthy
/// project cannot be dragged to zero by age alone
const FRESHNESS_DEDUCTION_CAP: i32 = 60;

/// Per-vulnerability deductions by severity
const CRITICAL_VULN_PENALTY: i32 = 40;
const HIGH_VULN_PENALTY: i32 = 25;
const MEDIUM_VULN_PENALTY: i32 = 10;
const LOW_VULN_PENALTY: i32 = 5;
/// Cap on the summed security deduction; one dependency with dozens
/// of low findings must not dominate the score
const SECURITY_DEDUCTION_CAP: i32 = 70;

/// Deduction per copyleft/unknown license flag
const LICENSE_FLAG_PENALTY: i32 = 5;
const LICENSE_DEDUCTION_CAP: i32 = 20;

/// Risk label thresholds on the final score
const LOW_RISK_THRESHOLD: i32 = 80;
const MEDIUM_RISK_THRESHOLD: i32 = 60;
const HIGH_RISK_THRESHOLD: i32 = 40;

/// Qualitative risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Computed health score, immutable after construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScore {
    pub value: u8,
    pub risk_level: RiskLevel,
}

/// Deterministic health scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthScorer;

impl HealthScorer {
    pub fn new() -> Self {
        Self
    }

    /// Compute the score from the three aggregates
    pub fn score(
        &self,
        freshness: &FreshnessBreakdown,
        security: &SecurityFindings,
        licenses: &LicenseFindings,
    ) -> HealthScore {
        let freshness_deduction = (freshness.stale as i32 * STALE_PENALTY
            + freshness.aging as i32 * AGING_PENALTY)
            .min(FRESHNESS_DEDUCTION_CAP);

        let security_deduction = (security.critical_count as i32 * CRITICAL_VULN_PENALTY
            + security.high_count as i32 * HIGH_VULN_PENALTY
            + security.medium_count as i32 * MEDIUM_VULN_PENALTY
            + security.low_count as i32 * LOW_VULN_PENALTY)
            .min(SECURITY_DEDUCTION_CAP);

        let license_deduction =
            (licenses.flag_count() as i32 * LICENSE_FLAG_PENALTY).min(LICENSE_DEDUCTION_CAP);

        let value = (PERFECT_SCORE - freshness_deduction - security_deduction - license_deduction)
            .clamp(0, PERFECT_SCORE) as u8;

        let mut risk_level = if value as i32 >= LOW_RISK_THRESHOLD {
            RiskLevel::Low
        } else if value as i32 >= MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else if value as i32 >= HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        };

        // A critical vulnerability forces the label no matter how the
        // numbers average out
        if security.has_critical() {
            risk_level = RiskLevel::Critical;
        }

        HealthScore { value, risk_level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;

    fn freshness(fresh: usize, current: usize, aging: usize, stale: usize) -> FreshnessBreakdown {
        FreshnessBreakdown {
            fresh,
            current,
            aging,
            stale,
        }
    }

    fn security_with(critical: usize, high: usize, medium: usize, low: usize) -> SecurityFindings {
        SecurityFindings {
            vulnerable_count: (critical + high + medium + low).min(1),
            total_vulnerabilities: critical + high + medium + low,
            critical_count: critical,
            high_count: high,
            medium_count: medium,
            low_count: low,
            worst_severity: if critical > 0 {
                Some(Severity::Critical)
            } else if high > 0 {
                Some(Severity::High)
            } else {
                None
            },
            ..SecurityFindings::default()
        }
    }

    #[test]
    fn test_perfect_project_scores_100() {
        let score = HealthScorer::new().score(
            &freshness(5, 3, 0, 0),
            &SecurityFindings::empty(),
            &LicenseFindings::empty(),
        );
        assert_eq!(score.value, 100);
        assert_eq!(score.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_freshness_penalties() {
        let score = HealthScorer::new().score(
            &freshness(0, 0, 1, 1),
            &SecurityFindings::empty(),
            &LicenseFindings::empty(),
        );
        assert_eq!(score.value, (100 - STALE_PENALTY - AGING_PENALTY) as u8);
    }

    #[test]
    fn test_freshness_deduction_is_capped() {
        let score = HealthScorer::new().score(
            &freshness(0, 0, 0, 50),
            &SecurityFindings::empty(),
            &LicenseFindings::empty(),
        );
        assert_eq!(score.value, (100 - FRESHNESS_DEDUCTION_CAP) as u8);
    }

    #[test]
    fn test_security_deduction_is_capped() {
        // 20 low findings would be -100 uncapped
        let score = HealthScorer::new().score(
            &freshness(1, 0, 0, 0),
            &security_with(0, 0, 0, 20),
            &LicenseFindings::empty(),
        );
        assert_eq!(score.value, (100 - SECURITY_DEDUCTION_CAP) as u8);
        assert_eq!(score.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_score_never_negative() {
        let score = HealthScorer::new().score(
            &freshness(0, 0, 10, 10),
            &security_with(3, 3, 3, 3),
            &LicenseFindings {
                copyleft_count: 10,
                ..LicenseFindings::default()
            },
        );
        assert_eq!(score.value, 0);
        assert_eq!(score.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_critical_vulnerability_forces_critical_label() {
        // Numerically the score stays in the low-risk band
        let score = HealthScorer::new().score(
            &freshness(10, 0, 0, 0),
            &security_with(1, 0, 0, 0),
            &LicenseFindings::empty(),
        );
        assert!(score.value >= 40);
        assert_eq!(score.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_license_flags_penalize() {
        let score = HealthScorer::new().score(
            &freshness(1, 0, 0, 0),
            &SecurityFindings::empty(),
            &LicenseFindings {
                copyleft_count: 1,
                unknown_count: 1,
                ..LicenseFindings::default()
            },
        );
        assert_eq!(score.value, (100 - 2 * LICENSE_FLAG_PENALTY) as u8);
    }

    #[test]
    fn test_risk_thresholds() {
        let scorer = HealthScorer::new();
        let cases = [
            (freshness(5, 0, 0, 0), RiskLevel::Low),
            (freshness(0, 0, 4, 0), RiskLevel::Medium), // -32
            (freshness(0, 0, 0, 3), RiskLevel::High),   // -45
        ];
        for (breakdown, expected) in cases {
            let score = scorer.score(
                &breakdown,
                &SecurityFindings::empty(),
                &LicenseFindings::empty(),
            );
            assert_eq!(score.risk_level, expected, "score was {}", score.value);
        }

        // Freshness caps at -60, so reaching the critical band needs
        // another deduction on top
        let score = scorer.score(
            &freshness(0, 0, 0, 4),
            &SecurityFindings::empty(),
            &LicenseFindings {
                copyleft_count: 1,
                ..LicenseFindings::default()
            },
        );
        assert_eq!(score.value, 35);
        assert_eq!(score.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let scorer = HealthScorer::new();
        let a = scorer.score(
            &freshness(1, 2, 3, 4),
            &security_with(0, 1, 2, 3),
            &LicenseFindings::empty(),
        );
        let b = scorer.score(
            &freshness(1, 2, 3, 4),
            &security_with(0, 1, 2, 3),
            &LicenseFindings::empty(),
        );
        assert_eq!(a, b);
    }
}
