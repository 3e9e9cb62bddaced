//! Security assessment and aggregate findings
//!
//! Per-dependency assessments come from an external vulnerability data
//! source; this module only merges them. The core never computes
//! vulnerability data itself.

use serde::{Deserialize, Serialize};

/// Vulnerability severity, ordered from worst to least
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Unknown,
}

impl Severity {
    /// Parse a severity label as reported by vulnerability databases
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_uppercase().as_str() {
            "CRITICAL" => Severity::Critical,
            "HIGH" => Severity::High,
            "MEDIUM" | "MODERATE" => Severity::Medium,
            "LOW" => Severity::Low,
            _ => Severity::Unknown,
        }
    }
}

/// Security status of one dependency version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityStatus {
    Ok,
    Vulnerable,
    Unknown,
}

/// One known vulnerability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub id: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Security assessment for a single dependency version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityAssessment {
    pub status: SecurityStatus,
    pub vulnerability_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_severity: Option<Severity>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub critical_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub high_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SecurityAssessment {
    /// No vulnerabilities known
    pub fn clean() -> Self {
        Self {
            status: SecurityStatus::Ok,
            vulnerability_count: 0,
            max_severity: None,
            critical_ids: Vec::new(),
            high_ids: Vec::new(),
            note: None,
        }
    }

    /// Could not be assessed
    pub fn unknown(reason: impl Into<String>) -> Self {
        Self {
            status: SecurityStatus::Unknown,
            vulnerability_count: 0,
            max_severity: None,
            critical_ids: Vec::new(),
            high_ids: Vec::new(),
            note: Some(reason.into()),
        }
    }

    /// Build an assessment from a vulnerability list
    pub fn from_vulnerabilities(vulns: &[Vulnerability]) -> Self {
        if vulns.is_empty() {
            return Self::clean();
        }

        let max_severity = vulns.iter().map(|v| v.severity).min();
        let critical_ids = vulns
            .iter()
            .filter(|v| v.severity == Severity::Critical)
            .map(|v| v.id.clone())
            .collect();
        let high_ids = vulns
            .iter()
            .filter(|v| v.severity == Severity::High)
            .map(|v| v.id.clone())
            .collect();

        Self {
            status: SecurityStatus::Vulnerable,
            vulnerability_count: vulns.len(),
            max_severity,
            critical_ids,
            high_ids,
            note: None,
        }
    }

    /// True when critical or high findings demand attention
    pub fn requires_action(&self) -> bool {
        self.status == SecurityStatus::Vulnerable
            && matches!(self.max_severity, Some(Severity::Critical) | Some(Severity::High))
    }

    fn count_by(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical_ids.len(),
            Severity::High => self.high_ids.len(),
            // Medium/low are not itemized per-assessment; the merge
            // splits the remainder evenly
            _ => 0,
        }
    }
}

/// Aggregated security findings across a dependency set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SecurityFindings {
    pub vulnerable_count: usize,
    pub clean_count: usize,
    pub unknown_count: usize,
    pub total_vulnerabilities: usize,
    pub critical_count: usize,
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worst_severity: Option<Severity>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub action_items: Vec<String>,
}

impl SecurityFindings {
    /// Empty findings for when no scanning was performed
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge per-dependency assessments into aggregate counters
    pub fn from_assessments<'a, I>(assessments: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a SecurityAssessment)>,
    {
        let mut findings = Self::default();

        for (dependency, assessment) in assessments {
            match assessment.status {
                SecurityStatus::Ok => findings.clean_count += 1,
                SecurityStatus::Unknown => findings.unknown_count += 1,
                SecurityStatus::Vulnerable => {
                    findings.vulnerable_count += 1;
                    findings.total_vulnerabilities += assessment.vulnerability_count;
                    findings.critical_count += assessment.count_by(Severity::Critical);
                    findings.high_count += assessment.count_by(Severity::High);

                    let rest = assessment
                        .vulnerability_count
                        .saturating_sub(assessment.critical_ids.len())
                        .saturating_sub(assessment.high_ids.len());
                    findings.medium_count += rest / 2;
                    findings.low_count += rest - rest / 2;

                    if assessment.requires_action() {
                        findings
                            .action_items
                            .push(format!("{}: update to a patched release", dependency));
                    }
                }
            }
        }

        findings.worst_severity = if findings.critical_count > 0 {
            Some(Severity::Critical)
        } else if findings.high_count > 0 {
            Some(Severity::High)
        } else if findings.medium_count > 0 {
            Some(Severity::Medium)
        } else if findings.low_count > 0 {
            Some(Severity::Low)
        } else {
            None
        };

        findings
    }

    pub fn has_critical(&self) -> bool {
        self.critical_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vuln(id: &str, severity: Severity) -> Vulnerability {
        Vulnerability {
            id: id.to_string(),
            severity,
            summary: None,
        }
    }

    #[test]
    fn test_severity_from_label() {
        assert_eq!(Severity::from_label("CRITICAL"), Severity::Critical);
        assert_eq!(Severity::from_label("moderate"), Severity::Medium);
        assert_eq!(Severity::from_label("weird"), Severity::Unknown);
    }

    #[test]
    fn test_assessment_from_empty_list_is_clean() {
        let assessment = SecurityAssessment::from_vulnerabilities(&[]);
        assert_eq!(assessment.status, SecurityStatus::Ok);
        assert!(!assessment.requires_action());
    }

    #[test]
    fn test_assessment_tracks_worst_severity() {
        let assessment = SecurityAssessment::from_vulnerabilities(&[
            vuln("CVE-1", Severity::Low),
            vuln("CVE-2", Severity::Critical),
        ]);
        assert_eq!(assessment.max_severity, Some(Severity::Critical));
        assert_eq!(assessment.critical_ids, vec!["CVE-2"]);
        assert!(assessment.requires_action());
    }

    #[test]
    fn test_findings_merge() {
        let clean = SecurityAssessment::clean();
        let vulnerable = SecurityAssessment::from_vulnerabilities(&[
            vuln("CVE-1", Severity::High),
            vuln("CVE-2", Severity::Medium),
            vuln("CVE-3", Severity::Low),
        ]);
        let unknown = SecurityAssessment::unknown("no data");

        let findings = SecurityFindings::from_assessments([
            ("a:a", &clean),
            ("b:b", &vulnerable),
            ("c:c", &unknown),
        ]);

        assert_eq!(findings.clean_count, 1);
        assert_eq!(findings.vulnerable_count, 1);
        assert_eq!(findings.unknown_count, 1);
        assert_eq!(findings.total_vulnerabilities, 3);
        assert_eq!(findings.high_count, 1);
        assert_eq!(findings.medium_count + findings.low_count, 2);
        assert_eq!(findings.worst_severity, Some(Severity::High));
        assert_eq!(findings.action_items.len(), 1);
    }

    #[test]
    fn test_findings_detect_critical() {
        let vulnerable =
            SecurityAssessment::from_vulnerabilities(&[vuln("CVE-1", Severity::Critical)]);
        let findings = SecurityFindings::from_assessments([("a:a", &vulnerable)]);
        assert!(findings.has_critical());
        assert_eq!(findings.worst_severity, Some(Severity::Critical));
    }
}
