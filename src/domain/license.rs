//! License categorization and aggregate findings

use serde::{Deserialize, Serialize};

/// Compliance category of a license
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseCategory {
    Permissive,
    WeakCopyleft,
    StrongCopyleft,
    Unknown,
}

const PERMISSIVE_PATTERNS: &[&str] = &[
    "apache",
    "mit",
    "bsd",
    "isc",
    "unlicense",
    "cc0",
    "zlib",
    "public domain",
];

const WEAK_COPYLEFT_PATTERNS: &[&str] = &[
    "lgpl",
    "lesser general public",
    "library general public",
    "mpl",
    "mozilla",
    "epl",
    "eclipse",
    "cddl",
    "common development and distribution",
];

const STRONG_COPYLEFT_PATTERNS: &[&str] = &["gpl", "general public license", "agpl", "affero"];

impl LicenseCategory {
    /// Categorize a license name by pattern matching.
    ///
    /// Weak copyleft is checked before strong copyleft so "LGPL"
    /// does not match the "gpl" pattern.
    pub fn categorize(license_name: &str) -> Self {
        let name = license_name.trim();
        if name.is_empty() {
            return LicenseCategory::Unknown;
        }
        let lower = name.to_lowercase();

        if PERMISSIVE_PATTERNS.iter().any(|p| lower.contains(p)) {
            return LicenseCategory::Permissive;
        }
        if WEAK_COPYLEFT_PATTERNS.iter().any(|p| lower.contains(p)) {
            return LicenseCategory::WeakCopyleft;
        }
        if STRONG_COPYLEFT_PATTERNS.iter().any(|p| lower.contains(p)) {
            return LicenseCategory::StrongCopyleft;
        }
        LicenseCategory::Unknown
    }

    pub fn is_copyleft(&self) -> bool {
        matches!(
            self,
            LicenseCategory::WeakCopyleft | LicenseCategory::StrongCopyleft
        )
    }
}

/// License information for one dependency version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub category: LicenseCategory,
}

impl LicenseInfo {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let category = LicenseCategory::categorize(&name);
        Self {
            name: Some(name),
            category,
        }
    }

    pub fn unknown() -> Self {
        Self {
            name: None,
            category: LicenseCategory::Unknown,
        }
    }
}

/// Aggregated license findings across a dependency set
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LicenseFindings {
    pub permissive_count: usize,
    pub copyleft_count: usize,
    pub unknown_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub flagged_dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub missing_licenses: Vec<String>,
}

impl LicenseFindings {
    /// Empty findings for when no scanning was performed
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge per-dependency license info into aggregate counters
    pub fn from_licenses<'a, I>(licenses: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a LicenseInfo)>,
    {
        let mut findings = Self::default();
        for (dependency, info) in licenses {
            match info.category {
                LicenseCategory::Permissive => findings.permissive_count += 1,
                LicenseCategory::WeakCopyleft | LicenseCategory::StrongCopyleft => {
                    findings.copyleft_count += 1;
                    let label = info.name.as_deref().unwrap_or("copyleft");
                    findings
                        .flagged_dependencies
                        .push(format!("{} ({})", dependency, label));
                }
                LicenseCategory::Unknown => {
                    findings.unknown_count += 1;
                    findings.missing_licenses.push(dependency.to_string());
                }
            }
        }
        findings
    }

    /// Number of flags that feed the health score deduction
    pub fn flag_count(&self) -> usize {
        self.copyleft_count + self.unknown_count
    }

    pub fn needs_review(&self) -> bool {
        self.flag_count() > 0
    }
}
