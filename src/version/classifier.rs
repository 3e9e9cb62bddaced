//! Qualifier classification into stability tiers
//!
//! Qualifier vocabularies overlap ("m1" reads as milestone, "b2" as
//! beta), so classification runs an ordered rule list where the first
//! matching rule wins. The order is load-bearing and must not be
//! rearranged without adjusting the tests.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::parser;

/// Stability tier of a version, derived from its qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityTier {
    /// Production release (no qualifier, "final", "ga", service packs,
    /// or an unrecognized vendor tag)
    Stable,
    /// Release candidate ("rc", "cr", "candidate")
    ReleaseCandidate,
    /// Beta release
    Beta,
    /// Alpha, dev or preview release
    Alpha,
    /// Milestone release
    Milestone,
}

impl StabilityTier {
    /// All tiers in preference order: preferred first
    pub const PREFERENCE_ORDER: [StabilityTier; 5] = [
        StabilityTier::Stable,
        StabilityTier::ReleaseCandidate,
        StabilityTier::Beta,
        StabilityTier::Alpha,
        StabilityTier::Milestone,
    ];

    /// Display name used in JSON output and CLI text
    pub fn display_name(&self) -> &'static str {
        match self {
            StabilityTier::Stable => "stable",
            StabilityTier::ReleaseCandidate => "rc",
            StabilityTier::Beta => "beta",
            StabilityTier::Alpha => "alpha",
            StabilityTier::Milestone => "milestone",
        }
    }
}

impl fmt::Display for StabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One classification rule: a named predicate and the tier it assigns
struct QualifierRule {
    name: &'static str,
    matches: fn(&str) -> bool,
    tier: StabilityTier,
}

/// Rule list evaluated top to bottom, first match wins.
///
/// Stable must come first so "sp1" is not swallowed by the single-letter
/// prefix checks; the prefix rules come before release-candidate so that
/// overlapping vocabularies resolve deterministically.
const RULES: &[QualifierRule] = &[
    QualifierRule {
        name: "stable",
        matches: |q| q.is_empty() || matches!(q, "final" | "ga" | "release") || q.starts_with("sp"),
        tier: StabilityTier::Stable,
    },
    QualifierRule {
        name: "alpha",
        matches: |q| q.starts_with('a') || q.contains("dev") || q.contains("preview"),
        tier: StabilityTier::Alpha,
    },
    QualifierRule {
        name: "beta",
        matches: |q| q.starts_with('b'),
        tier: StabilityTier::Beta,
    },
    QualifierRule {
        name: "milestone",
        matches: |q| q.starts_with('m'),
        tier: StabilityTier::Milestone,
    },
    QualifierRule {
        name: "release-candidate",
        matches: |q| q.starts_with("rc") || q.starts_with("cr") || q.contains("candidate"),
        tier: StabilityTier::ReleaseCandidate,
    },
];

/// Classify a normalized (lowercase) qualifier into a stability tier.
///
/// Unrecognized qualifiers are treated as stable releases: most
/// real-world unmatched suffixes are vendor build tags ("jre8",
/// "android") that denote production artifacts.
pub fn classify_qualifier(qualifier: &str) -> StabilityTier {
    for rule in RULES {
        if (rule.matches)(qualifier) {
            tracing::trace!(qualifier, rule = rule.name, "qualifier classified");
            return rule.tier;
        }
    }
    StabilityTier::Stable
}

/// Classify a full version string
pub fn classify_version(version: &str) -> StabilityTier {
    classify_qualifier(&parser::parse(Some(version)).qualifier)
}

/// Returns true if the version classifies as stable
pub fn is_stable_version(version: &str) -> bool {
    classify_version(version) == StabilityTier::Stable
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_qualifier_is_stable() {
        assert_eq!(classify_qualifier(""), StabilityTier::Stable);
    }

    #[test]
    fn test_stable_keywords() {
        assert_eq!(classify_qualifier("final"), StabilityTier::Stable);
        assert_eq!(classify_qualifier("ga"), StabilityTier::Stable);
        assert_eq!(classify_qualifier("release"), StabilityTier::Stable);
        assert_eq!(classify_qualifier("sp1"), StabilityTier::Stable);
    }

    #[test]
    fn test_alpha_qualifiers() {
        assert_eq!(classify_qualifier("alpha"), StabilityTier::Alpha);
        assert_eq!(classify_qualifier("alpha.2"), StabilityTier::Alpha);
        assert_eq!(classify_qualifier("a1"), StabilityTier::Alpha);
        assert_eq!(classify_qualifier("dev3"), StabilityTier::Alpha);
        assert_eq!(classify_qualifier("preview2"), StabilityTier::Alpha);
    }

    #[test]
    fn test_beta_qualifiers() {
        assert_eq!(classify_qualifier("beta"), StabilityTier::Beta);
        assert_eq!(classify_qualifier("b4"), StabilityTier::Beta);
    }

    #[test]
    fn test_milestone_qualifiers() {
        assert_eq!(classify_qualifier("milestone"), StabilityTier::Milestone);
        assert_eq!(classify_qualifier("m3"), StabilityTier::Milestone);
    }

    #[test]
    fn test_rc_qualifiers() {
        assert_eq!(classify_qualifier("rc1"), StabilityTier::ReleaseCandidate);
        assert_eq!(classify_qualifier("cr2"), StabilityTier::ReleaseCandidate);
        assert_eq!(
            classify_qualifier("candidate"),
            StabilityTier::ReleaseCandidate
        );
    }

    #[test]
    fn test_unrecognized_is_stable() {
        assert_eq!(classify_qualifier("jre8"), StabilityTier::Stable);
        assert_eq!(classify_qualifier("native"), StabilityTier::Stable);
    }

    #[test]
    fn test_classify_version_strings() {
        assert_eq!(classify_version("1.0.0"), StabilityTier::Stable);
        assert_eq!(classify_version("1.0.0-RC1"), StabilityTier::ReleaseCandidate);
        assert_eq!(classify_version("1.0.0-alpha.2"), StabilityTier::Alpha);
        assert_eq!(classify_version("1.0.0-M3"), StabilityTier::Milestone);
        assert_eq!(classify_version("2.0b4"), StabilityTier::Stable);
    }

    #[test]
    fn test_is_stable_version() {
        assert!(is_stable_version("6.1.4"));
        assert!(is_stable_version("1.0.0.Final"));
        assert!(!is_stable_version("6.2.0-RC2"));
    }

    #[test]
    fn test_classification_is_idempotent() {
        assert_eq!(classify_version("5.0.0-M3"), classify_version("5.0.0-M3"));
    }
}
