//! Per-dependency aggregation of versions by stability tier

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

use super::classifier::{self, StabilityTier};
use super::comparator;

/// A version together with its stability tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    pub version: String,
    #[serde(rename = "type")]
    pub tier: StabilityTier,
}

impl VersionEntry {
    pub fn new(version: impl Into<String>, tier: StabilityTier) -> Self {
        Self {
            version: version.into(),
            tier,
        }
    }
}

/// Versions of one dependency organized by stability tier.
///
/// Each slot holds the maximum version of that tier under the total
/// order; `total_versions` counts distinct input strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionsByType {
    /// Dependency coordinate ("group:artifact")
    pub dependency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_stable: Option<VersionEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_rc: Option<VersionEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_beta: Option<VersionEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_alpha: Option<VersionEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_milestone: Option<VersionEntry>,
    pub total_versions: usize,
}

impl VersionsByType {
    /// Bucket an unordered version list (duplicates allowed) by tier,
    /// keeping the maximum per tier.
    pub fn from_versions<'a, I>(dependency: impl Into<String>, versions: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut distinct: HashSet<&str> = HashSet::new();
        let mut best: [Option<&str>; 5] = [None; 5];

        for version in versions {
            distinct.insert(version);
            let tier = classifier::classify_version(version);
            let slot = &mut best[tier_index(tier)];
            let replace = match slot {
                Some(current) => {
                    comparator::compare_versions(version, current) == Ordering::Greater
                }
                None => true,
            };
            if replace {
                *slot = Some(version);
            }
        }

        let entry = |tier: StabilityTier| {
            best[tier_index(tier)].map(|v| VersionEntry::new(v, tier))
        };

        Self {
            dependency: dependency.into(),
            latest_stable: entry(StabilityTier::Stable),
            latest_rc: entry(StabilityTier::ReleaseCandidate),
            latest_beta: entry(StabilityTier::Beta),
            latest_alpha: entry(StabilityTier::Alpha),
            latest_milestone: entry(StabilityTier::Milestone),
            total_versions: distinct.len(),
        }
    }

    /// Best entry for a given tier, if any version of that tier exists
    pub fn for_tier(&self, tier: StabilityTier) -> Option<&VersionEntry> {
        match tier {
            StabilityTier::Stable => self.latest_stable.as_ref(),
            StabilityTier::ReleaseCandidate => self.latest_rc.as_ref(),
            StabilityTier::Beta => self.latest_beta.as_ref(),
            StabilityTier::Alpha => self.latest_alpha.as_ref(),
            StabilityTier::Milestone => self.latest_milestone.as_ref(),
        }
    }

    /// Preferred version for the caller.
    ///
    /// With `prefer_stable` the stable entry wins whenever one exists,
    /// even if a numerically higher pre-release is present; otherwise
    /// the first entry walking tiers in preference order is returned.
    pub fn preferred_version(&self, prefer_stable: bool) -> Option<&VersionEntry> {
        if prefer_stable {
            if let Some(stable) = self.latest_stable.as_ref() {
                return Some(stable);
            }
        }
        StabilityTier::PREFERENCE_ORDER
            .iter()
            .find_map(|tier| self.for_tier(*tier))
    }

    /// Globally latest version across every tier
    pub fn overall_latest(&self) -> Option<&VersionEntry> {
        StabilityTier::PREFERENCE_ORDER
            .iter()
            .filter_map(|tier| self.for_tier(*tier))
            .max_by(|a, b| comparator::compare_versions(&a.version, &b.version))
    }
}

fn tier_index(tier: StabilityTier) -> usize {
    match tier {
        StabilityTier::Stable => 0,
        StabilityTier::ReleaseCandidate => 1,
        StabilityTier::Beta => 2,
        StabilityTier::Alpha => 3,
        StabilityTier::Milestone => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VersionsByType {
        VersionsByType::from_versions(
            "org.example:widget",
            [
                "1.0.0",
                "1.1.0",
                "2.0.0-RC1",
                "2.0.0-RC2",
                "2.0.0-beta.1",
                "2.1.0-M1",
                "1.1.0", // duplicate
            ],
        )
    }

    #[test]
    fn test_buckets_keep_max_per_tier() {
        let agg = sample();
        assert_eq!(agg.latest_stable.as_ref().unwrap().version, "1.1.0");
        assert_eq!(agg.latest_rc.as_ref().unwrap().version, "2.0.0-RC2");
        assert_eq!(agg.latest_beta.as_ref().unwrap().version, "2.0.0-beta.1");
        assert_eq!(agg.latest_milestone.as_ref().unwrap().version, "2.1.0-M1");
        assert!(agg.latest_alpha.is_none());
    }

    #[test]
    fn test_total_counts_distinct_versions() {
        assert_eq!(sample().total_versions, 6);
    }

    #[test]
    fn test_prefer_stable_wins_over_higher_rc() {
        let agg = sample();
        let preferred = agg.preferred_version(true).unwrap();
        assert_eq!(preferred.version, "1.1.0");
        assert_eq!(preferred.tier, StabilityTier::Stable);
    }

    #[test]
    fn test_preference_walk_without_stable() {
        let agg = VersionsByType::from_versions(
            "org.example:experimental",
            ["0.9.0-beta", "0.8.0-M2", "0.9.5-alpha"],
        );
        // No stable, no RC: beta is first in the preference walk
        let preferred = agg.preferred_version(true).unwrap();
        assert_eq!(preferred.tier, StabilityTier::Beta);
        assert_eq!(preferred.version, "0.9.0-beta");
    }

    #[test]
    fn test_preferred_without_stable_preference_still_walks_order() {
        let agg = sample();
        let preferred = agg.preferred_version(false).unwrap();
        assert_eq!(preferred.tier, StabilityTier::Stable);
    }

    #[test]
    fn test_overall_latest_ignores_preference() {
        let agg = sample();
        assert_eq!(agg.overall_latest().unwrap().version, "2.1.0-M1");
    }

    #[test]
    fn test_empty_input() {
        let agg = VersionsByType::from_versions("org.example:empty", []);
        assert_eq!(agg.total_versions, 0);
        assert!(agg.preferred_version(true).is_none());
        assert!(agg.overall_latest().is_none());
    }
}
