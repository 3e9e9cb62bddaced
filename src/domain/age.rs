//! Dependency freshness classification
//!
//! Freshness is derived from the release timestamp of the latest
//! version and merely consumed by the health scorer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Days within which a release counts as fresh
const FRESH_MAX_DAYS: i64 = 30;
/// Days within which a release counts as current
const CURRENT_MAX_DAYS: i64 = 180;
/// Days within which a release counts as aging; older is stale
const AGING_MAX_DAYS: i64 = 730;

/// How recently a dependency's latest version was released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    Fresh,
    Current,
    Aging,
    Stale,
}

impl Freshness {
    /// Classify by days since the latest release
    pub fn classify(days_since_release: i64) -> Self {
        if days_since_release <= FRESH_MAX_DAYS {
            Freshness::Fresh
        } else if days_since_release <= CURRENT_MAX_DAYS {
            Freshness::Current
        } else if days_since_release <= AGING_MAX_DAYS {
            Freshness::Aging
        } else {
            Freshness::Stale
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Freshness::Fresh => "fresh",
            Freshness::Current => "current",
            Freshness::Aging => "aging",
            Freshness::Stale => "stale",
        }
    }
}

/// Freshness of one dependency's latest release
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeReport {
    pub dependency: String,
    pub latest_version: String,
    pub freshness: Freshness,
    pub days_since_release: i64,
    pub released_at: DateTime<Utc>,
}

impl AgeReport {
    pub fn from_release(
        dependency: impl Into<String>,
        latest_version: impl Into<String>,
        released_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        let days = (now - released_at).num_days();
        Self {
            dependency: dependency.into(),
            latest_version: latest_version.into(),
            freshness: Freshness::classify(days),
            days_since_release: days,
            released_at,
        }
    }
}

/// Count of dependencies per freshness class across a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FreshnessBreakdown {
    pub fresh: usize,
    pub current: usize,
    pub aging: usize,
    pub stale: usize,
}

impl FreshnessBreakdown {
    pub fn add(&mut self, freshness: Freshness) {
        match freshness {
            Freshness::Fresh => self.fresh += 1,
            Freshness::Current => self.current += 1,
            Freshness::Aging => self.aging += 1,
            Freshness::Stale => self.stale += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.fresh + self.current + self.aging + self.stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(Freshness::classify(0), Freshness::Fresh);
        assert_eq!(Freshness::classify(30), Freshness::Fresh);
        assert_eq!(Freshness::classify(31), Freshness::Current);
        assert_eq!(Freshness::classify(180), Freshness::Current);
        assert_eq!(Freshness::classify(181), Freshness::Aging);
        assert_eq!(Freshness::classify(730), Freshness::Aging);
        assert_eq!(Freshness::classify(731), Freshness::Stale);
    }

    #[test]
    fn test_age_report_from_release() {
        let now = Utc::now();
        let report = AgeReport::from_release(
            "junit:junit",
            "4.13.2",
            now - Duration::days(400),
            now,
        );
        assert_eq!(report.freshness, Freshness::Aging);
        assert_eq!(report.days_since_release, 400);
    }

    #[test]
    fn test_breakdown_accumulates() {
        let mut breakdown = FreshnessBreakdown::default();
        breakdown.add(Freshness::Fresh);
        breakdown.add(Freshness::Stale);
        breakdown.add(Freshness::Stale);
        assert_eq!(breakdown.fresh, 1);
        assert_eq!(breakdown.stale, 2);
        assert_eq!(breakdown.total(), 3);
    }
}
