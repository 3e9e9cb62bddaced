//! Version intelligence engine
//!
//! This module provides:
//! - Lenient parsing of heterogeneous version strings
//! - Qualifier classification into stability tiers
//! - A total order over version strings and update-type derivation
//! - Per-dependency aggregation of versions by tier
//!
//! Everything here is pure and stateless; concurrent callers need no
//! synchronization.

mod aggregate;
mod classifier;
mod comparator;
mod parser;

pub use aggregate::{VersionEntry, VersionsByType};
pub use classifier::{classify_qualifier, classify_version, is_stable_version, StabilityTier};
pub use comparator::{compare, compare_versions, get_latest, update_type, UpdateType};
pub use parser::{parse, ParsedVersion};
