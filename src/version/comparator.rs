//! Total ordering over version strings and update-type derivation

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::parser::{self, ParsedVersion};

/// Kind of update between a current and a latest version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    /// Versions are identical
    None,
    /// Only a later numeric component changed (or a qualifier-only
    /// improvement, e.g. rc → release)
    Patch,
    /// The second numeric component increased
    Minor,
    /// The first numeric component increased
    Major,
    /// Missing input, or the latest version is not strictly newer
    Unknown,
}

impl UpdateType {
    pub fn display_name(&self) -> &'static str {
        match self {
            UpdateType::None => "none",
            UpdateType::Patch => "patch",
            UpdateType::Minor => "minor",
            UpdateType::Major => "major",
            UpdateType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Compare two optional version strings. `None` sorts before any
/// version; two `None`s are equal.
pub fn compare(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_versions(a, b),
    }
}

/// Compare two version strings under the lenient total order:
/// numeric parts zero-padded and compared lexicographically; on a
/// numeric tie a plain release sorts after any qualified one
/// (pre-releases precede their release); otherwise qualifiers compare
/// as strings.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let pa = parser::parse(Some(a));
    let pb = parser::parse(Some(b));

    match compare_numeric_parts(&pa, &pb) {
        Ordering::Equal => compare_qualifiers(&pa.qualifier, &pb.qualifier),
        other => other,
    }
}

fn compare_numeric_parts(a: &ParsedVersion, b: &ParsedVersion) -> Ordering {
    let len = a.numeric_parts.len().max(b.numeric_parts.len());
    for i in 0..len {
        let va = a.numeric_parts.get(i).copied().unwrap_or(0);
        let vb = b.numeric_parts.get(i).copied().unwrap_or(0);
        match va.cmp(&vb) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

fn compare_qualifiers(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        // An unqualified release outranks its own pre-releases
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

/// Determine the update type between a current and a latest version.
///
/// Equal strings yield `None`. A missing side, or a latest that is not
/// strictly greater under the total order (downgrade or malformed
/// pair), yields `Unknown` — a defined output, not an error. Otherwise
/// the first numeric index where latest exceeds current decides
/// major/minor/patch; a qualifier-only improvement counts as a patch.
pub fn update_type(current: Option<&str>, latest: Option<&str>) -> UpdateType {
    let (Some(current), Some(latest)) = (current, latest) else {
        return UpdateType::Unknown;
    };

    if current == latest {
        return UpdateType::None;
    }

    if compare_versions(current, latest) != Ordering::Less {
        return UpdateType::Unknown;
    }

    let pc = parser::parse(Some(current));
    let pl = parser::parse(Some(latest));

    let len = pc.numeric_parts.len().max(pl.numeric_parts.len());
    for i in 0..len {
        let c = pc.numeric_parts.get(i).copied().unwrap_or(0);
        let l = pl.numeric_parts.get(i).copied().unwrap_or(0);
        if l > c {
            return match i {
                0 => UpdateType::Major,
                1 => UpdateType::Minor,
                _ => UpdateType::Patch,
            };
        }
        if c > l {
            return UpdateType::Unknown;
        }
    }

    // Numerically identical but strictly newer: qualifier-only
    // improvement such as 1.0.0-rc1 -> 1.0.0
    UpdateType::Patch
}

/// Maximum of a version list under the total order, or `None` for an
/// empty input
pub fn get_latest<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    versions
        .into_iter()
        .max_by(|a, b| compare_versions(a, b))
}
