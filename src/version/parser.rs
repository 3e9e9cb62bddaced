//! Lenient version string parsing
//!
//! Maven Central carries plenty of version strings that predate any
//! versioning convention ("2.0b4", "1.0.Final", "20040218.194733").
//! Parsing therefore never fails: malformed numeric segments degrade
//! to zero and everything after the qualifier boundary becomes an
//! opaque lowercase qualifier.

/// Parsed form of a version string: ordered numeric components plus a
/// normalized qualifier
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedVersion {
    /// Leading numeric components (e.g. [2, 17, 0] for "2.17.0-RC1")
    pub numeric_parts: Vec<u64>,
    /// Lowercased qualifier, empty for plain releases (e.g. "rc1")
    pub qualifier: String,
}

impl ParsedVersion {
    /// Returns true if this version carries no qualifier
    pub fn is_plain(&self) -> bool {
        self.qualifier.is_empty()
    }
}

/// Parse a version string into numeric parts and a qualifier.
///
/// The qualifier starts at the first hyphen/underscore, or at the first
/// dot-separated segment that begins with a letter. A leading `v` is
/// tolerated ("v1.2.3"). Numeric segments that fail integer parsing are
/// coerced to 0 instead of erroring.
pub fn parse(raw: Option<&str>) -> ParsedVersion {
    let Some(raw) = raw else {
        return ParsedVersion::default();
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedVersion::default();
    }

    // Tolerate a "v" prefix as used by some publishers
    let trimmed = match trimmed.strip_prefix(['v', 'V']) {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => trimmed,
    };

    // Underscores act as a qualifier boundary the same way hyphens do
    let (numeric_text, mut qualifier) = match trimmed.find(['-', '_']) {
        Some(idx) => (&trimmed[..idx], trimmed[idx + 1..].to_lowercase()),
        None => (trimmed, String::new()),
    };

    let mut numeric_parts = Vec::new();
    let mut segments = numeric_text.split('.');

    for (i, segment) in segments.by_ref().enumerate() {
        if segment.starts_with(|c: char| c.is_ascii_alphabetic()) && i > 0 {
            // Dot-separated qualifier without a hyphen, e.g. "1.0.Final"
            let trailing: Vec<&str> = std::iter::once(segment).chain(segments).collect();
            let dotted = trailing.join(".").to_lowercase();
            qualifier = if qualifier.is_empty() {
                dotted
            } else {
                format!("{}-{}", dotted, qualifier)
            };
            break;
        }
        numeric_parts.push(segment.parse().unwrap_or(0));
    }

    if numeric_parts.is_empty() {
        // Purely alphabetic input ("beta") still yields one numeric slot
        numeric_parts.push(0);
        if qualifier.is_empty() {
            qualifier = numeric_text.to_lowercase();
        }
    }

    ParsedVersion {
        numeric_parts,
        qualifier,
    }
}
