//! Dependency coordinate parsing
//!
//! A coordinate identifies a dependency independent of version:
//! "groupId:artifactId" with optional version, packaging and
//! classifier segments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoordinateError;

/// A parsed dependency coordinate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packaging: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl Coordinate {
    /// Parse "groupId:artifactId[:version[:packaging[:classifier]]]"
    pub fn parse(input: &str) -> Result<Self, CoordinateError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CoordinateError::Empty);
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        match parts.len() {
            0 | 1 => Err(CoordinateError::MissingArtifact {
                input: trimmed.to_string(),
            }),
            2..=5 => {
                let group_id = parts[0].trim();
                let artifact_id = parts[1].trim();
                if group_id.is_empty() || artifact_id.is_empty() {
                    return Err(CoordinateError::EmptySegment {
                        input: trimmed.to_string(),
                    });
                }

                let part_or_none = |idx: usize| {
                    parts
                        .get(idx)
                        .map(|p| p.trim())
                        .filter(|p| !p.is_empty())
                        .map(str::to_string)
                };

                Ok(Self {
                    group_id: group_id.to_string(),
                    artifact_id: artifact_id.to_string(),
                    version: part_or_none(2),
                    packaging: part_or_none(3),
                    classifier: part_or_none(4),
                })
            }
            _ => Err(CoordinateError::TooManySegments {
                input: trimmed.to_string(),
            }),
        }
    }

    /// "group:artifact" identifier, independent of version
    pub fn coordinate_string(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    /// Normalized cache key; packaging defaults to "jar"
    pub fn cache_key(&self) -> String {
        format!(
            "{}:{}:{}",
            self.group_id,
            self.artifact_id,
            self.packaging.as_deref().unwrap_or("jar")
        )
    }

    /// Drop the version segment, keeping identity only
    pub fn without_version(&self) -> Self {
        Self {
            version: None,
            ..self.clone()
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)?;
        if let Some(version) = &self.version {
            write!(f, ":{}", version)?;
        }
        Ok(())
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split a comma- or newline-separated coordinate list into trimmed,
/// non-empty entries
pub fn split_coordinate_list(input: &str) -> Vec<&str> {
    input
        .lines()
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|dep| !dep.is_empty())
        .collect()
}
