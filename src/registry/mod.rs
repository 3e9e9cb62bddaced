//! Registry access for fetching dependency version information
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - Maven Central search adapter
//! - Read-through TTL/LRU cache in front of the registry

mod cache;
mod client;
mod maven_central;

pub use cache::{CachedSource, VersionCache};
pub use client::HttpClient;
pub use maven_central::{MavenCentralClient, REGISTRY_NAME};

use crate::domain::Coordinate;
use crate::error::RegistryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A version published to the registry, with its release timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactVersion {
    pub version: String,
    pub released_at: DateTime<Utc>,
}

impl ArtifactVersion {
    pub fn new(version: impl Into<String>, released_at: DateTime<Utc>) -> Self {
        Self {
            version: version.into(),
            released_at,
        }
    }
}

/// Trait for registry version sources
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// Human-readable registry name for errors and logs
    fn registry_name(&self) -> &'static str;

    /// Fetch available versions for a dependency, newest first
    async fn fetch_versions(
        &self,
        coordinate: &Coordinate,
    ) -> Result<Vec<ArtifactVersion>, RegistryError>;
}

/// Build the default cached Maven Central source
pub fn default_source() -> Result<CachedSource<MavenCentralClient>, RegistryError> {
    let client = HttpClient::new()?;
    Ok(CachedSource::new(MavenCentralClient::new(client)))
}
