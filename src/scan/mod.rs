//! Security and license collaborators
//!
//! Vulnerability and license data come from external services. The
//! core only defines the collaborator traits and merges their
//! per-dependency results; it never computes findings itself.

mod osv;
mod pom_license;

pub use osv::OsvScanner;
pub use pom_license::PomLicenseScanner;

use crate::domain::{Coordinate, LicenseInfo, SecurityAssessment};
use crate::error::ScanError;
use async_trait::async_trait;

/// Vulnerability data collaborator
#[async_trait]
pub trait SecurityScanner: Send + Sync {
    /// Assess one dependency version
    async fn assess(
        &self,
        coordinate: &Coordinate,
        version: &str,
    ) -> Result<SecurityAssessment, ScanError>;
}

/// License data collaborator
#[async_trait]
pub trait LicenseScanner: Send + Sync {
    /// Look up the license of one dependency version
    async fn lookup(
        &self,
        coordinate: &Coordinate,
        version: &str,
    ) -> Result<LicenseInfo, ScanError>;
}
