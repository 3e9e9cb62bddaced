//! OSV.dev vulnerability scanner
//!
//! Queries the OSV API for known vulnerabilities affecting a specific
//! dependency version in the Maven ecosystem.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Coordinate, SecurityAssessment, Severity, Vulnerability};
use crate::error::ScanError;
use crate::registry::HttpClient;
use crate::scan::SecurityScanner;

/// OSV query endpoint
const OSV_API_URL: &str = "https://api.osv.dev/v1/query";

/// OSV scanner backed by the public OSV.dev API
pub struct OsvScanner {
    client: HttpClient,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct OsvQuery {
    package: OsvPackage,
    version: String,
}

#[derive(Debug, Serialize)]
struct OsvPackage {
    name: String,
    ecosystem: &'static str,
}

#[derive(Debug, Deserialize)]
struct OsvResponse {
    #[serde(default)]
    vulns: Vec<OsvVuln>,
}

#[derive(Debug, Deserialize)]
struct OsvVuln {
    id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    database_specific: Option<OsvDatabaseSpecific>,
}

#[derive(Debug, Deserialize)]
struct OsvDatabaseSpecific {
    #[serde(default)]
    severity: Option<String>,
}

impl OsvScanner {
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, OSV_API_URL)
    }

    /// Scanner against a custom endpoint (for testing)
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn to_vulnerability(vuln: OsvVuln) -> Vulnerability {
        let severity = vuln
            .database_specific
            .and_then(|d| d.severity)
            .map(|label| Severity::from_label(&label))
            .unwrap_or(Severity::Unknown);
        Vulnerability {
            id: vuln.id,
            severity,
            summary: vuln.summary,
        }
    }
}

#[async_trait]
impl SecurityScanner for OsvScanner {
    async fn assess(
        &self,
        coordinate: &Coordinate,
        version: &str,
    ) -> Result<SecurityAssessment, ScanError> {
        let coordinate_string = coordinate.coordinate_string();
        let query = OsvQuery {
            package: OsvPackage {
                name: coordinate_string.clone(),
                ecosystem: "Maven",
            },
            version: version.to_string(),
        };

        let response: OsvResponse = self
            .client
            .post_json(&self.base_url, &query, &coordinate_string, "OSV")
            .await
            .map_err(|e| ScanError::security(&coordinate_string, e.to_string()))?;

        debug!(
            dependency = %coordinate_string,
            version,
            vulns = response.vulns.len(),
            "OSV assessment complete"
        );

        let vulnerabilities: Vec<Vulnerability> = response
            .vulns
            .into_iter()
            .map(Self::to_vulnerability)
            .collect();

        Ok(SecurityAssessment::from_vulnerabilities(&vulnerabilities))
    }
}
