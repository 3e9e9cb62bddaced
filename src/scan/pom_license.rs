//! License lookup from published POM files
//!
//! Fetches the POM of a specific version from the Maven Central
//! repository and extracts the first declared license name. POMs are
//! hand-edited XML in the wild, so extraction is a tolerant regex scan
//! rather than a strict parse.

use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::domain::{Coordinate, LicenseInfo};
use crate::error::ScanError;
use crate::registry::HttpClient;
use crate::scan::LicenseScanner;

/// Maven Central repository root for POM downloads
const MAVEN_REPO_URL: &str = "https://repo1.maven.org/maven2";

/// POM-based license scanner
pub struct PomLicenseScanner {
    client: HttpClient,
    base_url: String,
}

fn license_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<licenses>.*?<license>.*?<name>\s*([^<]+?)\s*</name>")
            .expect("invalid license regex")
    })
}

impl PomLicenseScanner {
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, MAVEN_REPO_URL)
    }

    /// Scanner against a custom repository root (for testing)
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn pom_url(&self, coordinate: &Coordinate, version: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}-{}.pom",
            self.base_url,
            coordinate.group_id.replace('.', "/"),
            coordinate.artifact_id,
            version,
            coordinate.artifact_id,
            version
        )
    }

    /// Extract the first declared license name from POM XML
    fn extract_license_name(pom: &str) -> Option<String> {
        license_name_regex()
            .captures(pom)
            .map(|captures| captures[1].to_string())
    }
}

#[async_trait]
impl LicenseScanner for PomLicenseScanner {
    async fn lookup(
        &self,
        coordinate: &Coordinate,
        version: &str,
    ) -> Result<LicenseInfo, ScanError> {
        let coordinate_string = coordinate.coordinate_string();
        let url = self.pom_url(coordinate, version);

        let pom = self
            .client
            .get_text(&url, &coordinate_string, "Maven Central")
            .await
            .map_err(|e| ScanError::license(&coordinate_string, e.to_string()))?;

        let info = match Self::extract_license_name(&pom) {
            Some(name) => LicenseInfo::named(name),
            // Many parent POMs carry the license; a missing element in
            // the child is an unknown, not an error
            None => LicenseInfo::unknown(),
        };

        debug!(
            dependency = %coordinate_string,
            version,
            license = ?info.name,
            "license lookup complete"
        );

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LicenseCategory;

    fn coordinate(input: &str) -> Coordinate {
        Coordinate::parse(input).unwrap()
    }

    #[test]
    fn test_pom_url_layout() {
        let scanner = PomLicenseScanner::new(HttpClient::new().unwrap());
        let url = scanner.pom_url(&coordinate("org.apache.commons:commons-lang3"), "3.14.0");
        assert_eq!(
            url,
            "https://repo1.maven.org/maven2/org/apache/commons/commons-lang3/3.14.0/commons-lang3-3.14.0.pom"
        );
    }

    #[test]
    fn test_extract_license_name() {
        let pom = r#"
            <project>
              <licenses>
                <license>
                  <name>Apache License, Version 2.0</name>
                  <url>https://www.apache.org/licenses/LICENSE-2.0.txt</url>
                </license>
              </licenses>
            </project>"#;
        assert_eq!(
            PomLicenseScanner::extract_license_name(pom).as_deref(),
            Some("Apache License, Version 2.0")
        );
    }

    #[test]
    fn test_extract_license_name_missing() {
        let pom = "<project><artifactId>x</artifactId></project>";
        assert!(PomLicenseScanner::extract_license_name(pom).is_none());
    }

    #[tokio::test]
    async fn test_lookup_categorizes_license() {
        let mut server = mockito::Server::new_async().await;
        let pom = r#"<project>
            <licenses><license><name>Eclipse Public License v2.0</name></license></licenses>
        </project>"#;
        let _m = server
            .mock("GET", "/junit/junit/4.13.2/junit-4.13.2.pom")
            .with_status(200)
            .with_body(pom)
            .create_async()
            .await;

        let scanner =
            PomLicenseScanner::with_base_url(HttpClient::new().unwrap(), server.url());
        let info = scanner
            .lookup(&coordinate("junit:junit"), "4.13.2")
            .await
            .unwrap();

        assert_eq!(info.name.as_deref(), Some("Eclipse Public License v2.0"));
        assert_eq!(info.category, LicenseCategory::WeakCopyleft);
    }

    #[tokio::test]
    async fn test_lookup_missing_pom_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let scanner = PomLicenseScanner::with_base_url(
            HttpClient::new().unwrap().with_max_retries(0),
            server.url(),
        );
        let result = scanner.lookup(&coordinate("org.example:missing"), "1.0").await;

        assert!(matches!(result, Err(ScanError::License { .. })));
    }
}
