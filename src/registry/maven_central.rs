//! Maven Central Search API adapter
//!
//! Fetches version information from the Maven Central search index.
//! API endpoint: https://search.maven.org/solrsearch/select
//!
//! Query format: q=g:{groupId}+AND+a:{artifactId}&core=gav&rows=200&wt=json

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::domain::Coordinate;
use crate::error::RegistryError;
use crate::registry::{ArtifactVersion, HttpClient, VersionSource};
use crate::version;

/// Maven Central Search API base URL
const MAVEN_CENTRAL_API_URL: &str = "https://search.maven.org/solrsearch/select";

/// Maximum number of versions to fetch per dependency
const MAX_VERSIONS: u32 = 200;

/// Registry display name used in errors and logs
pub const REGISTRY_NAME: &str = "Maven Central";

/// Maven Central search adapter
pub struct MavenCentralClient {
    client: HttpClient,
    base_url: String,
}

/// Maven Central search response
#[derive(Debug, Deserialize)]
struct MavenSearchResponse {
    response: MavenResponseBody,
}

/// Maven Central response body
#[derive(Debug, Deserialize)]
struct MavenResponseBody {
    docs: Vec<MavenVersionDoc>,
}

/// Maven Central version document
#[derive(Debug, Deserialize)]
struct MavenVersionDoc {
    /// Version string
    v: String,
    /// Timestamp in milliseconds since epoch
    timestamp: i64,
}

impl MavenCentralClient {
    /// Create a new Maven Central client
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, MAVEN_CENTRAL_API_URL)
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build the gav-core search URL for a coordinate
    fn build_url(&self, coordinate: &Coordinate) -> String {
        let mut query = format!(
            "g:{}+AND+a:{}",
            coordinate.group_id, coordinate.artifact_id
        );
        if let Some(packaging) = &coordinate.packaging {
            query.push_str(&format!("+AND+p:{}", packaging));
        }
        format!(
            "{}?q={}&core=gav&rows={}&wt=json",
            self.base_url, query, MAX_VERSIONS
        )
    }

    /// Convert a millisecond timestamp to DateTime<Utc>
    fn timestamp_to_datetime(timestamp_ms: i64) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(timestamp_ms).single()
    }
}

#[async_trait]
impl VersionSource for MavenCentralClient {
    fn registry_name(&self) -> &'static str {
        REGISTRY_NAME
    }

    async fn fetch_versions(
        &self,
        coordinate: &Coordinate,
    ) -> Result<Vec<ArtifactVersion>, RegistryError> {
        let url = self.build_url(coordinate);
        let coordinate_string = coordinate.coordinate_string();

        debug!(dependency = %coordinate_string, "querying Maven Central");

        let response: MavenSearchResponse = self
            .client
            .get_json(&url, &coordinate_string, REGISTRY_NAME)
            .await?;

        if response.response.docs.is_empty() {
            return Err(RegistryError::not_found(&coordinate_string, REGISTRY_NAME));
        }

        let mut versions: Vec<ArtifactVersion> = response
            .response
            .docs
            .into_iter()
            .filter_map(|doc| {
                Self::timestamp_to_datetime(doc.timestamp)
                    .map(|released_at| ArtifactVersion::new(doc.v, released_at))
            })
            .collect();

        // Newest first under the version total order
        versions.sort_by(|a, b| version::compare_versions(&b.version, &a.version));
        versions.dedup_by(|a, b| a.version == b.version);

        debug!(
            dependency = %coordinate_string,
            count = versions.len(),
            "fetched versions"
        );

        Ok(versions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate(input: &str) -> Coordinate {
        Coordinate::parse(input).unwrap()
    }

    #[test]
    fn test_build_url() {
        let client = MavenCentralClient::new(HttpClient::new().unwrap());
        let url = client.build_url(&coordinate("org.springframework:spring-core"));
        assert!(url.starts_with(MAVEN_CENTRAL_API_URL));
        assert!(url.contains("g:org.springframework+AND+a:spring-core"));
        assert!(url.contains("core=gav"));
    }

    #[test]
    fn test_build_url_with_packaging() {
        let client = MavenCentralClient::new(HttpClient::new().unwrap());
        let url = client.build_url(&coordinate("org.example:lib:1.0:war"));
        assert!(url.contains("+AND+p:war"));
    }

    #[test]
    fn test_timestamp_conversion() {
        let dt = MavenCentralClient::timestamp_to_datetime(1_700_000_000_000).unwrap();
        assert_eq!(dt.timezone(), Utc);
    }

    #[tokio::test]
    async fn test_fetch_versions_parses_and_sorts() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{
            "response": {
                "docs": [
                    {"v": "1.0.0", "timestamp": 1500000000000},
                    {"v": "2.1.0", "timestamp": 1700000000000},
                    {"v": "2.0.0", "timestamp": 1600000000000},
                    {"v": "2.1.0", "timestamp": 1700000000000}
                ]
            }
        }"#;
        let _m = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client =
            MavenCentralClient::with_base_url(HttpClient::new().unwrap(), server.url());
        let versions = client
            .fetch_versions(&coordinate("org.example:widget"))
            .await
            .unwrap();

        let names: Vec<&str> = versions.iter().map(|v| v.version.as_str()).collect();
        assert_eq!(names, vec!["2.1.0", "2.0.0", "1.0.0"]);
    }

    #[tokio::test]
    async fn test_fetch_versions_empty_docs_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response": {"docs": []}}"#)
            .create_async()
            .await;

        let client =
            MavenCentralClient::with_base_url(HttpClient::new().unwrap(), server.url());
        let result = client
            .fetch_versions(&coordinate("org.example:missing"))
            .await;

        assert!(matches!(result, Err(RegistryError::NotFound { .. })));
    }
}
