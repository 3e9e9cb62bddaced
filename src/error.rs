//! Application error types using thiserror
//!
//! Error hierarchy:
//! - CoordinateError: malformed dependency coordinates
//! - RegistryError: Maven Central communication failures
//! - ScanError: security/license collaborator failures
//! - ToolError: the structured, serializable error shape returned at
//!   the operation boundary

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from parsing dependency coordinate strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    /// Input was empty or whitespace
    #[error("dependency coordinate cannot be empty")]
    Empty,

    /// Fewer than two segments
    #[error("invalid coordinate '{input}': minimum format is 'groupId:artifactId'")]
    MissingArtifact { input: String },

    /// More than five segments
    #[error("invalid coordinate '{input}': maximum format is 'groupId:artifactId:version:packaging:classifier'")]
    TooManySegments { input: String },

    /// Empty group or artifact segment
    #[error("invalid coordinate '{input}': groupId and artifactId cannot be empty")]
    EmptySegment { input: String },
}

/// Errors related to registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Dependency not found in the registry
    #[error("dependency '{coordinate}' not found in {registry}")]
    NotFound {
        coordinate: String,
        registry: String,
    },

    /// Network request failed
    #[error("failed to fetch '{coordinate}' from {registry}: {message}")]
    Network {
        coordinate: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry}")]
    RateLimited { registry: String },

    /// Registry returned an unparseable response
    #[error("invalid response from {registry} for '{coordinate}': {message}")]
    InvalidResponse {
        coordinate: String,
        registry: String,
        message: String,
    },

    /// Request timed out
    #[error("timeout while fetching '{coordinate}' from {registry}")]
    Timeout {
        coordinate: String,
        registry: String,
    },
}

impl RegistryError {
    pub fn not_found(coordinate: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::NotFound {
            coordinate: coordinate.into(),
            registry: registry.into(),
        }
    }

    pub fn network(
        coordinate: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::Network {
            coordinate: coordinate.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    pub fn rate_limited(registry: impl Into<String>) -> Self {
        RegistryError::RateLimited {
            registry: registry.into(),
        }
    }

    pub fn invalid_response(
        coordinate: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            coordinate: coordinate.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    pub fn timeout(coordinate: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            coordinate: coordinate.into(),
            registry: registry.into(),
        }
    }

    /// Returns true for errors worth retrying after a delay
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RegistryError::RateLimited { .. }
                | RegistryError::Network { .. }
                | RegistryError::Timeout { .. }
        )
    }
}

/// Errors from the security/license collaborators
#[derive(Error, Debug)]
pub enum ScanError {
    /// Security data source failed
    #[error("security check failed for '{coordinate}': {message}")]
    Security {
        coordinate: String,
        message: String,
    },

    /// License data source failed
    #[error("license check failed for '{coordinate}': {message}")]
    License {
        coordinate: String,
        message: String,
    },
}

impl ScanError {
    pub fn security(coordinate: impl Into<String>, message: impl Into<String>) -> Self {
        ScanError::Security {
            coordinate: coordinate.into(),
            message: message.into(),
        }
    }

    pub fn license(coordinate: impl Into<String>, message: impl Into<String>) -> Self {
        ScanError::License {
            coordinate: coordinate.into(),
            message: message.into(),
        }
    }
}

/// Error classification codes exposed at the operation boundary
pub mod codes {
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const EXTERNAL_SERVICE_UNAVAILABLE: &str = "EXTERNAL_SERVICE_UNAVAILABLE";
    pub const SECURITY_CHECK_FAILED: &str = "SECURITY_CHECK_FAILED";
    pub const LICENSE_CHECK_FAILED: &str = "LICENSE_CHECK_FAILED";
    pub const RATE_LIMITED: &str = "RATE_LIMITED";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Default retry hint for transient registry failures, in seconds
const DEFAULT_RETRY_AFTER_SECS: u64 = 30;

/// Structured error returned to callers.
///
/// Rate-limit and service-unavailable errors always carry a retry
/// hint; parse and input errors never do.
#[derive(Debug, Clone, Serialize)]
pub struct ToolError {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
}

impl ToolError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            code: codes::INVALID_INPUT,
            message: message.into(),
            data: Map::new(),
            retry_after_secs: None,
        }
    }

    pub fn parse_error(coordinate: &str, message: impl Into<String>) -> Self {
        let mut data = Map::new();
        data.insert("coordinate".into(), Value::String(coordinate.to_string()));
        data.insert(
            "expected_format".into(),
            Value::String("groupId:artifactId[:version]".to_string()),
        );
        Self {
            code: codes::PARSE_ERROR,
            message: message.into(),
            data,
            retry_after_secs: None,
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        let mut data = Map::new();
        data.insert("service".into(), Value::String("Maven Central".to_string()));
        Self {
            code: codes::EXTERNAL_SERVICE_UNAVAILABLE,
            message: message.into(),
            data,
            retry_after_secs: Some(DEFAULT_RETRY_AFTER_SECS),
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            code: codes::RATE_LIMITED,
            message: message.into(),
            data: Map::new(),
            retry_after_secs: Some(DEFAULT_RETRY_AFTER_SECS),
        }
    }

    pub fn security_check_failed(message: impl Into<String>) -> Self {
        Self {
            code: codes::SECURITY_CHECK_FAILED,
            message: message.into(),
            data: Map::new(),
            retry_after_secs: None,
        }
    }

    pub fn license_check_failed(message: impl Into<String>) -> Self {
        Self {
            code: codes::LICENSE_CHECK_FAILED,
            message: message.into(),
            data: Map::new(),
            retry_after_secs: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: codes::INTERNAL_ERROR,
            message: message.into(),
            data: Map::new(),
            retry_after_secs: None,
        }
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

impl From<CoordinateError> for ToolError {
    fn from(err: CoordinateError) -> Self {
        match &err {
            CoordinateError::Empty => ToolError::invalid_input(err.to_string()),
            CoordinateError::MissingArtifact { input }
            | CoordinateError::TooManySegments { input }
            | CoordinateError::EmptySegment { input } => {
                ToolError::parse_error(input, err.to_string())
            }
        }
    }
}

impl From<RegistryError> for ToolError {
    fn from(err: RegistryError) -> Self {
        match &err {
            RegistryError::RateLimited { .. } => ToolError::rate_limited(err.to_string()),
            RegistryError::NotFound { .. } => ToolError::invalid_input(err.to_string()),
            _ => ToolError::service_unavailable(err.to_string()),
        }
    }
}

impl From<ScanError> for ToolError {
    fn from(err: ScanError) -> Self {
        match &err {
            ScanError::Security { .. } => ToolError::security_check_failed(err.to_string()),
            ScanError::License { .. } => ToolError::license_check_failed(err.to_string()),
        }
    }
}
