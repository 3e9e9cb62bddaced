//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Exponential backoff retry logic (max 3 retries)
//! - Rate limit error handling

use crate::error::RegistryError;
use reqwest::Client;
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("depscope/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| RegistryError::Network {
                coordinate: String::new(),
                registry: "HTTP client".to_string(),
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Perform a GET request with retry logic and error context
    pub async fn get(
        &self,
        url: &str,
        coordinate: &str,
        registry: &str,
    ) -> Result<reqwest::Response, RegistryError> {
        self.send_with_retry(coordinate, registry, || self.client.get(url))
            .await
    }

    /// Perform a GET request and parse the JSON response
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        coordinate: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let response = self.get(url, coordinate, registry).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| RegistryError::invalid_response(coordinate, registry, format!("failed to parse JSON: {}", e)))
    }

    /// Perform a GET request and return the body as text
    pub async fn get_text(
        &self,
        url: &str,
        coordinate: &str,
        registry: &str,
    ) -> Result<String, RegistryError> {
        let response = self.get(url, coordinate, registry).await?;
        response.text().await.map_err(|e| {
            RegistryError::invalid_response(
                coordinate,
                registry,
                format!("failed to read response body: {}", e),
            )
        })
    }

    /// POST a JSON body and parse the JSON response
    pub async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        coordinate: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let payload =
            serde_json::to_value(body).map_err(|e| {
                RegistryError::invalid_response(coordinate, registry, e.to_string())
            })?;
        let response = self
            .send_with_retry(coordinate, registry, || {
                self.client.post(url).json(&payload)
            })
            .await?;
        response
            .json::<T>()
            .await
            .map_err(|e| RegistryError::invalid_response(coordinate, registry, format!("failed to parse JSON: {}", e)))
    }

    /// Send a request, retrying transient failures with exponential backoff
    async fn send_with_retry<F>(
        &self,
        coordinate: &str,
        registry: &str,
        make_request: F,
    ) -> Result<reqwest::Response, RegistryError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            match make_request().send().await {
                Ok(response) => {
                    // Check for rate limiting
                    if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(RegistryError::rate_limited(registry));

                        if attempt < self.max_retries {
                            tokio::time::sleep(Duration::from_millis(delay)).await;
                            delay *= 2;
                            continue;
                        } else {
                            break;
                        }
                    }

                    // Check for 404 Not Found
                    if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(RegistryError::not_found(coordinate, registry));
                    }

                    // Check for other errors
                    if !response.status().is_success() {
                        return Err(RegistryError::network(
                            coordinate,
                            registry,
                            format!("HTTP {}", response.status()),
                        ));
                    }

                    return Ok(response);
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(RegistryError::timeout(coordinate, registry));
                    } else {
                        last_error =
                            Some(RegistryError::network(coordinate, registry, e.to_string()));
                    }

                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        delay *= 2;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            RegistryError::network(coordinate, registry, "unknown error")
        }))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new().expect("failed to create default HTTP client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_client_with_config() {
        let client = HttpClient::with_config(Duration::from_secs(60), "test-agent/1.0");
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_client_with_max_retries() {
        let client = HttpClient::new().unwrap().with_max_retries(5);
        assert_eq!(client.max_retries, 5);
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(30));
        assert!(DEFAULT_USER_AGENT.starts_with("depscope/"));
        assert_eq!(MAX_RETRIES, 3);
        assert_eq!(BASE_DELAY_MS, 100);
    }

    #[tokio::test]
    async fn test_get_maps_404_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = HttpClient::new().unwrap().with_max_retries(0);
        let url = format!("{}/missing", server.url());
        let result = client.get(&url, "junit:junit", "test registry").await;

        assert!(matches!(result, Err(RegistryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_maps_429_to_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/busy")
            .with_status(429)
            .expect_at_least(1)
            .create_async()
            .await;

        let client = HttpClient::new().unwrap().with_max_retries(0);
        let url = format!("{}/busy", server.url());
        let result = client.get(&url, "junit:junit", "test registry").await;

        assert!(matches!(result, Err(RegistryError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn test_get_json_parses_body() {
        #[derive(serde::Deserialize)]
        struct Body {
            value: u32,
        }

        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/ok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"value": 7}"#)
            .create_async()
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/ok", server.url());
        let body: Body = client.get_json(&url, "a:b", "test registry").await.unwrap();
        assert_eq!(body.value, 7);
    }
}
