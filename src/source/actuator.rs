//! HTTP backend using the Spring Boot actuator endpoints.
//!
//! ## Endpoints
//!
//! - **health**: `GET /actuator/health`
//! - **cpu**: `GET /actuator/metrics/system.cpu.count`
//! - **uptime**: `GET /actuator/metrics/process.uptime`
//! - **httptrace**: `GET /actuator/httptrace`
//!
//! Every path can be overridden through the builder (or the config file).
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use actuator_dash::ActuatorClient;
//!
//! let client = ActuatorClient::builder()
//!     .endpoint("http://localhost:8080")
//!     .traces_path("/actuator/httpexchanges")
//!     .timeout(Duration::from_secs(5))
//!     .build()
//!     .unwrap();
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{MetricsBackend, Resource};
use crate::config::EndpointPaths;
use crate::error::FetchError;

/// Actuator HTTP backend.
#[derive(Debug, Clone)]
pub struct ActuatorClient {
    client: Client,
    endpoint: String,
    paths: EndpointPaths,
    description: String,
}

impl ActuatorClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> ActuatorClientBuilder {
        ActuatorClientBuilder::default()
    }

    /// Full URL of a resource.
    pub fn url(&self, resource: Resource) -> String {
        let path = match resource {
            Resource::Health => &self.paths.health,
            Resource::Cpu => &self.paths.cpu,
            Resource::Uptime => &self.paths.uptime,
            Resource::Traces => &self.paths.traces,
        };
        join_url(&self.endpoint, path)
    }
}

#[async_trait]
impl MetricsBackend for ActuatorClient {
    async fn fetch(&self, resource: Resource) -> Result<serde_json::Value, FetchError> {
        let url = self.url(resource);
        tracing::debug!(%url, "GET {}", resource);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Http(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for ActuatorClient.
#[derive(Debug, Default)]
pub struct ActuatorClientBuilder {
    endpoint: Option<String>,
    paths: EndpointPaths,
    timeout: Option<Duration>,
}

impl ActuatorClientBuilder {
    /// Set the backend base URL (e.g., "http://localhost:8080").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Replace all resource paths at once.
    pub fn paths(mut self, paths: EndpointPaths) -> Self {
        self.paths = paths;
        self
    }

    /// Set the http-trace path (newer backends expose `/actuator/httpexchanges`).
    pub fn traces_path(mut self, path: impl Into<String>) -> Self {
        self.paths.traces = path.into();
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ActuatorClient, FetchError> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Http(format!("failed to build HTTP client: {}", e)))?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| "http://localhost:8080".to_string());
        let description = format!("actuator: {}", endpoint);

        Ok(ActuatorClient {
            client,
            endpoint,
            paths: self.paths,
            description,
        })
    }
}

// Join base URL and path with exactly one slash between them
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
