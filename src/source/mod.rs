//! Backend abstraction for fetching dashboard resources.
//!
//! This module provides a trait-based abstraction over where the four
//! resources (health, cpu, uptime, http traces) come from, plus the
//! [`Fetcher`] that issues the requests concurrently and reports each outcome
//! as an [`Update`].

mod actuator;
mod fetcher;
mod fixture;

pub use actuator::{ActuatorClient, ActuatorClientBuilder};
pub use fetcher::{fetch_resource, Fetcher, Update};
pub use fixture::FixtureBackend;

use std::fmt::{self, Debug};

use async_trait::async_trait;

use crate::error::FetchError;

/// One of the four read-only backend resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Health,
    Cpu,
    Uptime,
    Traces,
}

impl Resource {
    /// All resources, in the order they are requested.
    pub const ALL: [Resource; 4] = [
        Resource::Traces,
        Resource::Cpu,
        Resource::Health,
        Resource::Uptime,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Health => "health",
            Resource::Cpu => "cpu",
            Resource::Uptime => "uptime",
            Resource::Traces => "httptrace",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for fetching raw resource JSON from a backend.
///
/// Implementations only transport bytes; decoding into the dashboard model
/// happens in [`fetch_resource`].
///
/// # Example
///
/// ```no_run
/// use actuator_dash::{ActuatorClient, MetricsBackend, Resource};
///
/// # tokio_test::block_on(async {
/// let client = ActuatorClient::builder().endpoint("http://localhost:8080").build()?;
/// let health = client.fetch(Resource::Health).await?;
/// println!("{}", health["status"]);
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// # });
/// ```
#[async_trait]
pub trait MetricsBackend: Send + Sync + Debug {
    /// Fetch one resource as JSON.
    async fn fetch(&self, resource: Resource) -> Result<serde_json::Value, FetchError>;

    /// Returns a human-readable description of the backend.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}
