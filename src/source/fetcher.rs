//! Concurrent fetching of the four dashboard resources.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::{MetricsBackend, Resource};
use crate::data::{MetricResponse, SystemHealth, TraceRecord, TraceResponse};
use crate::error::{FetchError, FetchFailure};

/// A message for the presenter: a fetch outcome or an uptime tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Health(Result<SystemHealth, FetchFailure>),
    Cpu(Result<MetricResponse, FetchFailure>),
    /// Uptime baseline in whole seconds.
    Uptime(Result<u64, FetchFailure>),
    Traces(Result<Vec<TraceRecord>, FetchFailure>),
    /// One second of uptime has elapsed.
    Tick,
}

impl Update {
    /// The failure carried by this update, if any.
    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Update::Health(Err(e))
            | Update::Cpu(Err(e))
            | Update::Uptime(Err(e))
            | Update::Traces(Err(e)) => Some(e),
            _ => None,
        }
    }
}

/// Fetch one resource and decode it into its dashboard model.
pub async fn fetch_resource(backend: &dyn MetricsBackend, resource: Resource) -> Update {
    let raw = backend.fetch(resource).await;
    let fail = |source: FetchError| FetchFailure::new(resource, source);

    match resource {
        Resource::Health => Update::Health(
            raw.and_then(|v| SystemHealth::from_value(v).map_err(FetchError::from))
                .map_err(fail),
        ),
        Resource::Cpu => Update::Cpu(
            raw.and_then(|v| serde_json::from_value::<MetricResponse>(v).map_err(FetchError::from))
                .map_err(fail),
        ),
        Resource::Uptime => Update::Uptime(
            raw.and_then(|v| {
                let metric: MetricResponse = serde_json::from_value(v)?;
                metric.uptime_seconds().ok_or_else(|| {
                    FetchError::Parse("missing or invalid uptime measurement".to_string())
                })
            })
            .map_err(fail),
        ),
        Resource::Traces => Update::Traces(
            raw.and_then(|v| {
                let response: TraceResponse = serde_json::from_value(v)?;
                Ok(response.traces)
            })
            .map_err(fail),
        ),
    }
}

/// Issues resource fetches as independent tasks and reports each outcome on
/// an update channel.
#[derive(Debug, Clone)]
pub struct Fetcher {
    backend: Arc<dyn MetricsBackend>,
    tx: mpsc::UnboundedSender<Update>,
    runtime: Handle,
}

impl Fetcher {
    pub fn new(
        backend: Arc<dyn MetricsBackend>,
        tx: mpsc::UnboundedSender<Update>,
        runtime: Handle,
    ) -> Self {
        Self {
            backend,
            tx,
            runtime,
        }
    }

    pub fn description(&self) -> &str {
        self.backend.description()
    }

    /// Fetch all four resources concurrently. Returns immediately; one
    /// update per resource arrives on the channel, in completion order.
    pub fn fetch_all(&self) {
        tracing::info!("fetching all resources from {}", self.description());
        for resource in Resource::ALL {
            self.spawn_fetch(resource);
        }
    }

    /// Fetch a single resource in the background.
    pub fn spawn_fetch(&self, resource: Resource) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let update = fetch_resource(backend.as_ref(), resource).await;
            if let Some(failure) = update.failure() {
                tracing::warn!("fetch failed: {}", failure);
            } else {
                tracing::debug!("fetched {}", resource);
            }
            // Receiver gone means the presenter was torn down
            let _ = tx.send(update);
        });
    }
}
