//! In-memory backend for unit tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::FetchError;
use crate::source::{MetricsBackend, Resource};

/// Status codes of the canned trace list.
pub const TRACE_STATUSES: [i64; 10] = [200, 200, 404, 500, 200, 400, 200, 999, 200, 404];

/// Backend answering from a fixed table.
#[derive(Debug, Clone)]
pub struct StubBackend {
    responses: HashMap<Resource, Result<Value, FetchError>>,
}

impl StubBackend {
    /// All four resources answer successfully.
    pub fn healthy() -> Self {
        let traces: Vec<Value> = TRACE_STATUSES
            .iter()
            .enumerate()
            .map(|(i, status)| {
                json!({
                    "timestamp": format!("2024-01-01T10:00:{:02}Z", i),
                    "principal": null,
                    "request": { "method": "GET", "uri": format!("http://localhost:8080/api/{}", i) },
                    "response": { "status": status },
                    "timeTaken": 3 + i as u64
                })
            })
            .collect();

        let mut responses = HashMap::new();
        responses.insert(
            Resource::Health,
            Ok(json!({
                "status": "UP",
                "components": {
                    "diskSpace": { "status": "UP", "details": { "total": 10_737_418_240u64, "free": 1_048_576 } },
                    "ping": { "status": "UP" }
                }
            })),
        );
        responses.insert(
            Resource::Cpu,
            Ok(json!({
                "name": "system.cpu.count",
                "description": "The number of processors available to the Java virtual machine",
                "baseUnit": null,
                "measurements": [{ "statistic": "VALUE", "value": 8.0 }],
                "availableTags": []
            })),
        );
        responses.insert(
            Resource::Uptime,
            Ok(json!({
                "name": "process.uptime",
                "baseUnit": "seconds",
                "measurements": [{ "statistic": "VALUE", "value": 3660.6 }],
                "availableTags": []
            })),
        );
        responses.insert(Resource::Traces, Ok(json!({ "traces": traces })));
        Self { responses }
    }

    /// Answer `resource` with `value`.
    pub fn with(mut self, resource: Resource, value: Value) -> Self {
        self.responses.insert(resource, Ok(value));
        self
    }

    /// Fail every request for `resource`.
    pub fn failing(mut self, resource: Resource, error: FetchError) -> Self {
        self.responses.insert(resource, Err(error));
        self
    }
}

#[async_trait]
impl MetricsBackend for StubBackend {
    async fn fetch(&self, resource: Resource) -> Result<Value, FetchError> {
        self.responses
            .get(&resource)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Http(format!("no stub for {}", resource))))
    }

    fn description(&self) -> &str {
        "stub"
    }
}
