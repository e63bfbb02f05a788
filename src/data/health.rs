//! System health and metric snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::format::{format_bytes, FormatError};

/// Component whose `free` detail is humanized on receipt.
pub const DISK_SPACE_COMPONENT: &str = "diskSpace";

/// Most recent health report from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemHealth {
    #[serde(default = "unknown_status")]
    pub status: String,
    #[serde(default)]
    pub components: BTreeMap<String, HealthComponent>,
}

/// Health of one backend component (disk space, database, ping...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthComponent {
    #[serde(default = "unknown_status")]
    pub status: String,
    #[serde(default)]
    pub details: Map<String, Value>,
    /// Anything else the backend reports (nested components etc.).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn unknown_status() -> String {
    "UNKNOWN".to_string()
}

impl SystemHealth {
    /// Decode a raw health response and humanize the disk-space `free` byte
    /// count.
    ///
    /// A `free` value that is already a string is left alone, so the
    /// formatting happens at most once per snapshot.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let mut health: SystemHealth = serde_json::from_value(value)?;
        if let Err(e) = health.format_disk_free() {
            tracing::warn!("disk space not formatted: {}", e);
        }
        Ok(health)
    }

    fn format_disk_free(&mut self) -> Result<(), FormatError> {
        let Some(free) = self
            .components
            .get_mut(DISK_SPACE_COMPONENT)
            .and_then(|c| c.details.get_mut("free"))
        else {
            return Ok(());
        };
        if let Some(bytes) = free.as_f64() {
            *free = Value::String(format_bytes(bytes)?);
        }
        Ok(())
    }

    /// Formatted free disk space, if the backend reported it.
    pub fn disk_free(&self) -> Option<&str> {
        self.components
            .get(DISK_SPACE_COMPONENT)?
            .details
            .get("free")?
            .as_str()
    }

    pub fn is_up(&self) -> bool {
        self.status == "UP"
    }
}

/// A single actuator metric (`/actuator/metrics/<name>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub base_unit: Option<String>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
    #[serde(default)]
    pub available_tags: Vec<Value>,
}

/// One statistic of a metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(default)]
    pub statistic: String,
    pub value: f64,
}

impl MetricResponse {
    /// Value of the first measurement.
    pub fn first_value(&self) -> Option<f64> {
        self.measurements.first().map(|m| m.value)
    }

    /// Uptime in whole seconds: the first measurement rounded to the nearest
    /// integer. `None` when missing, negative or not finite.
    pub fn uptime_seconds(&self) -> Option<u64> {
        let value = self.first_value()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        Some(value.round() as u64)
    }
}
