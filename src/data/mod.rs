//! Data models and processing for actuator responses.
//!
//! This module turns raw backend JSON into the structured state the views
//! display.
//!
//! ## Submodules
//!
//! - [`trace`]: Opaque trace records and status-code bucketing ([`TraceSet`])
//! - [`health`]: Health and metric snapshots ([`SystemHealth`], [`MetricResponse`])
//! - [`uptime`]: The ticking uptime counter ([`UptimeClock`])
//! - [`format`]: Byte size, uptime and date formatting
//! - [`chart`]: Inputs for the bar and share charts
//! - [`dashboard`]: The state struct holding all of the above ([`Dashboard`])
//!
//! ## Data Flow
//!
//! ```text
//! health JSON ──▶ SystemHealth::from_value() (disk free humanized)
//! cpu JSON    ──▶ MetricResponse
//! uptime JSON ──▶ MetricResponse::uptime_seconds() ──▶ UptimeClock
//! trace JSON  ──▶ TraceResponse ──▶ TraceSet::new() (five buckets)
//!                                        │
//!                                        └──▶ ChartData
//! ```

pub mod chart;
pub mod dashboard;
pub mod format;
pub mod health;
pub mod trace;
pub mod uptime;

pub use chart::{ChartData, Share};
pub use dashboard::Dashboard;
pub use format::{format_bytes, format_date, format_uptime, FormatError};
pub use health::{HealthComponent, Measurement, MetricResponse, SystemHealth};
pub use trace::{StatusBucket, TraceRecord, TraceResponse, TraceSet};
pub use uptime::UptimeClock;
