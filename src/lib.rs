//! # actuator-dash
//!
//! A terminal dashboard for Spring Boot Actuator style backends.
//!
//! The dashboard fetches four resources from the backend (system health, CPU
//! count, process uptime and recent HTTP traces), classifies the traces by
//! response status, and keeps a live uptime counter ticking once per second
//! between fetches.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (models) │    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │ Update channel                                      │
//! │       ▼                                                     │
//! │  ┌─────────┐  ┌────────┐                                    │
//! │  │ source  │  │ ticker │◀── one tick per second             │
//! │  │(fetcher)│  └────────┘                                    │
//! │  └─────────┘◀── ActuatorClient | FixtureBackend             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: The presenter. Owns the dashboard state and applies every
//!   fetch result and tick on the UI thread
//! - **[`source`]**: The [`MetricsBackend`] trait, the HTTP and fixture
//!   backends, and the [`Fetcher`] that runs requests concurrently
//! - **[`data`]**: Health, metric and trace models, status classification,
//!   chart inputs and the byte/uptime/date formatters
//! - **[`ticker`]**: The cancellable one-second uptime timer
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered settings (defaults, TOML file, environment)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a backend
//! actuator-dash --url http://localhost:8080
//!
//! # Replay recorded responses
//! actuator-dash --fixtures ./fixtures
//!
//! # Fetch once and write a JSON summary
//! actuator-dash --url http://localhost:8080 --export summary.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use std::sync::Arc;
//! use actuator_dash::{App, FixtureBackend};
//!
//! # tokio_test::block_on(async {
//! let backend = Arc::new(FixtureBackend::new("fixtures"));
//! let mut app = App::new(backend, tokio::runtime::Handle::current(), 10);
//! app.initialize();
//! # });
//! ```
//!
//! ### Fetching a single resource
//!
//! ```no_run
//! use actuator_dash::{fetch_resource, ActuatorClient, Resource, Update};
//!
//! # tokio_test::block_on(async {
//! let client = ActuatorClient::builder()
//!     .endpoint("http://localhost:8080")
//!     .build()
//!     .unwrap();
//! if let Update::Uptime(Ok(seconds)) = fetch_resource(&client, Resource::Uptime).await {
//!     println!("up {}", actuator_dash::data::format_uptime(seconds));
//! }
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod source;
pub mod ticker;
pub mod ui;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use app::{App, TraceFilter, View};
pub use config::DashConfig;
pub use data::{Dashboard, StatusBucket, SystemHealth, TraceRecord, TraceSet};
pub use error::{FetchError, FetchFailure};
pub use source::{
    fetch_resource, ActuatorClient, Fetcher, FixtureBackend, MetricsBackend, Resource, Update,
};
pub use ticker::UptimeTicker;
