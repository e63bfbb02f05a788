//! Dashboard configuration.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `ACTUATOR_DASH_*` environment variables (nested keys use `__`, e.g.
//! `ACTUATOR_DASH_ENDPOINTS__TRACES=/actuator/httpexchanges`). Command-line
//! flags are applied on top by the binary.
//!
//! ```toml
//! base_url = "http://localhost:8080"
//! request_timeout_secs = 10
//! refresh_interval_secs = 0
//! page_size = 10
//!
//! [endpoints]
//! health = "/actuator/health"
//! cpu = "/actuator/metrics/system.cpu.count"
//! uptime = "/actuator/metrics/process.uptime"
//! traces = "/actuator/httptrace"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

/// Config file read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "actuator-dash.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "ACTUATOR_DASH";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Backend base URL.
    pub base_url: String,
    pub endpoints: EndpointPaths,
    /// Per-request timeout.
    pub request_timeout_secs: u64,
    /// Automatic refresh period; 0 means manual refresh only.
    pub refresh_interval_secs: u64,
    /// Rows per page in the trace table.
    pub page_size: usize,
    /// Where to write logs while the TUI owns the terminal.
    pub log_file: Option<PathBuf>,
}

/// Path of each resource relative to `base_url`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EndpointPaths {
    pub health: String,
    pub cpu: String,
    pub uptime: String,
    pub traces: String,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            endpoints: EndpointPaths::default(),
            request_timeout_secs: 10,
            refresh_interval_secs: 0,
            page_size: 10,
            log_file: None,
        }
    }
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            health: "/actuator/health".to_string(),
            cpu: "/actuator/metrics/system.cpu.count".to_string(),
            uptime: "/actuator/metrics/process.uptime".to_string(),
            traces: "/actuator/httptrace".to_string(),
        }
    }
}

impl DashConfig {
    /// Load from `path` (required to exist) or from [`DEFAULT_CONFIG_FILE`]
    /// if present, then apply environment overrides, and validate.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = Self::load_layers(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`DashConfig::load`] but without validation, so that callers can
    /// apply further overrides first.
    pub fn load_layers(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(p) => File::from(p),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        let config: DashConfig = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Parse and validate config from a TOML string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: DashConfig = Config::builder()
            .add_source(File::from_str(s, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_backend()?;
        self.validate_display()
    }

    /// Checks for the settings only the HTTP backend uses.
    pub fn validate_backend(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.base_url.starts_with("http://") || self.base_url.starts_with("https://"),
            "base_url must be an http(s) URL, got {:?}",
            self.base_url
        );
        anyhow::ensure!(
            self.request_timeout_secs > 0,
            "request_timeout_secs must be > 0, got {}",
            self.request_timeout_secs
        );
        for (name, path) in [
            ("health", &self.endpoints.health),
            ("cpu", &self.endpoints.cpu),
            ("uptime", &self.endpoints.uptime),
            ("traces", &self.endpoints.traces),
        ] {
            anyhow::ensure!(!path.is_empty(), "endpoints.{} must be non-empty", name);
        }
        Ok(())
    }

    /// Checks for the settings every mode uses.
    pub fn validate_display(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.page_size > 0,
            "page_size must be > 0, got {}",
            self.page_size
        );
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Auto-refresh period, if enabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }
}
