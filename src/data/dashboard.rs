//! Dashboard state: one region per backend resource.

use chrono::NaiveDate;
use serde_json::json;

use super::chart::ChartData;
use super::health::{MetricResponse, SystemHealth};
use super::trace::{StatusBucket, TraceRecord, TraceSet};
use super::uptime::UptimeClock;

/// Everything the dashboard displays.
///
/// Each region is replaced wholesale by its own fetch and is never touched by
/// the others. `None` means the region has not loaded yet.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    health: Option<SystemHealth>,
    cpu: Option<MetricResponse>,
    uptime: Option<UptimeClock>,
    traces: TraceSet,
    traces_as_of: Option<NaiveDate>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn health(&self) -> Option<&SystemHealth> {
        self.health.as_ref()
    }

    pub fn cpu(&self) -> Option<&MetricResponse> {
        self.cpu.as_ref()
    }

    pub fn uptime(&self) -> Option<&UptimeClock> {
        self.uptime.as_ref()
    }

    pub fn traces(&self) -> &TraceSet {
        &self.traces
    }

    /// Date the current trace list was received.
    pub fn traces_as_of(&self) -> Option<NaiveDate> {
        self.traces_as_of
    }

    pub fn set_health(&mut self, health: SystemHealth) {
        self.health = Some(health);
    }

    pub fn set_cpu(&mut self, cpu: MetricResponse) {
        self.cpu = Some(cpu);
    }

    /// Reset the uptime counter to a fetched baseline.
    pub fn seed_uptime(&mut self, seconds: u64) {
        match self.uptime.as_mut() {
            Some(clock) => clock.seed(seconds),
            None => self.uptime = Some(UptimeClock::new(seconds)),
        }
    }

    /// Advance the uptime counter by one second. No-op before the first seed.
    pub fn tick_uptime(&mut self) {
        if let Some(clock) = self.uptime.as_mut() {
            clock.tick();
        }
    }

    /// Replace the trace list and re-derive its buckets.
    pub fn replace_traces(&mut self, records: Vec<TraceRecord>, as_of: NaiveDate) {
        self.traces = TraceSet::new(records);
        self.traces_as_of = Some(as_of);
    }

    /// Chart inputs, once traces have loaded.
    pub fn chart(&self) -> Option<ChartData> {
        self.traces_as_of
            .map(|as_of| ChartData::from_traces(&self.traces, as_of))
    }

    /// JSON summary of every region, used by headless export.
    pub fn summary_json(&self) -> serde_json::Value {
        let buckets: serde_json::Map<String, serde_json::Value> = StatusBucket::ALL
            .iter()
            .map(|b| (b.label().to_string(), json!(self.traces.count(*b))))
            .collect();

        json!({
            "health": self.health,
            "cpu": self.cpu,
            "uptime": self.uptime.as_ref().map(|u| json!({
                "seconds": u.seconds(),
                "display": u.display(),
            })),
            "traces": {
                "total": self.traces.len(),
                "as_of": self.traces_as_of.map(super::format::format_date),
                "buckets": buckets,
                "records": self.traces.records(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    #[test]
    fn test_empty_dashboard() {
        let dashboard = Dashboard::new();
        assert!(dashboard.health().is_none());
        assert!(dashboard.cpu().is_none());
        assert!(dashboard.uptime().is_none());
        assert!(dashboard.traces().is_empty());
        assert!(dashboard.chart().is_none());
    }

    #[test]
    fn test_tick_before_seed_is_ignored() {
        let mut dashboard = Dashboard::new();
        dashboard.tick_uptime();
        assert!(dashboard.uptime().is_none());
    }

    #[test]
    fn test_seed_then_tick() {
        let mut dashboard = Dashboard::new();
        dashboard.seed_uptime(59);
        dashboard.tick_uptime();
        let uptime = dashboard.uptime().unwrap();
        assert_eq!(uptime.seconds(), 60);
        assert_eq!(uptime.display(), "00h 01m 00s ");

        dashboard.seed_uptime(5);
        assert_eq!(dashboard.uptime().unwrap().seconds(), 5);
    }

    #[test]
    fn test_replace_traces_rebuilds_buckets() {
        let mut dashboard = Dashboard::new();
        dashboard.replace_traces(
            vec![
                TraceRecord::new(json!({ "response": { "status": 200 } })),
                TraceRecord::new(json!({ "response": { "status": 200 } })),
            ],
            today(),
        );
        assert_eq!(dashboard.traces().count(StatusBucket::Ok), 2);

        dashboard.replace_traces(
            vec![TraceRecord::new(json!({ "response": { "status": 500 } }))],
            today(),
        );
        assert_eq!(dashboard.traces().count(StatusBucket::Ok), 0);
        assert_eq!(dashboard.traces().count(StatusBucket::ServerError), 1);
        assert_eq!(dashboard.chart().unwrap().total(), 1);
    }

    #[test]
    fn test_summary_json() {
        let mut dashboard = Dashboard::new();
        dashboard.seed_uptime(61);
        dashboard.replace_traces(
            vec![TraceRecord::new(json!({ "response": { "status": 404 } }))],
            today(),
        );
        let summary = dashboard.summary_json();
        assert_eq!(summary["uptime"]["display"], "00h 01m 01s ");
        assert_eq!(summary["traces"]["buckets"]["404"], 1);
        assert_eq!(summary["traces"]["as_of"], "01/02/2024");
        assert!(summary["health"].is_null());
    }
}
