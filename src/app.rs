//! Application state and navigation logic.
//!
//! [`App`] is the dashboard presenter: it owns the [`Dashboard`] state, the
//! [`Fetcher`] and the [`UptimeTicker`], applies every [`Update`] on the
//! thread that renders, and keeps the view/selection state for the UI.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::data::{Dashboard, StatusBucket, TraceRecord};
use crate::error::FetchFailure;
use crate::source::{Fetcher, MetricsBackend, Resource, Update};
use crate::ticker::UptimeTicker;
use crate::ui::Theme;

/// How long a status-bar message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
///
/// Trace detail is shown as an overlay (controlled by
/// `App::show_detail_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Health, CPU, uptime counters and the status-code charts.
    Overview,
    /// Paged table of HTTP traces.
    Traces,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Overview => View::Traces,
            View::Traces => View::Overview,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Traces => "Traces",
        }
    }
}

/// Which traces the table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceFilter {
    #[default]
    All,
    Bucket(StatusBucket),
}

impl TraceFilter {
    /// Filters in tab order.
    pub const ALL: [TraceFilter; 6] = [
        TraceFilter::All,
        TraceFilter::Bucket(StatusBucket::Ok),
        TraceFilter::Bucket(StatusBucket::BadRequest),
        TraceFilter::Bucket(StatusBucket::NotFound),
        TraceFilter::Bucket(StatusBucket::ServerError),
        TraceFilter::Bucket(StatusBucket::Other),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TraceFilter::All => "All",
            TraceFilter::Bucket(b) => b.label(),
        }
    }

    /// Position in [`TraceFilter::ALL`].
    pub fn position(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A fetch failure waiting to be acknowledged by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub resource: Resource,
    pub message: String,
}

impl From<&FetchFailure> for Notification {
    fn from(failure: &FetchFailure) -> Self {
        Self {
            resource: failure.resource,
            message: failure.to_string(),
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Backend and state
    fetcher: Fetcher,
    dashboard: Dashboard,
    updates_tx: mpsc::UnboundedSender<Update>,
    updates_rx: mpsc::UnboundedReceiver<Update>,
    runtime: Handle,
    ticker: UptimeTicker,
    arm_ticker: bool,
    in_flight: usize,
    pub last_refresh: Option<Instant>,

    // Failures not yet dismissed, oldest first
    pub notifications: VecDeque<Notification>,

    // Trace table
    pub trace_filter: TraceFilter,
    pub selected_index: usize,
    pub page_size: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App fetching from `backend`, spawning its background
    /// tasks on `runtime`.
    pub fn new(backend: Arc<dyn MetricsBackend>, runtime: Handle, page_size: usize) -> Self {
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        let fetcher = Fetcher::new(backend, updates_tx.clone(), runtime.clone());
        Self {
            running: true,
            current_view: View::Overview,
            show_help: false,
            show_detail_overlay: false,
            fetcher,
            dashboard: Dashboard::new(),
            updates_tx,
            updates_rx,
            runtime,
            ticker: UptimeTicker::new(),
            arm_ticker: false,
            in_flight: 0,
            last_refresh: None,
            notifications: VecDeque::new(),
            trace_filter: TraceFilter::All,
            selected_index: 0,
            page_size: page_size.max(1),
            theme: Theme::dark(),
            status_message: None,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Returns a description of the current backend.
    pub fn source_description(&self) -> &str {
        self.fetcher.description()
    }

    /// Number of fetches that have not reported back yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn ticker_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// First load: cancel any running ticker, fetch everything, and arm the
    /// ticker on the next successful uptime fetch.
    pub fn initialize(&mut self) {
        self.ticker.stop();
        self.arm_ticker = true;
        self.fetch_all();
    }

    /// Manual refresh: fetch everything again. Never starts a second ticker.
    pub fn refresh(&mut self) {
        self.fetch_all();
        self.set_status_message("Refreshing...".to_string());
    }

    fn fetch_all(&mut self) {
        self.in_flight += Resource::ALL.len();
        self.last_refresh = Some(Instant::now());
        self.fetcher.fetch_all();
    }

    /// Stop background work. Called on exit; also happens on drop.
    pub fn teardown(&mut self) {
        self.ticker.stop();
    }

    /// Apply every update that has arrived, without blocking.
    ///
    /// Returns how many were applied.
    pub fn drain_updates(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(update) = self.updates_rx.try_recv() {
            self.apply(update);
            applied += 1;
        }
        applied
    }

    /// Fetch everything once and wait until all four results are applied.
    /// Used by headless export; does not arm the ticker.
    pub async fn load_once(&mut self) -> Result<()> {
        self.fetch_all();
        while self.in_flight > 0 {
            let Some(update) = self.updates_rx.recv().await else {
                anyhow::bail!("update channel closed");
            };
            self.apply(update);
        }
        Ok(())
    }

    /// Apply one update to its own state region.
    pub fn apply(&mut self, update: Update) {
        if !matches!(update, Update::Tick) {
            self.in_flight = self.in_flight.saturating_sub(1);
        }

        match update {
            Update::Health(Ok(health)) => self.dashboard.set_health(health),
            Update::Cpu(Ok(cpu)) => self.dashboard.set_cpu(cpu),
            Update::Uptime(Ok(seconds)) => {
                self.dashboard.seed_uptime(seconds);
                if self.arm_ticker {
                    self.ticker.start(&self.runtime, self.updates_tx.clone());
                    self.arm_ticker = false;
                }
            }
            Update::Traces(Ok(records)) => {
                self.dashboard
                    .replace_traces(records, chrono::Local::now().date_naive());
                // Selection pointed into the old list
                self.selected_index = 0;
                self.show_detail_overlay = false;
            }
            Update::Tick => self.dashboard.tick_uptime(),
            Update::Health(Err(failure))
            | Update::Cpu(Err(failure))
            | Update::Uptime(Err(failure))
            | Update::Traces(Err(failure)) => self.notify(&failure),
        }
    }

    fn notify(&mut self, failure: &FetchFailure) {
        self.notifications.push_back(Notification::from(failure));
    }

    /// The notification currently shown, if any.
    pub fn current_notification(&self) -> Option<&Notification> {
        self.notifications.front()
    }

    pub fn dismiss_notification(&mut self) {
        self.notifications.pop_front();
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    pub fn set_filter(&mut self, filter: TraceFilter) {
        self.trace_filter = filter;
        self.selected_index = 0;
    }

    pub fn next_filter(&mut self) {
        self.set_filter(self.trace_filter.next());
    }

    pub fn prev_filter(&mut self) {
        self.set_filter(self.trace_filter.prev());
    }

    /// Indices (into the current trace list) of the rows the table shows.
    pub fn visible_trace_indices(&self) -> Vec<usize> {
        let traces = self.dashboard.traces();
        match self.trace_filter {
            TraceFilter::All => (0..traces.len()).collect(),
            TraceFilter::Bucket(bucket) => traces.bucket_indices(bucket).to_vec(),
        }
    }

    fn visible_count(&self) -> usize {
        match self.trace_filter {
            TraceFilter::All => self.dashboard.traces().len(),
            TraceFilter::Bucket(bucket) => self.dashboard.traces().count(bucket),
        }
    }

    /// The trace under the cursor.
    pub fn selected_trace(&self) -> Option<&TraceRecord> {
        let idx = *self.visible_trace_indices().get(self.selected_index)?;
        self.dashboard.traces().get(idx)
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.visible_count().saturating_sub(1);
        self.selected_index = (self.selected_index + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        self.selected_index = self.visible_count().saturating_sub(1);
    }

    pub fn next_page(&mut self) {
        self.select_next_n(self.page_size);
    }

    pub fn prev_page(&mut self) {
        self.select_prev_n(self.page_size);
    }

    /// Zero-based page holding the selection, and the page count (at least 1).
    pub fn page(&self) -> (usize, usize) {
        let pages = self.visible_count().div_ceil(self.page_size).max(1);
        (self.selected_index / self.page_size, pages)
    }

    /// Open the detail overlay for the selected trace.
    pub fn enter_detail(&mut self) {
        if self.current_view == View::Traces && self.selected_trace().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlay first, then return to Overview.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
        } else {
            self.current_view = View::Overview;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Write the rows of the current trace view to a JSON file.
    ///
    /// Returns the number of rows written.
    pub fn export_traces(&self, path: &Path) -> Result<usize> {
        let traces = self.dashboard.traces();
        if self.dashboard.traces_as_of().is_none() {
            anyhow::bail!("No traces to export");
        }

        let rows: Vec<serde_json::Value> = self
            .visible_trace_indices()
            .into_iter()
            .filter_map(|idx| traces.get(idx))
            .map(|t| {
                serde_json::json!({
                    "timestamp": t.timestamp(),
                    "method": t.method(),
                    "status": t.status(),
                    "uri": t.uri(),
                    "time_taken_ms": t.time_taken_ms(),
                })
            })
            .collect();

        let export = serde_json::json!({
            "filter": self.trace_filter.label(),
            "as_of": self.dashboard.traces_as_of().map(crate::data::format_date),
            "rows": rows,
        });
        std::fs::write(path, serde_json::to_string_pretty(&export)?)?;
        Ok(rows.len())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::format_uptime;
    use crate::error::FetchError;
    use crate::testing::StubBackend;

    fn app_with(backend: StubBackend) -> App {
        App::new(Arc::new(backend), Handle::current(), 3)
    }

    /// Let background fetches finish and apply their results.
    async fn settle(app: &mut App) {
        for _ in 0..100 {
            app.drain_updates();
            if app.in_flight() == 0 {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("fetches did not complete");
    }

    async fn advance_secs(app: &mut App, secs: u64) {
        for _ in 0..secs {
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }
        app.drain_updates();
    }

    #[tokio::test]
    async fn test_initialize_loads_every_region() {
        let mut app = app_with(StubBackend::healthy());
        app.initialize();
        assert_eq!(app.in_flight(), 4);
        settle(&mut app).await;

        let dashboard = app.dashboard();
        assert_eq!(dashboard.health().unwrap().disk_free(), Some("1 MB"));
        assert_eq!(dashboard.cpu().unwrap().first_value(), Some(8.0));
        assert_eq!(dashboard.uptime().unwrap().display(), "01h 01m 01s ");
        assert_eq!(dashboard.traces().len(), 10);
        assert_eq!(dashboard.traces().count(StatusBucket::Ok), 5);
        assert!(app.notifications.is_empty());
        assert!(app.ticker_running());
    }

    #[tokio::test]
    async fn test_one_failure_one_notification_others_unaffected() {
        let mut app = app_with(
            StubBackend::healthy()
                .failing(Resource::Health, FetchError::Http("503 Service Unavailable".into())),
        );
        app.initialize();
        settle(&mut app).await;

        assert!(app.dashboard().health().is_none());
        assert!(app.dashboard().cpu().is_some());
        assert!(app.dashboard().uptime().is_some());
        assert_eq!(app.dashboard().traces().len(), 10);

        assert_eq!(app.notifications.len(), 1);
        let note = app.current_notification().unwrap();
        assert_eq!(note.resource, Resource::Health);
        assert!(note.message.contains("503 Service Unavailable"));

        app.dismiss_notification();
        assert!(app.current_notification().is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_last_known_state() {
        let mut app = app_with(StubBackend::healthy());
        app.initialize();
        settle(&mut app).await;
        let before = app.dashboard().health().cloned();

        app.apply(Update::Health(Err(FetchFailure::new(
            Resource::Health,
            FetchError::Timeout,
        ))));
        assert_eq!(app.dashboard().health().cloned(), before);
        assert_eq!(app.dashboard().traces().len(), 10);
        assert_eq!(app.notifications.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_rebuilds_buckets_without_duplicates() {
        let mut app = app_with(StubBackend::healthy());
        app.initialize();
        settle(&mut app).await;
        app.refresh();
        settle(&mut app).await;
        app.refresh();
        settle(&mut app).await;

        let traces = app.dashboard().traces();
        assert_eq!(traces.count(StatusBucket::Ok), 5);
        assert_eq!(traces.count(StatusBucket::NotFound), 2);
        assert_eq!(traces.count(StatusBucket::Other), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_advances_uptime() {
        let mut app = app_with(StubBackend::healthy());
        app.initialize();
        settle(&mut app).await;
        assert_eq!(app.dashboard().uptime().unwrap().seconds(), 3661);

        advance_secs(&mut app, 5).await;
        let uptime = app.dashboard().uptime().unwrap();
        assert_eq!(uptime.seconds(), 3666);
        assert_eq!(uptime.display(), format_uptime(3666));
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_does_not_speed_up_ticker() {
        let mut app = app_with(StubBackend::healthy());
        app.initialize();
        settle(&mut app).await;

        for _ in 0..3 {
            app.refresh();
            settle(&mut app).await;
        }
        assert!(app.ticker_running());

        // Re-seeded to 3661 by the refreshes; one tick per second from here
        advance_secs(&mut app, 4).await;
        assert_eq!(app.dashboard().uptime().unwrap().seconds(), 3665);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reinitialize_keeps_single_ticker() {
        let mut app = app_with(StubBackend::healthy());
        app.initialize();
        settle(&mut app).await;
        app.initialize();
        settle(&mut app).await;

        advance_secs(&mut app, 3).await;
        assert_eq!(app.dashboard().uptime().unwrap().seconds(), 3664);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_uptime_leaves_ticker_idle_until_first_success() {
        let mut app = app_with(
            StubBackend::healthy().failing(Resource::Uptime, FetchError::Timeout),
        );
        app.initialize();
        settle(&mut app).await;
        assert!(!app.ticker_running());
        assert!(app.dashboard().uptime().is_none());

        advance_secs(&mut app, 2).await;
        assert!(app.dashboard().uptime().is_none());

        // A later successful seed arms it
        app.apply(Update::Uptime(Ok(100)));
        assert!(app.ticker_running());
        advance_secs(&mut app, 2).await;
        assert_eq!(app.dashboard().uptime().unwrap().seconds(), 102);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_stops_ticker() {
        let mut app = app_with(StubBackend::healthy());
        app.initialize();
        settle(&mut app).await;
        app.teardown();
        assert!(!app.ticker_running());

        advance_secs(&mut app, 3).await;
        assert_eq!(app.dashboard().uptime().unwrap().seconds(), 3661);
    }

    #[tokio::test]
    async fn test_load_once_does_not_arm_ticker() {
        let mut app = app_with(StubBackend::healthy());
        app.load_once().await.unwrap();
        assert_eq!(app.in_flight(), 0);
        assert!(app.dashboard().health().is_some());
        assert!(!app.ticker_running());
    }

    #[tokio::test]
    async fn test_filter_selection_and_paging() {
        let mut app = app_with(StubBackend::healthy());
        app.load_once().await.unwrap();
        app.set_view(View::Traces);

        assert_eq!(app.page(), (0, 4)); // 10 rows, 3 per page
        app.select_last();
        assert_eq!(app.selected_index, 9);
        assert_eq!(app.page(), (3, 4));
        app.prev_page();
        assert_eq!(app.selected_index, 6);

        app.set_filter(TraceFilter::Bucket(StatusBucket::NotFound));
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.visible_trace_indices(), vec![2, 9]);
        app.select_next_n(10);
        assert_eq!(app.selected_index, 1);
        assert_eq!(app.selected_trace().unwrap().uri(), Some("http://localhost:8080/api/9"));

        app.enter_detail();
        assert!(app.show_detail_overlay);
        app.go_back();
        assert!(!app.show_detail_overlay);
        assert_eq!(app.current_view, View::Traces);
        app.go_back();
        assert_eq!(app.current_view, View::Overview);
    }

    #[tokio::test]
    async fn test_new_trace_list_clears_selection() {
        let mut app = app_with(StubBackend::healthy());
        app.load_once().await.unwrap();
        app.set_view(View::Traces);
        app.select_last();
        app.enter_detail();

        app.apply(Update::Traces(Ok(Vec::new())));
        assert_eq!(app.selected_index, 0);
        assert!(!app.show_detail_overlay);
        assert!(app.selected_trace().is_none());
    }

    #[test]
    fn test_filter_cycle() {
        assert_eq!(TraceFilter::All.next(), TraceFilter::Bucket(StatusBucket::Ok));
        assert_eq!(TraceFilter::All.prev(), TraceFilter::Bucket(StatusBucket::Other));
        assert_eq!(TraceFilter::Bucket(StatusBucket::Other).next(), TraceFilter::All);
        assert_eq!(TraceFilter::Bucket(StatusBucket::NotFound).label(), "404");
    }

    #[tokio::test]
    async fn test_export_traces() {
        let mut app = app_with(StubBackend::healthy());
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("httptrace.json");

        assert!(app.export_traces(&path).is_err());

        app.load_once().await.unwrap();
        app.set_filter(TraceFilter::Bucket(StatusBucket::Ok));
        assert_eq!(app.export_traces(&path).unwrap(), 5);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["filter"], "200");
        assert_eq!(written["rows"].as_array().unwrap().len(), 5);
        assert_eq!(written["rows"][0]["method"], "GET");
    }
}
