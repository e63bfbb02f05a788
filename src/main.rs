use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;

use actuator_dash::{
    events, ui, ActuatorClient, App, DashConfig, FixtureBackend, MetricsBackend,
};

#[derive(Parser, Debug)]
#[command(name = "actuator-dash")]
#[command(about = "Terminal dashboard for Spring Boot Actuator health, metrics and HTTP traces")]
struct Args {
    /// Config file (TOML). Defaults to ./actuator-dash.toml if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8080
    #[arg(short, long, conflicts_with = "fixtures")]
    url: Option<String>,

    /// Read responses from <dir>/{health,cpu,uptime,httptrace}.json instead of HTTP
    #[arg(short, long)]
    fixtures: Option<PathBuf>,

    /// Auto-refresh interval in seconds (0 disables)
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Trace rows per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Write logs to this file while the dashboard is open
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch everything once, write a JSON summary to this file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

impl Args {
    /// Load config and apply command-line overrides on top, then validate
    /// what the chosen backend uses.
    fn resolve_config(&self) -> Result<DashConfig> {
        let mut config = DashConfig::load_layers(self.config.as_deref())?;
        if let Some(url) = &self.url {
            config.base_url = url.clone();
        }
        if let Some(secs) = self.refresh {
            config.refresh_interval_secs = secs;
        }
        if let Some(secs) = self.timeout {
            config.request_timeout_secs = secs;
        }
        if let Some(n) = self.page_size {
            config.page_size = n;
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.clone());
        }
        // Fixture mode never touches the HTTP settings
        if self.fixtures.is_none() {
            config.validate_backend()?;
        }
        config.validate_display()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.resolve_config()?;

    init_logging(&config, args.export.is_some())?;

    let runtime = Runtime::new()?;
    let backend = build_backend(&args, &config)?;
    tracing::info!("using {}", backend.description());

    // Handle export mode (non-interactive)
    if let Some(export_path) = &args.export {
        return export_to_file(&runtime, backend, &config, export_path);
    }

    run_tui(&runtime, backend, &config)
}

/// Logs go to stderr in export mode. While the TUI owns the terminal they go
/// to `log_file`, or nowhere.
fn init_logging(config: &DashConfig, headless: bool) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    } else if let Some(path) = &config.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

fn build_backend(args: &Args, config: &DashConfig) -> Result<Arc<dyn MetricsBackend>> {
    if let Some(dir) = &args.fixtures {
        return Ok(Arc::new(FixtureBackend::new(dir)));
    }

    let client = ActuatorClient::builder()
        .endpoint(config.base_url.clone())
        .paths(config.endpoints.clone())
        .timeout(config.request_timeout())
        .build()?;
    Ok(Arc::new(client))
}

/// Run the TUI against the given backend
fn run_tui(runtime: &Runtime, backend: Arc<dyn MetricsBackend>, config: &DashConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(backend, runtime.handle().clone(), config.page_size);
    app.theme = ui::Theme::auto_detect();
    app.initialize();

    let result = run_app(&mut terminal, &mut app, config.refresh_interval());
    app.teardown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Option<Duration>,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    while app.running {
        // Fetch results and ticks arrive from the runtime threads
        app.drain_updates();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Auto-refresh, if configured and nothing is still in flight
        if let Some(interval) = refresh_interval {
            if last_refresh.elapsed() >= interval && app.in_flight() == 0 {
                app.refresh();
                last_refresh = Instant::now();
            }
        }
    }

    Ok(())
}

/// Fetch every resource once and write the dashboard summary as JSON.
fn export_to_file(
    runtime: &Runtime,
    backend: Arc<dyn MetricsBackend>,
    config: &DashConfig,
    export_path: &Path,
) -> Result<()> {
    let mut app = App::new(backend, runtime.handle().clone(), config.page_size);
    runtime.block_on(app.load_once())?;

    for note in &app.notifications {
        eprintln!("warning: {}", note.message);
    }

    let json = serde_json::to_string_pretty(&app.dashboard().summary_json())?;
    std::fs::write(export_path, json)
        .with_context(|| format!("writing {}", export_path.display()))?;

    println!("Exported dashboard summary to: {}", export_path.display());
    Ok(())
}
