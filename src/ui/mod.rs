//! Terminal UI rendering using ratatui.
//!
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`overview`]: Metric cards and the status-code charts
//! - [`traces`]: Paged, filterable table of HTTP traces
//! - [`detail`]: Modal overlay showing one trace
//! - [`common`]: Shared components (header, tabs, status bar, help, notifications)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (overview/traces::render)            │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - detail::render_overlay
//!    - common::render_help
//!    - common::render_notification
//! ```

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, View};

pub mod common;
pub mod detail;
pub mod overview;
pub mod theme;
pub mod traces;

pub use theme::Theme;

/// Minimum terminal size for usable display.
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 16;

/// Draw one full frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
            .intersection(area);
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(1), // Tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);

    match app.current_view {
        View::Overview => overview::render(frame, app, chunks[2]),
        View::Traces => traces::render(frame, app, chunks[2]),
    }

    common::render_status_bar(frame, app, chunks[3]);

    if app.show_detail_overlay {
        detail::render_overlay(frame, app, area);
    }

    if app.show_help {
        common::render_help(frame, app, area);
    }

    // Failures sit above everything until acknowledged
    common::render_notification(frame, app, area);
}
