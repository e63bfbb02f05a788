//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, the help overlay
//! and the failure notification modal.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar with backend health, disk space and live uptime.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let dashboard = app.dashboard();

    let mut spans = vec![Span::styled(
        " ACTUATOR DASH ",
        Style::default().add_modifier(Modifier::BOLD),
    )];

    match dashboard.health() {
        Some(health) => {
            spans.push(Span::raw("│ "));
            spans.push(Span::styled(
                format!("● {} ", health.status),
                app.theme.health_style(&health.status),
            ));
            if let Some(free) = health.disk_free() {
                spans.push(Span::raw(format!("│ disk free {} ", free)));
            }
        }
        None if app.in_flight() > 0 => spans.push(Span::raw("│ Loading... ")),
        None => spans.push(Span::styled(
            "│ health unavailable ",
            Style::default().add_modifier(Modifier::DIM),
        )),
    }

    if let Some(uptime) = dashboard.uptime() {
        spans.push(Span::raw("│ up "));
        spans.push(Span::styled(
            uptime.display().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(Span::styled(
        format!("│ {}", app.source_description()),
        Style::default().add_modifier(Modifier::DIM),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![Line::from(" 1:Overview "), Line::from(" 2:Traces ")];

    let selected = match app.current_view {
        View::Overview => 0,
        View::Traces => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: current view, time since last refresh, available controls.
/// Also displays temporary status messages.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Overview => "Tab:switch r:refresh ?:help q:quit",
        View::Traces => "←→:status ↑↓:select PgUp/PgDn:page Enter:detail e:export ?:help q:quit",
    };

    let refreshed = match app.last_refresh {
        Some(_) if app.in_flight() > 0 => format!("Fetching ({} pending)", app.in_flight()),
        Some(at) => format!("Refreshed {:.0}s ago", at.elapsed().as_secs_f64()),
        None => "Not loaded".to_string(),
    };

    let status = format!(" {} | {} | {}", app.current_view.label(), refreshed, controls);
    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab 1/2     Switch views"),
        Line::from("  ↑/↓ j/k     Select trace"),
        Line::from("  PgUp/PgDn   Previous/next page"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Trace detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Traces",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Cycle status filter"),
        Line::from("  a           Show all statuses"),
        Line::from("  e           Export all filtered rows"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r           Refresh"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);
    let help_area = centered(area, 42, 24);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

/// Render the oldest unacknowledged fetch failure as a modal.
pub fn render_notification(frame: &mut Frame, app: &App, area: Rect) {
    let Some(note) = app.current_notification() else {
        return;
    };

    let pending = app.notifications.len();
    let title = if pending > 1 {
        format!(" Error (1 of {}) ", pending)
    } else {
        " Error ".to_string()
    };

    let text = vec![
        Line::from(vec![Span::styled(
            format!("Failed to fetch {}", note.resource),
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(note.message.clone()),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to dismiss",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.critical));

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    let modal = centered(area, 60, 9);

    frame.render_widget(Clear, modal);
    frame.render_widget(paragraph, modal);
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
