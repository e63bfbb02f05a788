//! Detail overlay rendering.
//!
//! Displays a modal overlay with the selected trace: a summary header and the
//! raw record as pretty-printed JSON.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::{StatusBucket, TraceRecord};

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 12;

/// Render the trace detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(trace) = app.selected_trace() else {
        return;
    };

    // Width: 90% of screen, clamped to [MIN_OVERLAY_WIDTH, 110]
    let overlay_width = (area.width * 90 / 100).clamp(MIN_OVERLAY_WIDTH, 110);
    // Height: 90% of screen, clamped to [MIN_OVERLAY_HEIGHT, 50]
    let overlay_height = (area.height * 90 / 100).clamp(MIN_OVERLAY_HEIGHT, 50);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(4), // Summary
        Constraint::Min(4),    // Raw record
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    // ===== HEADER SECTION =====
    let bucket = StatusBucket::classify(trace.status());
    let header_lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", trace.method().unwrap_or("?")),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(trace.uri().unwrap_or("-").to_string()),
        ]),
        Line::from(vec![
            Span::raw(" Status: "),
            Span::styled(
                trace
                    .status()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "missing".into()),
                Style::default()
                    .fg(app.theme.bucket_color(bucket))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("    Bucket: {}", bucket.label())),
            Span::raw(format!(
                "    Time taken: {}",
                trace
                    .time_taken_ms()
                    .map(|ms| format!("{}ms", ms))
                    .unwrap_or_else(|| "-".into())
            )),
        ]),
    ];

    let header_block = Block::default()
        .title(format!(" Trace {} ", trace.timestamp().unwrap_or("")))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));
    frame.render_widget(Paragraph::new(header_lines).block(header_block), chunks[0]);

    // ===== RAW RECORD =====
    let body = Paragraph::new(pretty_json(trace))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Record ")
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        );
    frame.render_widget(body, chunks[1]);

    // ===== FOOTER =====
    let footer = Paragraph::new(" ↑↓:previous/next trace  Esc:close")
        .style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(footer, chunks[2]);
}

fn pretty_json(trace: &TraceRecord) -> String {
    serde_json::to_string_pretty(trace.raw()).unwrap_or_else(|_| trace.raw().to_string())
}
