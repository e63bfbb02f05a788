//! Overview rendering.
//!
//! Metric cards for health, disk space, CPU count and uptime, per-status
//! request counts, and the two status-code charts.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{ChartData, StatusBucket};

/// Render the Overview view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(4), // Metric cards
        Constraint::Length(4), // Status counts
        Constraint::Min(6),    // Charts
    ])
    .split(area);

    render_metric_cards(frame, app, chunks[0]);
    render_bucket_counts(frame, app, chunks[1]);

    match app.dashboard().chart() {
        Some(chart) => {
            let halves =
                Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(chunks[2]);
            render_bar_chart(frame, app, &chart, halves[0]);
            render_share_chart(frame, app, &chart, halves[1]);
        }
        None => {
            let msg = if app.in_flight() > 0 {
                " Loading traces..."
            } else {
                " No traces loaded. Press r to refresh."
            };
            let block = panel(app, " Requests ");
            frame.render_widget(
                Paragraph::new(msg)
                    .style(Style::default().add_modifier(Modifier::DIM))
                    .block(block),
                chunks[2],
            );
        }
    }
}

fn panel<'a>(app: &App, title: impl Into<Line<'a>>) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

fn card(frame: &mut Frame, app: &App, area: Rect, title: &str, value: Span) {
    let paragraph = Paragraph::new(Line::from(value)).block(panel(app, format!(" {} ", title)));
    frame.render_widget(paragraph, area);
}

fn missing() -> Span<'static> {
    Span::styled("-", Style::default().add_modifier(Modifier::DIM))
}

fn render_metric_cards(frame: &mut Frame, app: &App, area: Rect) {
    let dashboard = app.dashboard();
    let cells = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let health = dashboard
        .health()
        .map(|h| Span::styled(h.status.clone(), app.theme.health_style(&h.status)))
        .unwrap_or_else(missing);
    card(frame, app, cells[0], "Health", health);

    let disk = dashboard
        .health()
        .and_then(|h| h.disk_free())
        .map(|free| Span::styled(free.to_string(), bold))
        .unwrap_or_else(missing);
    card(frame, app, cells[1], "Disk Free", disk);

    let cpu = dashboard
        .cpu()
        .and_then(|m| m.first_value())
        .map(|v| Span::styled(format!("{}", v), bold))
        .unwrap_or_else(missing);
    card(frame, app, cells[2], "CPUs", cpu);

    let uptime = dashboard
        .uptime()
        .map(|u| Span::styled(u.display().to_string(), bold))
        .unwrap_or_else(missing);
    card(frame, app, cells[3], "Uptime", uptime);
}

fn render_bucket_counts(frame: &mut Frame, app: &App, area: Rect) {
    let traces = app.dashboard().traces();
    let cells = Layout::horizontal([Constraint::Ratio(1, 5); 5]).split(area);

    for (cell, bucket) in cells.iter().zip(StatusBucket::ALL) {
        let value = Span::styled(
            traces.count(bucket).to_string(),
            Style::default()
                .fg(app.theme.bucket_color(bucket))
                .add_modifier(Modifier::BOLD),
        );
        card(frame, app, *cell, &format!("HTTP {}", bucket.label()), value);
    }
}

fn render_bar_chart(frame: &mut Frame, app: &App, chart: &ChartData, area: Rect) {
    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .map(|&(bucket, count)| {
            let color = app.theme.bucket_color(bucket);
            Bar::default()
                .value(count)
                .label(Line::from(bucket.label()))
                .style(Style::default().fg(color))
                .value_style(Style::default().bg(color).add_modifier(Modifier::BOLD))
        })
        .collect();

    let bar_chart = BarChart::default()
        .block(panel(app, format!(" {} ", chart.title)))
        .data(BarGroup::default().bars(&bars))
        .bar_width(7)
        .bar_gap(3);

    frame.render_widget(bar_chart, area);
}

fn render_share_chart(frame: &mut Frame, app: &App, chart: &ChartData, area: Rect) {
    let block = panel(app, " Share ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let shares = chart.shares();
    let rows = Layout::vertical(vec![Constraint::Length(1); shares.len()]).split(inner);

    for (row, share) in rows.iter().zip(&shares) {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(app.theme.bucket_color(share.bucket)))
            .ratio((share.percent / 100.0).clamp(0.0, 1.0))
            .label(format!("{} {:.1}%", share.bucket.label(), share.percent));
        frame.render_widget(gauge, *row);
    }
}
