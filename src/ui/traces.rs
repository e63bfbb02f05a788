//! Trace table rendering.
//!
//! A paged table of the current trace list, narrowed by the status filter.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs},
    Frame,
};

use crate::app::{App, TraceFilter};
use crate::data::StatusBucket;

/// Render the Traces view: a filter bar above the current page of rows.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(4)]).split(area);

    render_filter_bar(frame, app, chunks[0]);

    let traces = app.dashboard().traces();
    let visible = app.visible_trace_indices();

    if visible.is_empty() {
        let msg = if app.dashboard().traces_as_of().is_none() {
            " No traces loaded"
        } else {
            " No traces with this status"
        };
        let paragraph = Paragraph::new(msg)
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(table_block(app, " Traces ".to_string()));
        frame.render_widget(paragraph, chunks[1]);
        return;
    }

    let (page, pages) = app.page();
    let start = page * app.page_size;
    let end = (start + app.page_size).min(visible.len());

    let header = Row::new(vec![
        Cell::from("Timestamp"),
        Cell::from("Method"),
        Cell::from("Status"),
        Cell::from("Time"),
        Cell::from("URI"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = visible[start..end]
        .iter()
        .filter_map(|&idx| traces.get(idx))
        .map(|t| {
            let status = t.status();
            let bucket = StatusBucket::classify(status);
            Row::new(vec![
                Cell::from(t.timestamp().unwrap_or("-").to_string()),
                Cell::from(t.method().unwrap_or("-").to_string()),
                Cell::from(status.map(|s| s.to_string()).unwrap_or_else(|| "-".into()))
                    .style(Style::default().fg(app.theme.bucket_color(bucket))),
                Cell::from(
                    t.time_taken_ms()
                        .map(|ms| format!("{}ms", ms))
                        .unwrap_or_else(|| "-".into()),
                ),
                Cell::from(t.uri().unwrap_or("-").to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(26), // Timestamp
        Constraint::Length(8),  // Method
        Constraint::Length(8),  // Status
        Constraint::Length(9),  // Time
        Constraint::Fill(1),    // URI
    ];

    let title = format!(
        " Traces ({}/{}) [page {}/{}] [{}/{}] ",
        visible.len(),
        traces.len(),
        page + 1,
        pages,
        app.selected_index + 1,
        visible.len(),
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(table_block(app, title))
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index - start));

    frame.render_stateful_widget(table, chunks[1], &mut state);
}

fn table_block(app: &App, title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let traces = app.dashboard().traces();
    let titles: Vec<Line> = TraceFilter::ALL
        .iter()
        .map(|f| {
            let count = match f {
                TraceFilter::All => traces.len(),
                TraceFilter::Bucket(b) => traces.count(*b),
            };
            let style = match f {
                TraceFilter::All => Style::default(),
                TraceFilter::Bucket(b) => Style::default().fg(app.theme.bucket_color(*b)),
            };
            Line::from(vec![
                Span::styled(format!(" {}", f.label()), style),
                Span::raw(format!(" ({}) ", count)),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.trace_filter.position())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active.add_modifier(Modifier::REVERSED))
        .divider("|");

    frame.render_widget(tabs, area);
}
