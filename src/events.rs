use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, TraceFilter, View};

/// File written by the export key.
pub const EXPORT_FILE: &str = "httptrace.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // A pending failure notification is modal; any key acknowledges it
    if app.current_notification().is_some() {
        app.dismiss_notification();
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If detail overlay is shown, handle overlay-specific keys
    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            // Allow stepping through traces while overlay is open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            _ => {}
        }
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab | KeyCode::BackTab => app.next_view(),
        KeyCode::Char('1') => app.set_view(View::Overview),
        KeyCode::Char('2') => app.set_view(View::Traces),

        // Status filter (Traces view)
        KeyCode::Left | KeyCode::Char('h') => {
            if app.current_view == View::Traces {
                app.prev_filter();
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.current_view == View::Traces {
                app.next_filter();
            }
        }
        KeyCode::Char('a') => app.set_filter(TraceFilter::All),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.prev_page(),
        KeyCode::PageDown => app.next_page(),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Enter detail overlay
        KeyCode::Enter => app.enter_detail(),

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Refresh
        KeyCode::Char('r') => app.refresh(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from(EXPORT_FILE);
            match app.export_traces(&export_path) {
                Ok(rows) => {
                    app.set_status_message(format!(
                        "Exported {} traces to {}",
                        rows,
                        export_path.display()
                    ));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        // Tab clicks (row 1, after header): Overview (0-13), Traces (14-24)
        MouseEventKind::Down(MouseButton::Left) if mouse.row == 1 => {
            if mouse.column < 14 {
                app.set_view(View::Overview);
            } else if mouse.column < 25 {
                app.set_view(View::Traces);
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}
