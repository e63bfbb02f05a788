//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::StatusBucket;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for components reporting something other than UP or DOWN.
    pub warning: Color,
    /// Color for DOWN components and failure notifications.
    pub critical: Color,
    /// Color for UP components.
    pub healthy: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            ..Self::dark()
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for an actuator status string ("UP", "DOWN", ...).
    pub fn health_style(&self, status: &str) -> Style {
        match status {
            "UP" => Style::default().fg(self.healthy),
            "DOWN" | "OUT_OF_SERVICE" => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
            _ => Style::default().fg(self.warning),
        }
    }

    /// Chart and table color for a status bucket.
    pub fn bucket_color(&self, bucket: StatusBucket) -> Color {
        match bucket {
            StatusBucket::Ok => Color::Rgb(40, 167, 69),
            StatusBucket::NotFound => Color::Rgb(0, 123, 255),
            StatusBucket::BadRequest => Color::Rgb(253, 126, 20),
            StatusBucket::ServerError => Color::Rgb(220, 53, 69),
            StatusBucket::Other => self.border,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_style() {
        let theme = Theme::dark();
        assert_eq!(theme.health_style("UP").fg, Some(Color::Green));
        assert_eq!(theme.health_style("DOWN").fg, Some(Color::Red));
        assert_eq!(theme.health_style("UNKNOWN").fg, Some(Color::Yellow));
    }

    #[test]
    fn test_bucket_colors_are_distinct() {
        let theme = Theme::light();
        let colors: Vec<Color> = StatusBucket::ALL.iter().map(|&b| theme.bucket_color(b)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
