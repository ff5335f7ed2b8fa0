//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses after a configurable duration.
//! Renders in the bottom-right corner on top of all other content.

use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// A toast notification that auto-dismisses
pub struct Toast {
    /// Message to display
    pub message: String,
    /// When the toast was created
    created_at: Instant,
    /// How long to show the toast
    duration: Duration,
}

impl Toast {
    /// Create a new toast with default 2-second duration
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_duration(message, Duration::from_secs(2))
    }

    pub fn with_duration(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            created_at: Instant::now(),
            duration,
        }
    }

    /// Check if the toast has expired and should be removed
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Where the toast goes inside `area`
    fn placement(&self, area: Rect) -> Rect {
        // 2 columns of padding, 2 of border
        let width = (self.message.width() as u16 + 4).min(area.width.saturating_sub(4));
        let height = 3;

        // Bottom-right corner, 2 cells from the edge
        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);

        Rect::new(x, y, width, height).intersection(area)
    }

    /// Render the toast in the bottom-right corner
    ///
    /// Uses `Clear` widget to ensure toast is visible on top of other content.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let toast_area = self.placement(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.highlight))
            .style(Style::default().bg(theme.background));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.foreground))
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        assert!(!Toast::new("Copied").is_expired());
        assert!(Toast::with_duration("Copied", Duration::ZERO).is_expired());
    }

    #[test]
    fn test_placement_uses_display_width() {
        let area = Rect::new(0, 0, 80, 24);
        let ascii = Toast::new("abcd").placement(area);
        let wide = Toast::new("日本").placement(area);
        assert_eq!(ascii.width, 8);
        assert_eq!(wide.width, 8);
        assert_eq!(ascii.right(), 78);
        assert_eq!(ascii.bottom(), 22);
    }

    #[test]
    fn test_placement_stays_inside_tiny_area() {
        let area = Rect::new(0, 0, 6, 2);
        let placed = Toast::new("a long message").placement(area);
        assert!(area.union(placed) == area);
    }
}
