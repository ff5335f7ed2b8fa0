//! Logs panel component
//!
//! Shows the in-memory log buffer under the page while toggled on. The panel
//! owns its scroll state and follows new entries until the user scrolls up.
//! Entries come from the shared [`LogBuffer`](crate::logging::LogBuffer);
//! the panel never holds on to them.

use super::scrollbar::render_scrollbar;
use crate::logging::{LogEntry, LogLevel};
use crate::theme::Theme;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Handled, Interactive, Scrollable, ScrollableInteractive,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub struct LogsPanel {
    /// Scroll state (position, viewport, auto-follow)
    scroll: ScrollState,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::new(),
        }
    }

    /// Update with current log entries (call each frame)
    pub fn sync_entries(&mut self, entries: &[LogEntry], viewport_height: usize) {
        self.scroll
            .update_dimensions(entries.len(), viewport_height);
    }

    pub fn render_with_entries(
        &self,
        f: &mut Frame,
        area: Rect,
        entries: &[LogEntry],
        theme: &Theme,
        focused: bool,
    ) {
        let (start, end) = self.scroll.visible_range();
        let items: Vec<ListItem> = entries
            .iter()
            .skip(start)
            .take(end.saturating_sub(start))
            .map(|entry| ListItem::new(format_log_entry(entry)).style(log_level_style(entry, theme)))
            .collect();

        let border_color = if focused {
            theme.highlight
        } else {
            theme.border
        };

        let title = if self.scroll.auto_follow {
            " System Logs "
        } else {
            " System Logs [scroll] "
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(border_color))
                .title(title),
        );

        f.render_widget(list, area);
        render_scrollbar(f, area, &self.scroll, border_color);
    }
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for LogsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Logs
    }
}

impl Scrollable for LogsPanel {
    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Interactive for LogsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            // Jump back to the newest entry and keep following
            KeyCode::Char('f') => {
                self.scroll.scroll_to_bottom();
                Handled::Yes
            }
            _ => self.handle_scroll_keys(key),
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:scroll  f:follow  l/Esc:close")
    }
}

/// Format a log entry for display
fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.target,
        entry.message
    )
}

fn log_level_style(entry: &LogEntry, theme: &Theme) -> Style {
    match entry.level {
        LogLevel::Error => Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.warn),
        LogLevel::Info => Style::default().fg(theme.foreground),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use crossterm::event::KeyModifiers;

    fn entries(n: usize) -> Vec<LogEntry> {
        (0..n)
            .map(|i| LogEntry {
                timestamp: Local::now(),
                level: LogLevel::Info,
                target: "folio".into(),
                message: format!("entry {}", i),
            })
            .collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_follows_new_entries() {
        let mut panel = LogsPanel::new();
        panel.sync_entries(&entries(20), 5);
        assert_eq!(panel.scroll.offset(), 15);

        panel.sync_entries(&entries(25), 5);
        assert_eq!(panel.scroll.offset(), 20);
    }

    #[test]
    fn test_scrolling_up_stops_following_until_f() {
        let mut panel = LogsPanel::new();
        panel.sync_entries(&entries(20), 5);

        assert_eq!(panel.handle_key(key(KeyCode::Up)), Handled::Yes);
        panel.sync_entries(&entries(30), 5);
        assert_eq!(panel.scroll.offset(), 14);

        panel.handle_key(key(KeyCode::Char('f')));
        panel.sync_entries(&entries(31), 5);
        assert_eq!(panel.scroll.offset(), 26);
    }

    #[test]
    fn test_unhandled_keys_fall_through() {
        let mut panel = LogsPanel::new();
        assert_eq!(panel.handle_key(key(KeyCode::Esc)), Handled::No);
        assert_eq!(panel.handle_key(key(KeyCode::Char('q'))), Handled::No);
    }

    #[test]
    fn test_format_entry() {
        let entry = &entries(1)[0];
        let text = format_log_entry(entry);
        assert!(text.starts_with('['));
        assert!(text.ends_with("INFO  folio: entry 0"));
    }
}
