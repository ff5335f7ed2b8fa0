// UI rendering
//
// Called on every frame. The body (sidebar + page) fills the screen above an
// optional log panel and the status bar; the toast is drawn last so it sits
// on top of everything.

use super::app::App;
use super::components::{self, Taglines};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

/// Rows given to the log panel while it is open
const LOGS_HEIGHT: u16 = 8;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    // Apply theme background to entire frame (respects use_theme_background)
    let bg_block = Block::default().style(
        Style::default()
            .bg(app.theme.background)
            .fg(app.theme.foreground),
    );
    f.render_widget(bg_block, f.area());

    let logs_height = if app.show_logs { LOGS_HEIGHT } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),              // Sidebar + page
            Constraint::Length(logs_height), // System logs
            Constraint::Length(2),           // Status bar
        ])
        .split(f.area());

    let shell = app.sync_layout(chunks[0]);

    if let Some(sidebar) = shell.sidebar {
        components::sidebar::render(f, sidebar, app);
    }

    let taglines = Taglines {
        primary: app.primary(),
        secondary: app.secondary(),
    };
    app.page.render_with_document(
        f,
        shell.page,
        shell.text,
        &app.document,
        &taglines,
        &app.theme,
        app.config.motion.parallax_factor,
    );

    if app.show_logs {
        let area = chunks[1];
        let entries = app.log_buffer.recent(usize::MAX);
        app.logs_panel
            .sync_entries(&entries, area.height.saturating_sub(2) as usize);
        app.logs_panel
            .render_with_entries(f, area, &entries, &app.theme, true);
    }

    components::status_bar::render(f, chunks[2], app);

    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}
