// Status bar component
//
// Renders the reading position at the bottom: active section, scroll percent,
// and the keybind hints of whatever has focus.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use crate::tui::traits::{ComponentId, Interactive};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
///
/// Adapts to terminal width:
/// - Wide: section, position, focus hint and theme
/// - Narrow: section and position only
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);
    f.render_widget(
        Paragraph::new(status_text(app, bp))
            .style(Style::default().fg(app.theme.status_bar))
            .block(Block::default().borders(Borders::TOP)),
        area,
    );
}

fn status_text(app: &App, bp: Breakpoint) -> String {
    let sections = app.tracker.sections();
    let position = format!(
        " {} {}/{} │ {}%",
        app.tracker.active(),
        app.tracker.active_index() + 1,
        sections.len(),
        app.page.scroll().percent()
    );

    if !bp.at_least(Breakpoint::Normal) {
        return position;
    }

    let hint = match app.focused {
        ComponentId::Page => app.page.focus_hint(),
        ComponentId::Logs => app.logs_panel.focus_hint(),
    };

    let mut text = position;
    if let Some(hint) = hint {
        text.push_str(&format!(" │ {}: {}", app.focused.label(), hint));
    }
    if bp.at_least(Breakpoint::Wide) {
        text.push_str(&format!(" │ {}", app.theme.name));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::test_app;

    #[tokio::test]
    async fn test_status_text_by_width() {
        let (app, _rx) = test_app();

        let compact = status_text(&app, Breakpoint::Compact);
        assert_eq!(compact, " Home 1/5 │ 0%");

        let normal = status_text(&app, Breakpoint::Normal);
        assert!(normal.starts_with(" Home 1/5"));
        assert!(normal.contains("Tab:next"));
        assert!(!normal.contains("Folio Dark"));

        let wide = status_text(&app, Breakpoint::UltraWide);
        assert!(wide.ends_with("Folio Dark"));
    }
}
