//! Sidebar: owner name, primary tagline, section navigation
//!
//! The nav list highlights whatever section the tracker reports as active.
//! Row positions are computed in one place so mouse clicks land on the same
//! items that were drawn.

use crate::tui::app::App;
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// First nav row, relative to the top of the sidebar
const NAV_TOP: u16 = 6;
/// Rows between nav items
const NAV_SPACING: u16 = 2;

const FOOTER: [&str; 3] = ["y:copy email", "t:theme  l:logs", "q:quit"];

/// Drawable area: one column of padding on the left, the border on the right
fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x + 1,
        area.y,
        area.width.saturating_sub(2),
        area.height,
    )
}

/// Screen rows of the first `count` nav items that fit in `area`
pub fn nav_rows(area: Rect, count: usize) -> Vec<Rect> {
    let inner = inner(area);
    (0..count)
        .map(|i| inner.y + NAV_TOP + NAV_SPACING * i as u16)
        .take_while(|&y| y < inner.bottom())
        .map(|y| Rect::new(inner.x, y, inner.width, 1))
        .collect()
}

/// Nav item under the cell `(x, y)`, if any
pub fn hit_test(area: Rect, count: usize, x: u16, y: u16) -> Option<usize> {
    nav_rows(area, count)
        .iter()
        .position(|row| row.contains(Position { x, y }))
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.sidebar_bg));
    f.render_widget(block, area);

    let inner = inner(area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let width = inner.width;
    let buf = f.buffer_mut();

    let mut put = |row: u16, line: Line| {
        if row < inner.height {
            buf.set_line(inner.x, inner.y + row, &line, width);
        }
    };

    put(
        1,
        Line::from(Span::styled(
            app.portfolio.name.clone(),
            Style::default()
                .fg(theme.heading)
                .add_modifier(Modifier::BOLD),
        )),
    );

    let tagline = app.primary();
    if tagline.is_visible() {
        put(
            2,
            Line::from(Span::styled(
                tagline.current().to_string(),
                Style::default().fg(theme.tagline),
            )),
        );
    }

    put(
        4,
        Line::from(Span::styled(
            "─".repeat(width as usize),
            Style::default().fg(theme.border),
        )),
    );

    let sections = app.document.sections();
    let active = app.tracker.active_index();
    for (i, row) in nav_rows(area, sections.len()).into_iter().enumerate() {
        let section = &sections[i];
        let label = match &section.icon {
            Some(icon) => format!(" {} {}", icon, section.id),
            None => format!("   {}", section.id),
        };
        let pad = (width as usize).saturating_sub(label.width());
        let line = if i == active {
            Line::from(Span::styled(
                format!("{}{}", label, " ".repeat(pad)),
                Style::default()
                    .fg(theme.accent_fg)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(label, Style::default().fg(theme.foreground)))
        };
        put(row.y - inner.y, line);
    }

    // Footer hints, bottom-aligned, only when they clear the nav list
    let nav_end = NAV_TOP + NAV_SPACING * sections.len() as u16;
    let footer_top = inner.height.saturating_sub(FOOTER.len() as u16 + 1);
    if footer_top > nav_end {
        for (i, hint) in FOOTER.iter().enumerate() {
            put(
                footer_top + i as u16,
                Line::from(Span::styled(*hint, Style::default().fg(theme.muted))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_rows_are_spaced_and_clipped() {
        let area = Rect::new(0, 0, 24, 40);
        let rows = nav_rows(area, 5);
        let ys: Vec<u16> = rows.iter().map(|r| r.y).collect();
        assert_eq!(ys, vec![6, 8, 10, 12, 14]);
        assert!(rows.iter().all(|r| r.x == 1 && r.width == 22));

        // Only three items fit in a short sidebar
        assert_eq!(nav_rows(Rect::new(0, 0, 24, 11), 5).len(), 3);
    }

    #[test]
    fn test_hit_test_matches_rows() {
        let area = Rect::new(0, 2, 24, 40);
        assert_eq!(hit_test(area, 5, 5, 8), Some(0));
        assert_eq!(hit_test(area, 5, 20, 10), Some(1));
        assert_eq!(hit_test(area, 5, 5, 9), None);
        // The padding column and the border are not part of an item
        assert_eq!(hit_test(area, 5, 0, 8), None);
        assert_eq!(hit_test(area, 5, 23, 8), None);
        assert_eq!(hit_test(area, 2, 5, 12), None);
    }
}
