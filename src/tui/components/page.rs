//! Page panel: the scrollable portfolio document
//!
//! Draws the backdrop, then the visible document rows, then the rotating
//! taglines on their reserved rows. Hidden taglines leave their row empty.

use super::backdrop;
use super::scrollbar::render_scrollbar;
use crate::content::TaglineSlot;
use crate::tagline::TaglinePresenter;
use crate::theme::Theme;
use crate::tui::document::Document;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Handled, Interactive, Scrollable, ScrollableInteractive,
};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// The two rotations the page can show
pub struct Taglines<'a> {
    pub primary: &'a TaglinePresenter,
    pub secondary: &'a TaglinePresenter,
}

impl Taglines<'_> {
    fn presenter(&self, slot: TaglineSlot) -> &TaglinePresenter {
        match slot {
            TaglineSlot::Primary => self.primary,
            TaglineSlot::Secondary => self.secondary,
        }
    }
}

pub struct PagePanel {
    scroll: ScrollState,
}

impl PagePanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::manual(),
        }
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    /// `area` is the whole page (backdrop, scrollbar); `text` the column the
    /// document was laid out for
    pub fn render_with_document(
        &self,
        f: &mut Frame,
        area: Rect,
        text: Rect,
        document: &Document,
        taglines: &Taglines,
        theme: &Theme,
        parallax_factor: f64,
    ) {
        backdrop::render(f, area, self.scroll.offset(), parallax_factor, theme);

        let tagline_style = Style::default()
            .fg(theme.tagline)
            .add_modifier(Modifier::BOLD);
        let (start, end) = self.scroll.visible_range();

        for (i, row) in (start..end).enumerate() {
            let y = text.y + i as u16;
            if y >= text.bottom() {
                break;
            }

            let reserved = document
                .tagline_rows()
                .iter()
                .find(|t| t.row as usize == row);

            match reserved {
                Some(tagline) => {
                    let presenter = taglines.presenter(tagline.slot);
                    if presenter.is_visible() {
                        let line = Line::from(Span::styled(presenter.current(), tagline_style));
                        f.buffer_mut().set_line(text.x, y, &line, text.width);
                    }
                }
                None => {
                    if let Some(line) = document.line(row) {
                        f.buffer_mut().set_line(text.x, y, line, text.width);
                    }
                }
            }
        }

        render_scrollbar(f, area, &self.scroll, theme.accent);
    }
}

impl Default for PagePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for PagePanel {
    fn id(&self) -> ComponentId {
        ComponentId::Page
    }
}

impl Scrollable for PagePanel {
    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Interactive for PagePanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        self.handle_scroll_keys(key)
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("j/k:scroll  Tab:next  1-9:jump")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Portfolio;
    use crate::tagline::{run_until, ManualTimer, TaglineTiming};
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_scroll_keys() {
        let mut page = PagePanel::new();
        page.update_dimensions(100, 20);

        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(page.handle_key(key(KeyCode::Char('j'))), Handled::Yes);
        assert_eq!(page.scroll.offset(), 1);
        page.handle_key(key(KeyCode::PageDown));
        assert_eq!(page.scroll.offset(), 21);
        page.handle_key(key(KeyCode::End));
        assert_eq!(page.scroll.offset(), 80);
        page.handle_key(key(KeyCode::Home));
        assert_eq!(page.scroll.offset(), 0);
        assert_eq!(page.handle_key(key(KeyCode::Char('x'))), Handled::No);
    }

    #[test]
    fn test_hidden_tagline_leaves_row_empty() {
        let portfolio = Portfolio::load(None).unwrap();
        let theme = Theme::default();
        let doc = Document::layout(&portfolio, &theme, 60);
        let row = doc.tagline_rows()[0].row as u16;

        let mut primary =
            TaglinePresenter::new(portfolio.taglines.clone(), TaglineTiming::default()).unwrap();
        let secondary =
            TaglinePresenter::new(portfolio.alt_taglines().to_vec(), TaglineTiming::default())
                .unwrap();
        let mut timer = ManualTimer::new();
        primary.start(&mut timer);

        let mut page = PagePanel::new();
        page.update_dimensions(doc.total_height(), 30);
        let area = Rect::new(0, 0, 60, 30);

        // Parallax off so the backdrop never lands on the tagline row
        let draw = |terminal: &mut Terminal<TestBackend>, primary: &TaglinePresenter| {
            terminal
                .draw(|f| {
                    let taglines = Taglines {
                        primary,
                        secondary: &secondary,
                    };
                    page.render_with_document(f, area, area, &doc, &taglines, &theme, 0.0);
                })
                .unwrap();
        };

        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        draw(&mut terminal, &primary);
        assert!(row_text(&terminal, row).starts_with("Freelancer"));

        run_until(&mut primary, &mut timer, Duration::from_millis(2600));
        assert!(!primary.is_visible());
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        draw(&mut terminal, &primary);
        assert!(!row_text(&terminal, row).contains("Freelancer"));
    }
}
