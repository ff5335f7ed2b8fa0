//! Responsive breakpoints for the page shell.
//!
//! Single source of truth for width thresholds, so render code and mouse
//! hit-testing agree on where the sidebar and page are.

use ratatui::layout::Rect;

/// Widest the text column gets, however large the terminal
const MAX_PAGE_WIDTH: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols: no sidebar
    Compact,
    /// 60-99 cols: narrow sidebar
    Normal,
    /// 100-139 cols
    Wide,
    /// 140+ cols: page text is centered
    UltraWide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            100..=139 => Breakpoint::Wide,
            _ => Breakpoint::UltraWide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
            Breakpoint::UltraWide => 3,
        }
    }

    /// Sidebar width, or None when the sidebar is hidden
    pub fn sidebar_width(&self) -> Option<u16> {
        match self {
            Breakpoint::Compact => None,
            Breakpoint::Normal => Some(24),
            Breakpoint::Wide => Some(28),
            Breakpoint::UltraWide => Some(32),
        }
    }

    /// Blank columns on each side of the page text
    pub fn page_padding(&self) -> u16 {
        match self {
            Breakpoint::Compact => 1,
            Breakpoint::Normal => 2,
            Breakpoint::Wide | Breakpoint::UltraWide => 4,
        }
    }
}

/// Body split into sidebar and page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellLayout {
    pub sidebar: Option<Rect>,
    pub page: Rect,
    /// Where the text column sits inside `page`
    pub text: Rect,
}

impl ShellLayout {
    pub fn new(body: Rect) -> Self {
        let bp = Breakpoint::from_width(body.width);

        let (sidebar, page) = match bp.sidebar_width() {
            Some(w) => {
                let sidebar = Rect::new(body.x, body.y, w, body.height);
                let page = Rect::new(body.x + w, body.y, body.width - w, body.height);
                (Some(sidebar), page)
            }
            None => (None, body),
        };

        // One column on the right is kept for the scrollbar
        let pad = bp.page_padding();
        let avail = page.width.saturating_sub(pad * 2 + 1);
        let width = avail.min(MAX_PAGE_WIDTH);
        let x = page.x + pad + (avail - width) / 2;
        let text = Rect::new(x, page.y, width, page.height);

        Self {
            sidebar,
            page,
            text,
        }
    }
}
