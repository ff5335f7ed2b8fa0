//! Interactive trait for components that handle keyboard input
//!
//! App handles global keys first, then routes the rest to the focused
//! component. Whatever the component returns as `Handled::No` is dropped.

use super::{Component, Scrollable};
use crossterm::event::{KeyCode, KeyEvent};

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

pub trait Interactive: Component {
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Keybind hints shown in the status bar while focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}

/// Shared scroll keys for anything both Interactive and Scrollable
pub trait ScrollableInteractive: Interactive + Scrollable {
    /// Up/Down/k/j, Home/End, PageUp/PageDown
    fn handle_scroll_keys(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.scroll_to_bottom(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown | KeyCode::Char(' ') => self.page_down(),
            _ => return Handled::No,
        }
        Handled::Yes
    }
}

impl<T: Interactive + Scrollable> ScrollableInteractive for T {}
