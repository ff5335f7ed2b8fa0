// TUI application state
//
// App owns everything the page needs between frames: the laid-out document,
// the page and log panels, the active-section tracker and the two tagline
// rotations. The event loop in mod.rs feeds it input, ticks and timer
// notifications; ui.rs reads it to draw.

use super::clipboard;
use super::components::{sidebar, LogsPanel, PagePanel, Toast};
use super::document::Document;
use super::layout::ShellLayout;
use super::traits::{Component, ComponentId, Handled, Interactive, Scrollable};
use crate::config::Config;
use crate::content::{Portfolio, TaglineSlot};
use crate::error::FolioError;
use crate::logging::LogBuffer;
use crate::tagline::{Fired, TaglinePresenter, TaglineTiming, TokioTimer};
use crate::theme::Theme;
use crate::tracker::{ActiveSectionTracker, ScrollIntersectionSource, SectionId, Viewport};
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use tokio::sync::mpsc;

/// Width the document is laid out at before the first frame reports the real one
const INITIAL_WIDTH: u16 = 80;

/// A presenter together with the timer that drives it
struct Rotation {
    presenter: TaglinePresenter,
    timer: TokioTimer<TaglineSlot>,
}

impl Rotation {
    fn new(
        slot: TaglineSlot,
        sequence: Vec<String>,
        timing: TaglineTiming,
        tx: mpsc::Sender<(TaglineSlot, Fired)>,
    ) -> Result<Self, FolioError> {
        Ok(Self {
            presenter: TaglinePresenter::new(sequence, timing)?,
            timer: TokioTimer::new(slot, tx),
        })
    }

    fn start(&mut self) {
        self.presenter.start(&mut self.timer);
    }

    fn on_fired(&mut self, fired: Fired) -> bool {
        self.timer.reap(fired.id);
        self.presenter.on_timer(fired, &mut self.timer)
    }

    fn stop(&mut self) {
        self.presenter.stop(&mut self.timer);
    }
}

/// Main application state for the TUI
pub struct App {
    pub portfolio: Portfolio,
    pub config: Config,
    pub theme: Theme,

    /// Page laid out for the current text width
    pub document: Document,
    /// (text width, theme name) the document was laid out for
    layout_key: Option<(u16, String)>,
    /// Shell geometry of the last frame, for mouse hit-testing
    shell: Option<ShellLayout>,

    pub page: PagePanel,
    pub tracker: ActiveSectionTracker<ScrollIntersectionSource>,
    primary: Rotation,
    secondary: Rotation,

    pub logs_panel: LogsPanel,
    pub log_buffer: LogBuffer,
    pub show_logs: bool,
    pub focused: ComponentId,

    pub toast: Option<Toast>,
    pub should_quit: bool,
}

impl App {
    /// Build the state; nothing runs until [`start`](Self::start)
    pub fn new(
        portfolio: Portfolio,
        config: Config,
        log_buffer: LogBuffer,
        tx: mpsc::Sender<(TaglineSlot, Fired)>,
    ) -> Result<Self> {
        let theme = Theme::by_name_with_background(&config.theme, config.use_theme_background);
        let document = Document::layout(&portfolio, &theme, INITIAL_WIDTH);

        let tracker = ActiveSectionTracker::new(
            ScrollIntersectionSource::new(),
            document.tracker_sections(),
            config.tracker.visibility()?,
        )?;

        let timing = config.motion.timing()?;
        let primary = Rotation::new(
            TaglineSlot::Primary,
            portfolio.taglines.clone(),
            timing,
            tx.clone(),
        )?;
        let secondary = Rotation::new(
            TaglineSlot::Secondary,
            portfolio.alt_taglines().to_vec(),
            timing,
            tx,
        )?;

        Ok(Self {
            portfolio,
            config,
            theme,
            document,
            layout_key: None,
            shell: None,
            page: PagePanel::new(),
            tracker,
            primary,
            secondary,
            logs_panel: LogsPanel::new(),
            log_buffer,
            show_logs: false,
            focused: ComponentId::Page,
            toast: None,
            should_quit: false,
        })
    }

    /// Arm both tagline rotations. Needs a running tokio runtime.
    pub fn start(&mut self) {
        self.primary.start();
        self.secondary.start();
        tracing::info!(
            sections = self.tracker.sections().len(),
            "Portfolio ready"
        );
    }

    /// Stop both rotations and the tracker. Safe to call more than once.
    pub fn shutdown(&mut self) {
        let live = self.tracker.is_connected()
            || self.primary().is_running()
            || self.secondary().is_running();
        if !live {
            return;
        }
        self.primary.stop();
        self.secondary.stop();
        self.tracker.disconnect();
        tracing::debug!("Tagline rotations and section tracker stopped");
    }

    pub fn primary(&self) -> &TaglinePresenter {
        &self.primary.presenter
    }

    pub fn secondary(&self) -> &TaglinePresenter {
        &self.secondary.presenter
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Time
    // ─────────────────────────────────────────────────────────────────────────

    /// Route a timer notification to the rotation that scheduled it
    ///
    /// Returns true if a tagline changed.
    pub fn on_timer(&mut self, slot: TaglineSlot, fired: Fired) -> bool {
        match slot {
            TaglineSlot::Primary => self.primary.on_fired(fired),
            TaglineSlot::Secondary => self.secondary.on_fired(fired),
        }
    }

    /// Per-frame housekeeping: smooth scroll step, toast expiry
    pub fn on_tick(&mut self) {
        if self.page.scroll_mut().step() {
            self.sync_tracker();
            if !self.page.scroll().is_animating() {
                tracing::trace!(offset = self.page.scroll().offset(), "Scroll settled");
            }
        }
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Layout and tracking
    // ─────────────────────────────────────────────────────────────────────────

    /// Fit the page to `body`, re-laying out the document when the text
    /// width or theme changed
    pub fn sync_layout(&mut self, body: Rect) -> ShellLayout {
        let shell = ShellLayout::new(body);
        let key = (shell.text.width, self.theme.name.clone());

        if self.layout_key.as_ref() != Some(&key) {
            self.document = Document::layout(&self.portfolio, &self.theme, shell.text.width);
            for section in self.document.sections() {
                self.tracker
                    .source_mut()
                    .relayout(&section.id, section.region);
            }
            tracing::debug!(
                width = self.document.width(),
                rows = self.document.total_height(),
                "Page laid out"
            );
            self.layout_key = Some(key);
        }
        self.shell = Some(shell);

        let viewport = shell.text.height as usize;
        let extent = self.page_extent(viewport);
        self.page.update_dimensions(extent, viewport);
        self.sync_tracker();
        shell
    }

    /// Scrollable rows: the document, extended so the last section can
    /// reach the top of the viewport
    fn page_extent(&self, viewport: usize) -> usize {
        let last_top = self
            .document
            .sections()
            .last()
            .map_or(0, |s| s.region.top as usize);
        self.document.total_height().max(last_top + viewport)
    }

    /// Report the current viewport to the tracker and apply what it saw
    fn sync_tracker(&mut self) {
        let scroll = self.page.scroll();
        let viewport = Viewport::new(scroll.offset() as u32, scroll.viewport() as u32);
        self.tracker.source_mut().set_viewport(viewport);

        if self.tracker.sync() {
            tracing::info!(
                section = self.tracker.active().as_str(),
                "Active section changed"
            );
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// Scroll the page so section `index` starts at the top
    pub fn jump_to_section(&mut self, index: usize) {
        let Some(section) = self.document.sections().get(index) else {
            return;
        };
        let row = section.region.top as usize;
        tracing::debug!(section = section.id.as_str(), row, "Jump to section");

        let scroll = self.page.scroll_mut();
        if self.config.motion.smooth_scroll {
            scroll.animate_to(row);
        } else {
            scroll.jump_to(row);
        }
        self.sync_tracker();
    }

    pub fn jump_to_id(&mut self, id: &SectionId) -> bool {
        match self.document.sections().iter().position(|s| &s.id == id) {
            Some(index) => {
                self.jump_to_section(index);
                true
            }
            None => false,
        }
    }

    /// Jump to the first section starting below the scroll destination.
    ///
    /// Steps by position, not by active section: a section too tall to
    /// become active is still reachable.
    pub fn next_section(&mut self) {
        let row = self.page.scroll().destination();
        if let Some(index) = self
            .document
            .sections()
            .iter()
            .position(|s| s.region.top as usize > row)
        {
            self.jump_to_section(index);
        }
    }

    /// Jump to the last section starting above the scroll destination
    pub fn prev_section(&mut self) {
        let row = self.page.scroll().destination();
        let index = self
            .document
            .sections()
            .iter()
            .rposition(|s| (s.region.top as usize) < row)
            .unwrap_or(0);
        self.jump_to_section(index);
    }

    /// Run the content action bound to `key`. Returns false if none is.
    pub fn trigger_action(&mut self, key: char) -> bool {
        let Some(target) = self
            .portfolio
            .actions()
            .find(|a| a.key == key)
            .map(|a| SectionId::from_anchor(&a.target))
        else {
            return false;
        };
        self.jump_to_id(&target)
    }

    /// Scroll whichever panel has focus by `rows` (negative is up)
    pub fn scroll_focused_by(&mut self, rows: i32) {
        let scroll = match self.focused {
            ComponentId::Page => self.page.scroll_mut(),
            ComponentId::Logs => self.logs_panel.scroll_state_mut(),
        };
        let amount = rows.unsigned_abs() as usize;
        if rows < 0 {
            scroll.scroll_up_by(amount);
        } else {
            scroll.scroll_down_by(amount);
        }
        if self.focused == ComponentId::Page {
            self.sync_tracker();
        }
    }

    /// Left click at screen cell `(x, y)`. Returns true if it hit a nav item.
    pub fn click(&mut self, x: u16, y: u16) -> bool {
        let Some(sidebar_area) = self.shell.and_then(|s| s.sidebar) else {
            return false;
        };
        match sidebar::hit_test(sidebar_area, self.document.sections().len(), x, y) {
            Some(index) => {
                self.jump_to_section(index);
                true
            }
            None => false,
        }
    }

    /// Send a key to the focused component
    pub fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        match self.focused {
            ComponentId::Page => {
                let handled = self.page.handle_key(key);
                if handled.was_handled() {
                    self.sync_tracker();
                }
                handled
            }
            ComponentId::Logs => self.logs_panel.handle_key(key),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        self.focused = if self.show_logs {
            self.logs_panel.id()
        } else {
            self.page.id()
        };
    }

    /// Switch to the next theme; the page is re-laid out on the next frame
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        tracing::info!(theme = self.theme.name.as_str(), "Theme changed");
        self.show_toast(format!("Theme: {}", self.theme.name));
    }

    /// Copy the contact email to the system clipboard
    pub fn copy_email(&mut self) {
        self.copy_email_with(clipboard::copy_to_clipboard);
    }

    fn copy_email_with(&mut self, copy: impl FnOnce(&str) -> Result<()>) {
        let Some(email) = self.portfolio.contact_email().map(str::to_string) else {
            self.show_toast("No email to copy");
            return;
        };
        match copy(&email) {
            Ok(()) => self.show_toast(format!("✓ Copied {}", email)),
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {:#}", e);
                self.show_toast("✗ Failed to copy");
            }
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }
}
