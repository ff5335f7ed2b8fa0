//! Rotating tagline presenter
//!
//! Cycles through a fixed list of short strings. Every `period` the current
//! tagline fades out; `settle` later the cursor advances and it fades back in:
//!
//! ```text
//!   Visible ──period──▶ Hidden ──settle──▶ Visible (cursor + 1)
//! ```
//!
//! The outer period timer re-arms itself on every firing, the inner settle
//! timer is armed once per transition. Both belong to the presenter and are
//! cancelled together by [`TaglinePresenter::stop`].

pub mod timer;

pub use timer::{Fired, ManualTimer, Timer, TimerId, TimerKind, TokioTimer};

use crate::error::FolioError;
use std::time::Duration;

/// Period and settle interval of one presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaglineTiming {
    period: Duration,
    settle: Duration,
}

impl TaglineTiming {
    /// The settle interval must be strictly shorter than the period so
    /// transitions never overlap
    pub fn new(period: Duration, settle: Duration) -> Result<Self, FolioError> {
        if settle >= period {
            return Err(FolioError::SettleNotShorter { settle, period });
        }
        Ok(Self { period, settle })
    }

    pub fn from_millis(period_ms: u64, settle_ms: u64) -> Result<Self, FolioError> {
        Self::new(
            Duration::from_millis(period_ms),
            Duration::from_millis(settle_ms),
        )
    }
}

impl Default for TaglineTiming {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(2500),
            settle: Duration::from_millis(300),
        }
    }
}

/// Opacity of the tagline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fade {
    #[default]
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Running,
    Stopped,
}

/// One independently timed tagline rotation
#[derive(Debug)]
pub struct TaglinePresenter {
    sequence: Vec<String>,
    timing: TaglineTiming,
    cursor: usize,
    fade: Fade,
    period_timer: Option<TimerId>,
    settle_timer: Option<TimerId>,
    lifecycle: Lifecycle,
}

impl TaglinePresenter {
    /// Starts at index 0, visible. An empty sequence is a configuration error.
    pub fn new(sequence: Vec<String>, timing: TaglineTiming) -> Result<Self, FolioError> {
        if sequence.is_empty() {
            return Err(FolioError::EmptyTaglines);
        }
        Ok(Self {
            sequence,
            timing,
            cursor: 0,
            fade: Fade::Visible,
            period_timer: None,
            settle_timer: None,
            lifecycle: Lifecycle::Idle,
        })
    }

    /// Arm the period timer. Calling it again, or after `stop`, does nothing.
    pub fn start(&mut self, timer: &mut impl Timer) {
        if self.lifecycle != Lifecycle::Idle {
            return;
        }
        self.lifecycle = Lifecycle::Running;
        self.period_timer = Some(timer.schedule(self.timing.period, TimerKind::Period));
    }

    /// React to a fired timer. Returns true if the visible state changed.
    ///
    /// Notifications for ids this presenter no longer tracks (cancelled,
    /// superseded, or arriving after `stop`) are dropped.
    pub fn on_timer(&mut self, fired: Fired, timer: &mut impl Timer) -> bool {
        if self.lifecycle != Lifecycle::Running {
            return false;
        }

        match fired.kind {
            TimerKind::Period if self.period_timer == Some(fired.id) => {
                self.fade = Fade::Hidden;
                if let Some(stale) = self.settle_timer.take() {
                    timer.cancel(stale);
                }
                // Both measured from this cycle's deadline, not from when it was handled
                self.settle_timer =
                    Some(timer.schedule_after(&fired, self.timing.settle, TimerKind::Settle));
                self.period_timer =
                    Some(timer.schedule_after(&fired, self.timing.period, TimerKind::Period));
                tracing::trace!("Tagline fade out at index {}", self.cursor);
                true
            }
            TimerKind::Settle if self.settle_timer == Some(fired.id) => {
                self.settle_timer = None;
                self.cursor = (self.cursor + 1) % self.sequence.len();
                self.fade = Fade::Visible;
                tracing::trace!("Tagline now '{}'", self.current());
                true
            }
            _ => false,
        }
    }

    /// Cancel both timers. Idempotent; the presenter stays frozen afterwards.
    pub fn stop(&mut self, timer: &mut impl Timer) {
        if let Some(id) = self.period_timer.take() {
            timer.cancel(id);
        }
        if let Some(id) = self.settle_timer.take() {
            timer.cancel(id);
        }
        self.lifecycle = Lifecycle::Stopped;
    }

    pub fn current(&self) -> &str {
        &self.sequence[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn fade(&self) -> Fade {
        self.fade
    }

    pub fn is_visible(&self) -> bool {
        self.fade == Fade::Visible
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }
}

/// Drive `presenter` on a manual timer up to virtual time `until`
#[cfg(test)]
pub fn run_until(presenter: &mut TaglinePresenter, timer: &mut ManualTimer, until: Duration) {
    while let Some(fired) = timer.pop_due(until) {
        presenter.on_timer(fired, timer);
    }
}
