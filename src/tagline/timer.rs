//! Timer capability for the tagline presenter
//!
//! A presenter never sleeps. It asks a [`Timer`] to deliver a [`Fired`]
//! notification after a delay and reacts when the host hands that
//! notification back. Two implementations:
//!
//! - [`TokioTimer`]: each timer is a tokio task that sleeps, then sends the
//!   notification over an mpsc channel into the UI event loop
//! - [`ManualTimer`]: a virtual clock for deterministic replay (tests and the
//!   `taglines` CLI preview)

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Handle returned by [`Timer::schedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Which of the presenter's two timers fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Outer timer: start of a transition
    Period,
    /// Inner timer: end of the hidden window
    Settle,
}

/// Notification delivered when a scheduled timer elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    pub kind: TimerKind,
    /// Deadline the timer was set for, on the timer's own clock
    pub due: Duration,
}

/// Capability: schedule a notification after a delay; cancelable
pub trait Timer {
    fn schedule(&mut self, delay: Duration, kind: TimerKind) -> TimerId;

    /// Schedule `delay` after the deadline of `fired` rather than after now
    fn schedule_after(&mut self, fired: &Fired, delay: Duration, kind: TimerKind) -> TimerId;

    /// Cancel a pending timer. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tokio-backed timer
// ─────────────────────────────────────────────────────────────────────────────

/// Timer backed by tokio tasks
///
/// `tag` identifies the owner when several timers share one channel. Dropping
/// the timer aborts every task it still tracks.
pub struct TokioTimer<T> {
    tag: T,
    tx: mpsc::Sender<(T, Fired)>,
    /// Zero point for `Fired::due`
    epoch: Instant,
    next_id: u64,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl<T: Copy + Send + 'static> TokioTimer<T> {
    pub fn new(tag: T, tx: mpsc::Sender<(T, Fired)>) -> Self {
        Self {
            tag,
            tx,
            epoch: Instant::now(),
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    /// Forget a timer whose notification has been received
    pub fn reap(&mut self, id: TimerId) {
        self.tasks.remove(&id);
    }

    fn schedule_at(&mut self, deadline: Instant, kind: TimerKind) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let tx = self.tx.clone();
        let tag = self.tag;
        let due = deadline.saturating_duration_since(self.epoch);
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // Receiver gone means the UI is shutting down
            let _ = tx.send((tag, Fired { id, kind, due })).await;
        });

        self.tasks.insert(id, task);
        id
    }

    /// Number of timers not yet reaped or cancelled
    #[cfg(test)]
    pub fn outstanding(&self) -> usize {
        self.tasks.len()
    }
}

impl<T> TokioTimer<T> {
    /// Abort every outstanding timer
    pub fn cancel_all(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

impl<T: Copy + Send + 'static> Timer for TokioTimer<T> {
    fn schedule(&mut self, delay: Duration, kind: TimerKind) -> TimerId {
        self.schedule_at(Instant::now() + delay, kind)
    }

    fn schedule_after(&mut self, fired: &Fired, delay: Duration, kind: TimerKind) -> TimerId {
        self.schedule_at(self.epoch + fired.due + delay, kind)
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
        }
    }
}

impl<T> Drop for TokioTimer<T> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Virtual-clock timer
// ─────────────────────────────────────────────────────────────────────────────

/// Deterministic timer over a virtual clock starting at zero
///
/// Nothing fires by itself: the caller pulls due notifications with
/// [`pop_due`](Self::pop_due) and feeds them to whoever scheduled them.
#[derive(Debug, Default)]
pub struct ManualTimer {
    now: Duration,
    next_id: u64,
    /// Keyed by (deadline, id) so ties fire in scheduling order
    pending: BTreeMap<(Duration, TimerId), TimerKind>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Pop the earliest timer due at or before `until`, advancing the clock to it
    ///
    /// Returns None (and moves the clock to `until`) when nothing is due.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired> {
        match self.pending.keys().next().copied() {
            Some((deadline, id)) if deadline <= until => {
                let kind = self.pending.remove(&(deadline, id))?;
                self.now = self.now.max(deadline);
                Some(Fired {
                    id,
                    kind,
                    due: deadline,
                })
            }
            _ => {
                self.now = self.now.max(until);
                None
            }
        }
    }

    fn schedule_at(&mut self, deadline: Duration, kind: TimerKind) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert((deadline, id), kind);
        id
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Timer for ManualTimer {
    fn schedule(&mut self, delay: Duration, kind: TimerKind) -> TimerId {
        let deadline = self.now + delay;
        self.schedule_at(deadline, kind)
    }

    fn schedule_after(&mut self, fired: &Fired, delay: Duration, kind: TimerKind) -> TimerId {
        self.schedule_at((fired.due + delay).max(self.now), kind)
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|&(_, pending_id), _| pending_id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_manual_timer_fires_in_deadline_order() {
        let mut timer = ManualTimer::new();
        let late = timer.schedule(ms(500), TimerKind::Period);
        let early = timer.schedule(ms(300), TimerKind::Settle);

        assert_eq!(
            timer.pop_due(ms(1000)),
            Some(Fired {
                id: early,
                kind: TimerKind::Settle,
                due: ms(300),
            })
        );
        assert_eq!(timer.now(), ms(300));
        assert_eq!(
            timer.pop_due(ms(1000)),
            Some(Fired {
                id: late,
                kind: TimerKind::Period,
                due: ms(500),
            })
        );
        assert_eq!(timer.pop_due(ms(1000)), None);
        assert_eq!(timer.now(), ms(1000));
    }

    #[test]
    fn test_manual_timer_respects_until() {
        let mut timer = ManualTimer::new();
        timer.schedule(ms(500), TimerKind::Period);

        assert_eq!(timer.pop_due(ms(499)), None);
        assert_eq!(timer.now(), ms(499));
        assert!(timer.pop_due(ms(500)).is_some());
    }

    #[test]
    fn test_manual_timer_ties_fire_in_schedule_order() {
        let mut timer = ManualTimer::new();
        let first = timer.schedule(ms(100), TimerKind::Settle);
        let second = timer.schedule(ms(100), TimerKind::Period);

        assert_eq!(timer.pop_due(ms(100)).map(|f| f.id), Some(first));
        assert_eq!(timer.pop_due(ms(100)).map(|f| f.id), Some(second));
    }

    #[test]
    fn test_manual_timer_cancel_is_idempotent() {
        let mut timer = ManualTimer::new();
        let id = timer.schedule(ms(100), TimerKind::Period);
        timer.cancel(id);
        timer.cancel(id);

        assert_eq!(timer.pending(), 0);
        assert_eq!(timer.pop_due(ms(1000)), None);
    }

    #[tokio::test]
    async fn test_tokio_timer_delivers_tagged_notification() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timer = TokioTimer::new(7u8, tx);
        let id = timer.schedule(ms(5), TimerKind::Settle);

        let (tag, fired) = tokio::time::timeout(ms(1000), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(tag, 7);
        assert_eq!(fired.id, id);
        assert_eq!(fired.kind, TimerKind::Settle);
        assert!(fired.due >= ms(5));

        timer.reap(id);
        assert_eq!(timer.outstanding(), 0);
    }

    #[tokio::test]
    async fn test_tokio_timer_cancel_prevents_delivery() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timer = TokioTimer::new((), tx);
        let id = timer.schedule(ms(20), TimerKind::Period);
        timer.cancel(id);
        timer.cancel(id);

        let received = tokio::time::timeout(ms(100), rx.recv()).await;
        assert!(received.is_err(), "cancelled timer must not fire");
    }

    #[tokio::test]
    async fn test_tokio_timer_drop_aborts_tasks() {
        let (tx, mut rx) = mpsc::channel(8);
        {
            let mut timer = TokioTimer::new((), tx);
            timer.schedule(ms(20), TimerKind::Period);
            timer.schedule(ms(25), TimerKind::Settle);
        }

        // Every sender was owned by an aborted task or the dropped timer
        let received = tokio::time::timeout(ms(200), rx.recv()).await.unwrap();
        assert_eq!(received, None);
    }

    #[test]
    fn test_manual_timer_schedule_after_uses_previous_deadline() {
        let mut timer = ManualTimer::new();
        timer.schedule(ms(100), TimerKind::Period);
        let fired = timer.pop_due(ms(100)).unwrap();

        // Handled 30ms late
        assert_eq!(timer.pop_due(ms(130)), None);
        timer.schedule_after(&fired, ms(100), TimerKind::Period);
        assert_eq!(timer.pop_due(ms(199)), None);
        assert_eq!(timer.pop_due(ms(200)).map(|f| f.due), Some(ms(200)));
    }

    #[tokio::test]
    async fn test_tokio_timer_schedule_after_keeps_grid() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timer = TokioTimer::new((), tx);
        timer.schedule(ms(10), TimerKind::Period);
        let (_, first) = rx.recv().await.unwrap();

        tokio::time::sleep(ms(15)).await;
        timer.schedule_after(&first, ms(30), TimerKind::Period);
        let (_, second) = tokio::time::timeout(ms(1000), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.due, first.due + ms(30));
    }
}
