//! Component trait system for the TUI
//!
//! App owns the state and routes input; focusable panels declare their
//! capabilities through these traits instead of App knowing how each one
//! scrolls.
//!
//! ```text
//!                  App (global keys: q, y, l, t, Tab, 1-9, actions)
//!                   │
//!          ┌────────┴────────┐
//!          ▼                 ▼
//!      PagePanel         LogsPanel
//!   Scrollable + Interactive on both
//! ```
//!
//! - [`Component`]: identity
//! - [`Scrollable`]: owns a `ScrollState`
//! - [`Interactive`]: handles keys, returns [`Handled`]

mod component;
mod interactive;
mod scrollable;

pub use component::{Component, ComponentId};
pub use interactive::{Handled, Interactive, ScrollableInteractive};
pub use scrollable::Scrollable;
