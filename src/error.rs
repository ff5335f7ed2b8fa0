//! Configuration errors for the tracker, presenter and content model
//!
//! These are construction-time precondition violations. Nothing at runtime
//! produces them: once a tracker or presenter exists it cannot fail.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FolioError {
    /// A tagline presenter was given nothing to rotate
    #[error("tagline sequence is empty")]
    EmptyTaglines,

    /// The hidden window must fit inside one period
    #[error("settle interval ({settle:?}) must be shorter than the period ({period:?})")]
    SettleNotShorter { settle: Duration, period: Duration },

    /// A tracker needs at least one section to publish
    #[error("no sections registered")]
    NoSections,

    /// Anchors must normalize to a non-empty id
    #[error("section '{0}' has a blank anchor")]
    BlankAnchor(String),

    #[error("duplicate section id: {0}")]
    DuplicateSection(String),

    #[error("invalid visibility threshold {0}: expected a value in 0.0..=1.0")]
    InvalidThreshold(f64),

    #[error("invalid bottom margin {0}: expected a value in 0.0..1.0")]
    InvalidMargin(f64),

    /// An action points at a section that does not exist
    #[error("action '{action}' targets unknown section '{target}'")]
    UnknownTarget { action: String, target: String },
}
