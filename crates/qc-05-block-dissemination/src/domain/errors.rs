//! # Domain Errors
//!
//! Error types for the Block Dissemination subsystem.

use thiserror::Error;

/// Block dissemination errors.
///
/// Every error is local to one dissemination call. None of them is retried
/// internally and none leaves state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisseminationError {
    /// Co-signature bitmap and sender committee disagree in length.
    #[error("B2 size and committee size are not identical: bitmap {bitmap}, committee {committee}")]
    SizeMismatch {
        /// Bitmap length
        bitmap: usize,
        /// Committee length
        committee: usize,
    },

    /// Message composer missing or unable to compose.
    #[error("Cannot compose message: {0}")]
    ComposeFailed(String),

    /// Filtered committee not larger than the lookup window.
    #[error("Committee too small for lookup window: committee {committee}, window {window}")]
    CommitteeTooSmall {
        /// Filtered committee size
        committee: usize,
        /// Configured lookup window size
        window: usize,
    },

    /// Filtered committee cannot be indexed with a u16.
    #[error("Committee too large: {size} members")]
    CommitteeTooLarge {
        /// Filtered committee size
        size: usize,
    },

    /// Configuration rejected.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}
