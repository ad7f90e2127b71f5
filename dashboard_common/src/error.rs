//! Error types shared across the dashboard workspace.
//!
//! The `DashboardError` enum unifies the user-facing failure taxonomy
//! (invalid identity, empty selection, duplicate subscription) with the
//! plumbing failures for serialization, channels, and locks, allowing all
//! crates to propagate a single error type.
use std::sync::PoisonError;

use thiserror::Error;

use crate::tickers::Ticker;

/// Unified error type shared by the hub and tab crates.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The identity string does not have a valid `text@text.text` shape.
    #[error("Invalid identity: {0:?} is not a valid email address")]
    InvalidIdentity(String),

    /// Subscribe was attempted without selecting a ticker.
    #[error("No ticker selected")]
    NoSelection,

    /// The identity is already subscribed to this ticker.
    #[error("Already subscribed to {0}")]
    AlreadySubscribed(Ticker),

    /// An operation that requires a signed-in identity ran without one.
    #[error("No active session")]
    NoSession,

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for DashboardError {
    fn from(err: PoisonError<T>) -> Self {
        DashboardError::MutexLock(err.to_string())
    }
}

impl DashboardError {
    /// Whether this error is part of the user-facing taxonomy, i.e. should be
    /// shown as a blocking alert rather than logged as an internal failure.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            DashboardError::InvalidIdentity(_)
                | DashboardError::NoSelection
                | DashboardError::AlreadySubscribed(_)
        )
    }
}
