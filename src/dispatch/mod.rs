//! Notification dispatch.
//!
//! This module holds the dispatch manager, the process-wide component that
//! owns the pending queue and the observer registry, plus the observers
//! shipped with the crate. A deployment constructs one manager at startup
//! and shares it behind an `Arc`; the configured mode decides whether an
//! added notification fans out to observers immediately or waits for an
//! explicit batch send.

pub mod manager;
pub mod observers;

pub use manager::DispatchManager;
pub use observers::{ChannelObserver, LoggingObserver};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// How the manager routes notifications handed to `add`.
///
/// The two modes are mutually exclusive delivery paths. Fan-out never
/// queues, so a notification accepted in fan-out mode cannot be delivered
/// a second time by a later batch send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchMode {
    /// `add` queues the notification; delivery happens when `send_all`
    /// drains the queue.
    Batch,
    /// `add` hands the notification to every registered observer
    /// immediately, in registration order.
    FanOut,
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchMode::Batch => f.write_str("batch"),
            DispatchMode::FanOut => f.write_str("fan-out"),
        }
    }
}

/// Errors raised by observer registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// An unregister call named an observer that is not registered. This
    /// points at a wiring bug in the caller, so it is an error rather
    /// than a no-op.
    #[error("observer not registered: {0}")]
    ObserverNotFound(String),
}
