//! Logging decoration for notification delivery.

use crate::core::{DeliveryError, Notification, Transports};
use tracing::info;

/// Wraps a borrowed notification and logs just before delegating delivery.
///
/// The decorator adds behavior without copying or owning the notification;
/// it borrows for as long as the wrapper lives, and delivery semantics are
/// exactly those of the wrapped value.
#[derive(Debug, Clone, Copy)]
pub struct LoggingDecorator<'a> {
    inner: &'a Notification,
}

impl<'a> LoggingDecorator<'a> {
    pub fn new(inner: &'a Notification) -> Self {
        Self { inner }
    }

    /// The wrapped notification.
    pub fn inner(&self) -> &Notification {
        self.inner
    }

    /// Emits one log record naming the kind and recipient, then delivers
    /// the wrapped notification unchanged.
    pub async fn deliver(&self, transports: &Transports) -> Result<(), DeliveryError> {
        info!(
            kind = self.inner.kind_name(),
            recipient = self.inner.recipient(),
            "delivering notification"
        );
        self.inner.deliver(transports).await
    }
}
