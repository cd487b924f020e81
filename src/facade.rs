//! One-call sending for the common case.

use crate::core::Notification;
use crate::dispatch::DispatchManager;
use crate::factory::{Extras, NotificationFactory};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

/// Front door that hides the construct/add/send choreography.
///
/// Each call builds one notification through the factory, hands it to the
/// dispatch manager, and triggers a batch send. In fan-out mode the add
/// itself delivers and the queue stays empty, so the trailing send is a
/// no-op; a notification is never delivered twice through this path.
pub struct Courier {
    manager: Arc<DispatchManager>,
}

impl Courier {
    pub fn new(manager: Arc<DispatchManager>) -> Self {
        Self { manager }
    }

    /// Builds and sends an email notification in one call.
    pub async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        message: &str,
        sender_address: &str,
    ) -> Result<()> {
        let extras = Extras::new()
            .with("subject", subject)
            .with("sender_address", sender_address);
        let notification = NotificationFactory::create("email", recipient, message, &extras)
            .context("building email notification")?;
        self.dispatch(notification).await
    }

    /// Builds and sends an SMS notification in one call.
    pub async fn send_sms(&self, recipient: &str, message: &str, phone_number: &str) -> Result<()> {
        let extras = Extras::new().with("phone_number", phone_number);
        let notification = NotificationFactory::create("sms", recipient, message, &extras)
            .context("building sms notification")?;
        self.dispatch(notification).await
    }

    /// Builds and sends a push notification in one call.
    pub async fn send_push(&self, recipient: &str, message: &str, device_id: &str) -> Result<()> {
        let extras = Extras::new().with("device_id", device_id);
        let notification = NotificationFactory::create("push", recipient, message, &extras)
            .context("building push notification")?;
        self.dispatch(notification).await
    }

    async fn dispatch(&self, notification: Notification) -> Result<()> {
        debug!(
            kind = notification.kind_name(),
            recipient = notification.recipient(),
            "dispatching via facade"
        );
        self.manager.add(notification).await;
        self.manager
            .send_all()
            .await
            .context("delivering queued notifications")?;
        Ok(())
    }
}
