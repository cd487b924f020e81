//! Observers shipped with the crate.

use crate::core::{ChannelKind, Notification, Observer, Transports};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Delivers the notifications bound for one specific channel.
///
/// Each instance owns a single channel tag and ignores everything else,
/// composites included; register one per channel to cover the full set.
/// The filter is a tag comparison on the notification itself, never an
/// inspection of the concrete type behind it.
pub struct ChannelObserver {
    channel: ChannelKind,
    transports: Arc<Transports>,
}

impl ChannelObserver {
    pub fn new(channel: ChannelKind, transports: Arc<Transports>) -> Self {
        Self {
            channel,
            transports,
        }
    }

    /// The channel this observer is responsible for.
    pub fn channel(&self) -> ChannelKind {
        self.channel
    }
}

#[async_trait]
impl Observer for ChannelObserver {
    fn name(&self) -> &str {
        match self.channel {
            ChannelKind::Email => "email-observer",
            ChannelKind::Sms => "sms-observer",
            ChannelKind::Push => "push-observer",
        }
    }

    async fn update(&self, notification: &Notification) -> anyhow::Result<()> {
        if notification.channel() != Some(self.channel) {
            return Ok(());
        }
        debug!(
            observer = self.name(),
            recipient = notification.recipient(),
            "delivering matching notification"
        );
        notification.deliver(&self.transports).await?;
        Ok(())
    }
}

/// Logs every notification that reaches it and delivers nothing.
///
/// Useful while wiring up a deployment, and as a tap on fan-out traffic.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl LoggingObserver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Observer for LoggingObserver {
    fn name(&self) -> &str {
        "logging-observer"
    }

    async fn update(&self, notification: &Notification) -> anyhow::Result<()> {
        info!(
            kind = notification.kind_name(),
            recipient = notification.recipient(),
            "observed notification"
        );
        Ok(())
    }
}
