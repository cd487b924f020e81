//! The dispatch manager owns the pending queue and the observer registry,
//! and drives both delivery paths.

use crate::core::{DeliveryError, Notification, Observer, Transports};
use crate::dispatch::{DispatchError, DispatchMode};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

/// Process-wide dispatch state.
///
/// Construct one per deployment and share it behind an `Arc`; every handle
/// sees the same queue and the same observer list. The queue and registry
/// sit behind separate mutexes since handles may live on different tasks.
/// Guards are never held across an await: both delivery paths take what
/// they need under the lock and deliver after releasing it.
pub struct DispatchManager {
    mode: DispatchMode,
    transports: Arc<Transports>,
    pending: Mutex<Vec<Notification>>,
    observers: Mutex<Vec<Arc<dyn Observer>>>,
}

impl DispatchManager {
    /// Creates a manager operating in `mode`, delivering batches through
    /// `transports`.
    pub fn new(mode: DispatchMode, transports: Arc<Transports>) -> Self {
        Self {
            mode,
            transports,
            pending: Mutex::new(Vec::new()),
            observers: Mutex::new(Vec::new()),
        }
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Number of notifications waiting for the next batch send.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.lock().unwrap().len()
    }

    /// Registers an observer at the end of the update order.
    ///
    /// Registration order is delivery order during fan-out. The same
    /// instance can be registered twice and will then be updated twice.
    pub fn register_observer(&self, observer: Arc<dyn Observer>) {
        debug!(observer = observer.name(), "registering observer");
        self.observers.lock().unwrap().push(observer);
    }

    /// Removes a previously registered observer.
    ///
    /// Matching is by instance identity, not by name or value: pass a
    /// clone of the `Arc` that was registered. If the instance was
    /// registered more than once, one registration is removed per call.
    pub fn unregister_observer(&self, observer: &Arc<dyn Observer>) -> Result<(), DispatchError> {
        let mut observers = self.observers.lock().unwrap();
        match observers.iter().position(|o| Arc::ptr_eq(o, observer)) {
            Some(index) => {
                observers.remove(index);
                debug!(observer = observer.name(), "unregistered observer");
                Ok(())
            }
            None => Err(DispatchError::ObserverNotFound(observer.name().to_string())),
        }
    }

    /// Accepts one notification for dispatch.
    ///
    /// In batch mode the notification is queued and nothing is delivered
    /// yet. In fan-out mode it is handed to every registered observer
    /// exactly once and never queued; an observer that fails is logged and
    /// the fan-out continues with the rest.
    pub async fn add(&self, notification: Notification) {
        match self.mode {
            DispatchMode::Batch => {
                debug!(
                    kind = notification.kind_name(),
                    recipient = notification.recipient(),
                    "queueing notification"
                );
                self.pending.lock().unwrap().push(notification);
                metrics::counter!("notifications_queued").increment(1);
            }
            DispatchMode::FanOut => {
                self.notify_observers(&notification).await;
            }
        }
    }

    async fn notify_observers(&self, notification: &Notification) {
        // Snapshot under the lock, update after releasing it.
        let observers: Vec<Arc<dyn Observer>> = self.observers.lock().unwrap().clone();
        debug!(
            kind = notification.kind_name(),
            recipient = notification.recipient(),
            observers = observers.len(),
            "fanning out notification"
        );
        for observer in observers {
            if let Err(e) = observer.update(notification).await {
                error!(
                    observer = observer.name(),
                    error = %e,
                    "observer failed to handle notification"
                );
                metrics::counter!("observer_update_failures").increment(1);
            }
        }
        metrics::counter!("notifications_fanned_out").increment(1);
    }

    /// Delivers every pending notification in insertion order and leaves
    /// the queue empty.
    ///
    /// A failed delivery does not stop the rest of the batch; failures are
    /// collected into [`DeliveryError::Partial`]. The queue is cleared even
    /// when some deliveries fail, so an undeliverable notification is
    /// dropped rather than retried on every later call. An empty queue is
    /// a no-op returning `Ok(0)`.
    ///
    /// # Returns
    /// The number of notifications delivered.
    pub async fn send_all(&self) -> Result<usize, DeliveryError> {
        let batch: Vec<Notification> = {
            let mut pending = self.pending.lock().unwrap();
            pending.drain(..).collect()
        };
        if batch.is_empty() {
            debug!("send_all called with an empty queue");
            return Ok(0);
        }

        let attempted = batch.len();
        info!(count = attempted, "delivering pending notifications");
        let mut failures = Vec::new();
        for notification in &batch {
            if let Err(e) = notification.deliver(&self.transports).await {
                error!(
                    kind = notification.kind_name(),
                    recipient = notification.recipient(),
                    error = %e,
                    "delivery failed"
                );
                failures.push(e);
            }
        }

        if failures.is_empty() {
            Ok(attempted)
        } else {
            Err(DeliveryError::Partial {
                attempted,
                failures,
            })
        }
    }
}
