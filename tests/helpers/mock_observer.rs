#![allow(dead_code)]
use async_trait::async_trait;
use courier::core::{Notification, Observer};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

/// A mock observer that records every notification it is handed.
#[derive(Clone, Debug)]
pub struct RecordingObserver {
    name: String,
    pub seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingObserver {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn seen(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Observer for RecordingObserver {
    fn name(&self) -> &str {
        &self.name
    }

    async fn update(&self, notification: &Notification) -> anyhow::Result<()> {
        self.seen.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// A mock observer that fails every update but counts the attempts.
#[derive(Debug, Default)]
pub struct FailingObserver {
    pub attempts: AtomicUsize,
}

impl FailingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Observer for FailingObserver {
    fn name(&self) -> &str {
        "failing-observer"
    }

    async fn update(&self, _notification: &Notification) -> anyhow::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(anyhow::anyhow!("observer refused the notification"))
    }
}
