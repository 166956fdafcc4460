//! Notification collaborator: fire-and-forget user messages.
//!
//! Callers never depend on delivery. `AppState` carries an `Arc<dyn Notifier>`;
//! the default implementation writes through `tracing`.

use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

pub trait Notifier: Send + Sync {
    fn notify(&self, profile: Uuid, notice: Notice);
}

/// Default notifier: records each message in the service log.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, profile: Uuid, notice: Notice) {
        match notice {
            Notice::Success(message) => info!(%profile, "notice: {message}"),
            Notice::Error(message) => warn!(%profile, "notice: {message}"),
        }
    }
}

/// Keeps every notice in memory, in delivery order.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingNotifier {
    notices: std::sync::Mutex<Vec<(Uuid, Notice)>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn notices(&self) -> Vec<(Uuid, Notice)> {
        self.notices
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, profile: Uuid, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push((profile, notice));
        }
    }
}
