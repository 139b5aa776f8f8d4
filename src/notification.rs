//! Transient toast notifications
//!
//! Every toast carries a generation number. A timer that fires for an older
//! generation must not clear a newer toast, so clearing is always keyed on
//! the generation the timer was started for.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Notifier {
    current: Option<Toast>,
    generation: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message`, replacing any toast still on screen
    pub fn notify(&mut self, message: impl Into<String>) -> Toast {
        self.generation += 1;
        let toast = Toast {
            message: message.into(),
            generation: self.generation,
        };
        log::debug!("toast #{}: {}", toast.generation, toast.message);
        self.current = Some(toast.clone());
        toast
    }

    /// Clear the toast if it is still the one for `generation`
    pub fn expire(&mut self, generation: u64) -> bool {
        match &self.current {
            Some(toast) if toast.generation == generation => {
                self.current = None;
                true
            }
            _ => {
                log::debug!("toast #{} already replaced, ignoring expiry", generation);
                false
            }
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}

/// Start a one-shot timer that reports `generation` on `expired` after `lifetime`
pub fn schedule_expiry(
    expired: mpsc::UnboundedSender<u64>,
    generation: u64,
    lifetime: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(lifetime).await;
        // The receiver is gone once the session ends
        let _ = expired.send(generation);
    })
}
