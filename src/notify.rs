//! Snackbar notifications.
//!
//! Page-scoped broadcaster for transient status messages. At most one
//! message is visible at a time: showing a new one replaces the current
//! message and restarts the auto-dismiss timer. Consumers subscribe
//! explicitly; the shell that builds the page owns the [`Snackbar`] and
//! hands it to whoever needs to raise messages.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::{sync::watch, time::sleep};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(5000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnackbarMessage {
    pub text: String,
    pub severity: Severity,
    pub duration: Duration,
}

impl SnackbarMessage {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
            duration: DEFAULT_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

#[derive(Clone)]
pub struct Snackbar {
    // Incremented on every show/dismiss; an expired timer may only hide the
    // message it was armed for, never a successor.
    generation: Arc<Mutex<u64>>,
    tx: watch::Sender<Option<SnackbarMessage>>,
}

impl Snackbar {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            generation: Arc::new(Mutex::new(0)),
            tx,
        }
    }

    /// Subscribes to visibility changes. The receiver yields the currently
    /// visible message, or `None` while hidden.
    pub fn subscribe(&self) -> watch::Receiver<Option<SnackbarMessage>> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> Option<SnackbarMessage> {
        self.tx.borrow().clone()
    }

    /// Shows a message, replacing any visible one and restarting the
    /// auto-dismiss timer.
    pub fn show(&self, message: SnackbarMessage) {
        let duration = message.duration;
        let generation = {
            let mut current = self.generation.lock().expect("snackbar state poisoned");
            *current += 1;
            self.tx.send_replace(Some(message));
            *current
        };

        let snackbar = self.clone();
        tokio::spawn(async move {
            sleep(duration).await;
            snackbar.hide_if_current(generation);
        });
    }

    /// Hides the current message immediately. The pending timer becomes a
    /// no-op through the generation check.
    pub fn dismiss(&self) {
        let mut current = self.generation.lock().expect("snackbar state poisoned");
        *current += 1;
        self.tx.send_replace(None);
    }

    fn hide_if_current(&self, generation: u64) {
        let current = self.generation.lock().expect("snackbar state poisoned");
        if *current == generation {
            self.tx.send_replace(None);
        }
    }
}

impl Default for Snackbar {
    fn default() -> Self {
        Self::new()
    }
}
