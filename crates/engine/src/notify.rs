//! User-facing failure notifications.
//!
//! The dashboard shows a toast whenever the record store refuses a list or a
//! write. The engine reports those through a [`Notifier`]; the presentation
//! layer decides how to surface them.

use std::{collections::VecDeque, sync::Mutex};

pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Default notifier: forwards to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(target: "notify", "{message}");
    }
}

/// Capacity of [`RecordingNotifier::new`].
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 100;

/// Logs like [`LogNotifier`] and keeps the latest notifications in memory,
/// newest last, until a reader takes them. Past `capacity` the oldest one is
/// dropped.
#[derive(Debug)]
pub struct RecordingNotifier {
    messages: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_NOTIFICATION_CAPACITY)
    }
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of 0 keeps nothing and only logs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: Mutex::new(VecDeque::new()),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Drains pending notifications.
    pub fn take(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|mut messages| messages.drain(..).collect())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        LogNotifier.error(message);
        if self.capacity == 0 {
            return;
        }
        if let Ok(mut messages) = self.messages.lock() {
            while messages.len() >= self.capacity {
                messages.pop_front();
            }
            messages.push_back(message.to_string());
        }
    }
}
