//! Notification service implementation
//!
//! Transient user-facing messages ("toasts"). The page pushes a notification
//! for every completed or failed action; the front-end drains and shows them.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// How a notification should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A single transient message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    /// Translation key the text was produced from
    pub key: String,
    /// Rendered, translated text
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Bounded queue of pending notifications
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    pending: VecDeque<Notification>,
    capacity: usize,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::with_capacity(32)
    }
}

impl NotificationQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Queue a notification, dropping the oldest one when full
    pub fn push(&mut self, level: NotificationLevel, key: &str, text: String) {
        match level {
            NotificationLevel::Error => warn!(key = key, text = %text, "Error notification"),
            _ => debug!(key = key, text = %text, "Notification"),
        }

        if self.pending.len() == self.capacity {
            self.pending.pop_front();
        }

        self.pending.push_back(Notification {
            level,
            key: key.to_string(),
            text,
            created_at: Utc::now(),
        });
    }

    /// Take every pending notification, oldest first
    pub fn drain(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }

    pub fn pending(&self) -> impl Iterator<Item = &Notification> {
        self.pending.iter()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.pending.back()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
