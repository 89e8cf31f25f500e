//! Notification center.
//!
//! The engine never talks to the user directly. Outcomes that the user
//! must see (a save that failed, a document that loaded) are published
//! here and rendered by whatever host subscribed.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, OnceLock};
use uuid::Uuid;

use crate::constants::NOTIFICATION_HISTORY;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A user-facing message.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }
}

/// Subscription handle for unsubscribing from notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

type Handler = Box<dyn Fn(&Notification) + Send + Sync>;

/// Publish/subscribe hub for user-facing notifications.
///
/// Cloning shares the same subscribers and history.
#[derive(Clone, Default)]
pub struct NotificationCenter {
    handlers: Arc<RwLock<HashMap<SubscriptionId, Handler>>>,
    history: Arc<RwLock<VecDeque<Notification>>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a notification to every subscriber and records it.
    pub fn publish(&self, notification: Notification) {
        tracing::debug!(level = %notification.level, "{}", notification.message);
        for handler in self.handlers.read().values() {
            handler(&notification);
        }
        let mut history = self.history.write();
        history.push_back(notification);
        while history.len() > NOTIFICATION_HISTORY {
            history.pop_front();
        }
    }

    /// Registers a handler, called synchronously on publish.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.write().insert(id, Box::new(handler));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.handlers.write().remove(&id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Most recent notifications, oldest first.
    pub fn history(&self) -> Vec<Notification> {
        self.history.read().iter().cloned().collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.history.read().back().cloned()
    }

    pub fn clear_history(&self) {
        self.history.write().clear();
    }
}

impl fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("subscribers", &self.subscriber_count())
            .field("history", &self.history.read().len())
            .finish()
    }
}

/// Process-wide notification center.
pub fn notification_center() -> &'static NotificationCenter {
    static CENTER: OnceLock<NotificationCenter> = OnceLock::new();
    CENTER.get_or_init(NotificationCenter::new)
}
