//! # BadgeKit Core
//!
//! Core types, units, and utilities for BadgeKit.
//! Provides the fixed-DPI unit conversions, badge format presets,
//! engine-wide constants, the error taxonomy, and the notification
//! center used to surface persistence outcomes to the host UI.

pub mod constants;
pub mod error;
pub mod format;
pub mod notifications;
pub mod units;

pub use error::{DocumentError, Error, PersistenceError, Result};
pub use format::{BadgeFormat, FormatPreset};
pub use notifications::{
    notification_center, Notification, NotificationCenter, NotificationLevel, SubscriptionId,
};
pub use units::{format_mm, mm_to_px, mm_to_px_at, px_to_mm, px_to_mm_at, DEFAULT_DPI, MM_PER_INCH};
