//! Notification system for reporting recoverable batch problems.
//!
//! The codec reports skipped inputs and unreadable batch documents through a
//! [`Notifier`]; hosts decide where they end up (log, ntfy.sh push, UI).
mod abstraction;
mod ntfy;

pub use abstraction::{
    CompositeNotifier, LogNotifier, Notification, Notifier, NullNotifier, RecordingNotifier,
    Severity,
};
pub use ntfy::NtfyNotifier;
