// ============================================================================
// fbxbatch-core/src/notifications/abstraction.rs
// ============================================================================
//
// NOTIFICATION ABSTRACTION: Notification System Abstractions
//
// This module provides the abstractions the codec uses to report recoverable
// problems (missing input files, unreadable batch documents) to whatever
// surface the host provides: a log, a push service, a dialog.
//
// KEY COMPONENTS:
// - Severity: Info / Warning / Error
// - Notification: Enum of the problems the core reports
// - Notifier: Trait for delivering notifications (fire-and-forget)
// - NullNotifier, LogNotifier, RecordingNotifier, CompositeNotifier

use std::sync::Mutex;

// ============================================================================
// NOTIFICATION TYPES
// ============================================================================

/// How serious a notification is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Represents the different notifications the core can emit.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A batch entry was skipped while encoding because its input file is gone
    MissingInput {
        /// Path of the skipped input file
        path: String,
    },

    /// A batch document could not be read; the host starts from an empty batch
    UnreadableBatch {
        /// Description of the structural problem
        reason: String,
    },

    /// A free-form message from the host
    Custom {
        title: String,
        message: String,
        severity: Severity,
    },
}

impl Notification {
    /// Gets the title for this notification.
    pub fn title(&self) -> String {
        match self {
            Notification::MissingInput { .. } => "Input File Missing".to_string(),
            Notification::UnreadableBatch { .. } => "Batch File Unreadable".to_string(),
            Notification::Custom { title, .. } => title.clone(),
        }
    }

    /// Gets the message body for this notification.
    pub fn message(&self) -> String {
        match self {
            Notification::MissingInput { path } => {
                format!("Unable to find file {}. This file will be skipped.", path)
            }
            Notification::UnreadableBatch { reason } => {
                format!("Unable to read batch file ({}), starting with a clean slate...", reason)
            }
            Notification::Custom { message, .. } => message.clone(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Notification::MissingInput { .. } => Severity::Warning,
            Notification::UnreadableBatch { .. } => Severity::Error,
            Notification::Custom { severity, .. } => *severity,
        }
    }
}

// ============================================================================
// NOTIFIER
// ============================================================================

/// Trait for delivering notifications.
///
/// Delivery is fire-and-forget: implementations must not panic and must deal
/// with their own failures (typically by logging them), because the codec has
/// no way to react to a notification that did not arrive.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notification: &Notification) {
        (**self).notify(notification)
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, notification: &Notification) {
        (**self).notify(notification)
    }
}

/// No-op implementation of Notifier that does nothing.
#[derive(Debug, Clone, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notification: &Notification) {}
}

/// Routes notifications to the `log` facade at the matching level.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        let level = match notification.severity() {
            Severity::Info => log::Level::Info,
            Severity::Warning => log::Level::Warn,
            Severity::Error => log::Level::Error,
        };
        log::log!(level, "{}: {}", notification.title(), notification.message());
    }
}

/// Keeps every notification so the host can present them after a call.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        match self.received.lock() {
            Ok(received) => received.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.notifications().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        match self.received.lock() {
            Ok(mut received) => received.push(notification.clone()),
            Err(poisoned) => poisoned.into_inner().push(notification.clone()),
        }
    }
}

/// Forwards each notification to every inner notifier, in order.
#[derive(Default)]
pub struct CompositeNotifier {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl CompositeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifiers.push(Box::new(notifier));
        self
    }

    pub fn push(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }
}

impl Notifier for CompositeNotifier {
    fn notify(&self, notification: &Notification) {
        for notifier in &self.notifiers {
            notifier.notify(notification);
        }
    }
}
