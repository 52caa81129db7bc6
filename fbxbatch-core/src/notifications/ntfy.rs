// ============================================================================
// fbxbatch-core/src/notifications/ntfy.rs
// ============================================================================
//
// NTFY IMPLEMENTATION: Notifier Implementation Using ntfy.sh
//
// Pushes batch notifications (skipped inputs, unreadable batch files) to an
// ntfy topic so they reach the user even when the converter runs unattended.
//
// Delivery failures are logged and dropped; a notifier never fails back into
// the codec.

use crate::error::{CoreError, CoreResult};
use crate::notifications::{Notification, Notifier, Severity};

use ntfy::DispatcherBuilder;
use ntfy::payload::{Payload, Priority as NtfyPriority};

// ============================================================================
// NTFY NOTIFIER
// ============================================================================

/// Sends notifications to an ntfy topic.
///
/// # Examples
///
/// ```rust,no_run
/// use fbxbatch_core::notifications::{Notification, Notifier, NtfyNotifier};
///
/// let notifier = NtfyNotifier::new("https://ntfy.sh/your_topic").unwrap();
/// notifier.notify(&Notification::MissingInput {
///     path: "C:/assets/hero.fbx".to_string(),
/// });
/// ```
#[derive(Debug, Clone)]
pub struct NtfyNotifier {
    base_url: String,
    topic: String,
}

impl NtfyNotifier {
    /// Creates a notifier for the full topic URL (e.g. "https://ntfy.sh/your_topic").
    pub fn new(topic_url: &str) -> CoreResult<Self> {
        let after_scheme = topic_url.strip_prefix("https://").ok_or_else(|| {
            CoreError::Notification(format!(
                "Invalid ntfy topic URL '{}': must start with https://",
                topic_url
            ))
        })?;

        let (host, topic) = match after_scheme.split_once('/') {
            Some((host, topic)) => (host, topic.trim_end_matches('/')),
            None => (after_scheme, ""),
        };

        if host.is_empty() {
            return Err(CoreError::Notification(format!(
                "URL '{}' must have a non-empty host",
                topic_url
            )));
        }

        if topic.is_empty() {
            return Err(CoreError::Notification(format!(
                "URL '{}' is missing topic path",
                topic_url
            )));
        }

        Ok(Self {
            base_url: format!("https://{}", host),
            topic: topic.to_string(),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    fn send(&self, notification: &Notification) -> CoreResult<()> {
        let dispatcher = DispatcherBuilder::new(&self.base_url)
            .build_blocking()
            .map_err(|e| {
                CoreError::Notification(format!(
                    "Failed to build ntfy dispatcher for {}: {}",
                    self.base_url, e
                ))
            })?;

        let payload = Payload::new(&self.topic)
            .message(notification.message())
            .title(notification.title())
            .priority(map_priority(notification.severity()))
            .tags(vec!["fbxbatch".to_string(), tag_for(notification).to_string()]);

        dispatcher.send(&payload).map_err(|e| {
            CoreError::Notification(format!(
                "Failed to send ntfy notification to {}/{}: {}",
                self.base_url, self.topic, e
            ))
        })
    }
}

impl Notifier for NtfyNotifier {
    fn notify(&self, notification: &Notification) {
        if let Err(e) = self.send(notification) {
            log::warn!("{}", e);
        }
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn map_priority(severity: Severity) -> NtfyPriority {
    match severity {
        Severity::Info => NtfyPriority::Default,
        Severity::Warning => NtfyPriority::High,
        Severity::Error => NtfyPriority::Max,
    }
}

fn tag_for(notification: &Notification) -> &'static str {
    match notification {
        Notification::MissingInput { .. } => "skipped",
        Notification::UnreadableBatch { .. } => "error",
        Notification::Custom { .. } => "info",
    }
}
