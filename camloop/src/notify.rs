//! Notification permission helper
//!
//! Wraps a platform notification service behind a provider trait: checks the
//! current permission, prompts when undecided, and shows the notification
//! once granted. Platforms without a notification service report
//! [`NotifyError::Unsupported`].

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors from the notification flow
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Platform has no notification service
    #[error("notifications are not supported on this platform")]
    Unsupported,

    /// User denied the permission prompt
    #[error("notifications blocked by the user")]
    Blocked,

    /// The permission request itself failed
    #[error("permission request failed: {reason}")]
    RequestFailed {
        /// Failure reason
        reason: String,
    },
}

/// Notification permission states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPermission {
    /// Permission granted, notifications can be shown
    Granted,
    /// Permission denied, prompting again is pointless
    Denied,
    /// Not yet decided, a prompt is required
    Prompt,
}

/// A user-visible notification
#[derive(Debug, Clone)]
pub struct Notification {
    /// Title line
    pub title: String,
    /// Body text
    pub body: String,
    /// Optional icon URL
    pub icon: Option<String>,
}

impl Notification {
    /// Create a notification with a title and body
    pub fn new(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            icon: None,
        }
    }

    /// Attach an icon URL
    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }
}

/// Platform notification service
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Whether the platform exposes a notification service at all
    fn is_supported(&self) -> bool;

    /// Current permission state
    fn permission(&self) -> NotificationPermission;

    /// Prompt the user for permission
    async fn request_permission(&self) -> Result<NotificationPermission, NotifyError>;

    /// Display a notification; only meaningful once permission is granted
    fn show(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Show a notification, prompting for permission when undecided
///
/// Already-denied permission is reported without prompting again. All
/// failures are logged here; callers may ignore the returned error.
pub async fn notify_user(
    provider: &dyn NotificationProvider,
    notification: &Notification,
) -> Result<(), NotifyError> {
    if !provider.is_supported() {
        debug!("notification service not present");
        return Err(NotifyError::Unsupported);
    }
    match provider.permission() {
        NotificationPermission::Granted => provider.show(notification),
        NotificationPermission::Denied => {
            info!("notifications blocked by the user");
            Err(NotifyError::Blocked)
        }
        NotificationPermission::Prompt => match provider.request_permission().await {
            Ok(NotificationPermission::Granted) => provider.show(notification),
            Ok(_) => {
                info!("user declined the notification prompt");
                Err(NotifyError::Blocked)
            }
            Err(err) => {
                warn!(error = %err, "notification permission request failed");
                Err(err)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockNotifications {
        supported: bool,
        permission: Mutex<NotificationPermission>,
        prompt_answer: NotificationPermission,
        prompts: AtomicUsize,
        shown: Mutex<Vec<Notification>>,
    }

    impl MockNotifications {
        fn new(permission: NotificationPermission) -> Self {
            Self {
                supported: true,
                permission: Mutex::new(permission),
                prompt_answer: NotificationPermission::Granted,
                prompts: AtomicUsize::new(0),
                shown: Mutex::new(Vec::new()),
            }
        }

        fn unsupported() -> Self {
            Self {
                supported: false,
                ..Self::new(NotificationPermission::Prompt)
            }
        }

        fn answering(mut self, answer: NotificationPermission) -> Self {
            self.prompt_answer = answer;
            self
        }
    }

    #[async_trait]
    impl NotificationProvider for MockNotifications {
        fn is_supported(&self) -> bool {
            self.supported
        }

        fn permission(&self) -> NotificationPermission {
            *self.permission.lock()
        }

        async fn request_permission(&self) -> Result<NotificationPermission, NotifyError> {
            self.prompts.fetch_add(1, Ordering::SeqCst);
            *self.permission.lock() = self.prompt_answer;
            Ok(self.prompt_answer)
        }

        fn show(&self, notification: &Notification) -> Result<(), NotifyError> {
            self.shown.lock().push(notification.clone());
            Ok(())
        }
    }

    fn sample() -> Notification {
        Notification::new("Hi there!", "How are you doing?").icon("https://example.com/icon.png")
    }

    #[tokio::test]
    async fn test_unsupported_platform() {
        let provider = MockNotifications::unsupported();
        let err = notify_user(&provider, &sample()).await.unwrap_err();
        assert!(matches!(err, NotifyError::Unsupported));
        assert!(provider.shown.lock().is_empty());
    }

    #[tokio::test]
    async fn test_granted_shows_without_prompting() {
        let provider = MockNotifications::new(NotificationPermission::Granted);
        notify_user(&provider, &sample()).await.unwrap();
        assert_eq!(provider.shown.lock().len(), 1);
        assert_eq!(provider.prompts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_prompt_then_grant_shows_once() {
        let provider = MockNotifications::new(NotificationPermission::Prompt);
        notify_user(&provider, &sample()).await.unwrap();
        assert_eq!(provider.prompts.load(Ordering::SeqCst), 1);
        assert_eq!(provider.shown.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_prompt_then_deny_is_blocked() {
        let provider =
            MockNotifications::new(NotificationPermission::Prompt).answering(NotificationPermission::Denied);
        let err = notify_user(&provider, &sample()).await.unwrap_err();
        assert!(matches!(err, NotifyError::Blocked));
        assert!(provider.shown.lock().is_empty());
    }

    #[tokio::test]
    async fn test_denied_never_prompts_again() {
        let provider = MockNotifications::new(NotificationPermission::Denied);
        let err = notify_user(&provider, &sample()).await.unwrap_err();
        assert!(matches!(err, NotifyError::Blocked));
        assert_eq!(provider.prompts.load(Ordering::SeqCst), 0);
    }
}
