//! Notifications
//!
//! Fire-and-forget toast seam. The cart session does not depend on delivery
//! or dismissal; implementations decide where messages end up.

use mockall::automock;
use tracing::{info, warn};

/// A fire-and-forget toast/alert sink.
#[automock]
pub trait Notifier: Send + Sync {
    /// Reports a successful operation to the user.
    fn success(&self, message: &str);

    /// Reports a user-visible rejection.
    fn error(&self, message: &str);
}

/// Routes notifications to the tracing subscriber.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!(target: "theka::notify", "{message}");
    }

    fn error(&self, message: &str) {
        warn!(target: "theka::notify", "{message}");
    }
}
