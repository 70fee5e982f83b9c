//! Mock notifier for testing.

use std::sync::{Arc, Mutex};

use crate::notify::{Notification, Notifier};

/// Notifier that records every notification instead of showing it.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications delivered so far, in order.
    pub fn notifications(&self) -> Vec<Notification> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Forget recorded notifications.
    pub fn clear(&self) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.clear();
        }
    }
}

impl Notifier for MockNotifier {
    fn notify(&self, title: &str, body: &str) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(Notification::new(title, body));
        }
    }
}
