//! User notifications for new seasons.

mod console;

pub use console::ConsoleNotifier;

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::store::SeasonDelta;

pub const NEW_SEASON_TITLE: &str = "New Season Alert!";
pub const OVERVIEW_TITLE: &str = "Overview";

/// A single delivered notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Something that can show a titled message to the user.
///
/// Delivery is fire-and-forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

/// Build the notifications for an update pass: one per delta, then a summary.
pub fn update_notifications(deltas: &[SeasonDelta]) -> Vec<Notification> {
    if deltas.is_empty() {
        return vec![Notification::new(OVERVIEW_TITLE, "No updates.")];
    }

    let mut notifications: Vec<Notification> = deltas
        .iter()
        .map(|delta| {
            Notification::new(
                NEW_SEASON_TITLE,
                format!("The show {} has a new season!", delta.name),
            )
        })
        .collect();

    notifications.push(Notification::new(
        OVERVIEW_TITLE,
        format!("{} updates.", deltas.len()),
    ));

    notifications
}

/// Deliver the notifications for `deltas`, pausing `interval` between them.
pub async fn notify_updates(notifier: &dyn Notifier, deltas: &[SeasonDelta], interval: Duration) {
    let notifications = update_notifications(deltas);
    let last = notifications.len().saturating_sub(1);

    for (i, notification) in notifications.iter().enumerate() {
        debug!("Notifying: {}: {}", notification.title, notification.body);
        notifier.notify(&notification.title, &notification.body);

        if i < last && !interval.is_zero() {
            tokio::time::sleep(interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockNotifier;

    #[test]
    fn test_no_deltas_yields_single_overview() {
        let notifications = update_notifications(&[]);
        assert_eq!(
            notifications,
            vec![Notification::new("Overview", "No updates.")]
        );
    }

    #[test]
    fn test_one_notification_per_delta_plus_summary() {
        let deltas = vec![
            SeasonDelta::new("Foo", 3, 101),
            SeasonDelta::new("Bar", 6, 202),
        ];

        let notifications = update_notifications(&deltas);
        assert_eq!(notifications.len(), 3);
        assert_eq!(notifications[0].title, "New Season Alert!");
        assert_eq!(notifications[0].body, "The show Foo has a new season!");
        assert_eq!(notifications[1].body, "The show Bar has a new season!");
        assert_eq!(notifications[2], Notification::new("Overview", "2 updates."));
    }

    #[tokio::test]
    async fn test_notify_updates_delivers_in_order() {
        let notifier = MockNotifier::new();
        let deltas = vec![SeasonDelta::new("Foo", 3, 101)];

        notify_updates(&notifier, &deltas, Duration::ZERO).await;

        let sent = notifier.notifications();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].title, "New Season Alert!");
        assert_eq!(sent[1].title, "Overview");
    }
}
