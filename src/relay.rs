use std::sync::{Mutex, PoisonError};

use crate::record::Notification;

/// One-slot carrier for the notification that triggered the in-flight
/// message: filled at the notification-dispatch hook, drained at the
/// message-send hook.
///
/// The slot holds at most one notification. A stash unconditionally
/// overwrites whatever is pending (last write wins, no queueing, no
/// correlation key), and a take clears it, so pairing with the very next
/// send is best-effort rather than transactional. The slot is shared by
/// every caller holding the same relay: with concurrent senders, a
/// notification stashed for one message can be consumed by another's send.
/// Known hazard of the one-slot design.
#[derive(Debug, Default)]
pub struct NotificationRelay {
    pending: Mutex<Option<Notification>>,
}

impl NotificationRelay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stash `notification` for the next message send, dropping any
    /// unconsumed one.
    pub fn stash(&self, notification: Notification) {
        *self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(notification);
    }

    /// Take and clear the pending notification, if any.
    pub fn take(&self) -> Option<Notification> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::record::NotificationType;

    #[test]
    fn take_is_one_shot() {
        let relay = NotificationRelay::new();
        relay.stash(Notification::new(NotificationType(1)));

        assert_eq!(relay.take(), Some(Notification::new(NotificationType(1))));
        assert_eq!(relay.take(), None);
    }

    #[test]
    fn stash_overwrites_the_pending_notification() {
        let relay = NotificationRelay::new();
        relay.stash(Notification::new(NotificationType(1)));
        relay.stash(Notification::new(NotificationType(2)));

        assert_eq!(relay.take(), Some(Notification::new(NotificationType(2))));
    }
}
