use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    message::OutgoingMessage,
    record::{ContextId, LogRecord, Notification},
    relay::NotificationRelay,
    store::EmailLog,
};

/// Receives the host's outgoing mail, records it, and suppresses delivery.
///
/// Wire [`on_notification_dispatch`] to the host's notification-mail hook
/// and [`on_message_send`] to its mail-send hook. Interception is total:
/// once attached, no message leaves the host.
///
/// [`on_notification_dispatch`]: Interceptor::on_notification_dispatch
/// [`on_message_send`]: Interceptor::on_message_send
#[derive(Debug)]
pub struct Interceptor {
    log: EmailLog,
    relay: NotificationRelay,
}

impl Interceptor {
    #[must_use]
    pub fn new(log: EmailLog) -> Self {
        Self {
            log,
            relay: NotificationRelay::new(),
        }
    }

    /// Notification-dispatch hook: remember the notification so the next
    /// send can be classified by it.
    pub fn on_notification_dispatch(&self, notification: Notification) {
        self.relay.stash(notification);
    }

    /// Mail-send hook. Returns true in every branch: delivery is always
    /// suppressed.
    ///
    /// Messages the host logs natively are handed to their own logging
    /// capability and skip the generic log, so they are not recorded twice.
    /// Everything else becomes a [`LogRecord`] under [`ContextId::NONE`],
    /// classified by the pending notification if one was relayed.
    pub fn on_message_send(&self, message: &OutgoingMessage) -> bool {
        crate::intercepted!(
            level = DEBUG,
            "From: {} Subject: {}",
            message.from,
            message.subject
        );

        if let Some(native) = message.native_log() {
            native.log(message);
            return true;
        }

        let notification_type = self
            .relay
            .take()
            .map(|notification| notification.notification_type);

        let record = LogRecord {
            date_sent: epoch_seconds(),
            notification_type,
            from: message.from.clone(),
            recipients: message.recipients.clone(),
            subject: message.subject.clone(),
            body: message.body.clone(),
        };

        // A failing settings collaborator is not the send pipeline's
        // problem; the hook still reports suppression.
        if let Err(error) = self.log.append(ContextId::NONE, record) {
            crate::internal!(level = WARN, "Failed to record intercepted email: {error}");
        }

        true
    }
}

fn epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
