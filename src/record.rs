use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::address::Recipient;

/// A notification classification constant as defined by the host
/// application (e.g. "submission submitted", "review assigned").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationType(pub u32);

impl Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An email-log event classification constant as defined by the host
/// application's own log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventType(pub u32);

impl Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of domain entity an association-scoped log entry is tied to.
///
/// Which kinds actually resolve to entries is decided by provider
/// registration, not by this enum; see
/// [`AssocLogRegistry`](crate::assoc::AssocLogRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssocType {
    Submission,
    SubmissionFile,
}

/// Partition key under which the generic log is stored.
///
/// Interception always records under the synthetic [`ContextId::NONE`]
/// scope, keeping the captured log apart from any real host context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextId(pub i64);

impl ContextId {
    /// The fixed "no context" scope.
    pub const NONE: Self = Self(0);
}

impl Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The contextual event that triggered an outgoing message, handed to the
/// notification-dispatch hook just before the send fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub notification_type: NotificationType,
}

impl Notification {
    #[must_use]
    pub const fn new(notification_type: NotificationType) -> Self {
        Self { notification_type }
    }
}

/// One intercepted email in the generic log.
///
/// Immutable once appended; records are kept in insertion order, which is
/// also chronological order, and are never deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Seconds since the Unix epoch at interception time.
    pub date_sent: u64,
    /// Classification of the notification that triggered the message, when
    /// one was relayed alongside it.
    pub notification_type: Option<NotificationType>,
    pub from: String,
    pub recipients: Vec<Recipient>,
    pub subject: String,
    pub body: String,
}

/// One entry of an entity-associated email log.
///
/// Produced and owned entirely by the host's record providers; this crate
/// only reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssocLogEntry {
    pub assoc_type: AssocType,
    pub assoc_id: u64,
    pub event_type: Option<EventType>,
    pub recipients: Vec<Recipient>,
    pub body: String,
}
