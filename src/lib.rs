//! Intercepts outgoing email generated by a host application and records it
//! into a queryable log instead of delivering it, so automated tests can
//! later assert that a message matching some criteria was (or was not) sent.
//!
//! Wiring is three pieces: an [`Interceptor`] attached to the host's
//! notification-dispatch and mail-send hooks, an [`EmailLog`] persisted
//! through a [`SettingsStore`] collaborator, and a [`LogQuery`] for the
//! existence checks. Entity-associated logs owned by the host are reachable
//! through an [`AssocLogRegistry`] of [`AssocLogProvider`]s.

pub mod address;
pub mod assoc;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod logging;
pub mod message;
pub mod query;
pub mod record;
pub mod relay;
pub mod settings;
pub mod store;

pub use address::{recipient_emails, Recipient, StructuredRecipient};
pub use assoc::{AssocLogProvider, AssocLogRegistry};
pub use config::{FileConfig, SettingsConfig};
pub use error::{Result, SettingsError};
pub use interceptor::Interceptor;
pub use message::{NativeLog, OutgoingMessage};
pub use query::LogQuery;
pub use record::{
    AssocLogEntry, AssocType, ContextId, EventType, LogRecord, Notification, NotificationType,
};
pub use relay::NotificationRelay;
pub use settings::{FileSettingsStore, MemorySettingsStore, SettingsStore};
pub use store::{EmailLog, EMAIL_LOG_SETTING};

pub use tracing;
