use std::{fmt::Debug, sync::Arc};

use crate::address::Recipient;

/// Logging capability carried by message kinds the host already records in
/// its own email log (submission mail and friends). The interceptor
/// delegates to this instead of the generic log, so such messages never
/// produce a duplicate entry.
pub trait NativeLog: Send + Sync + Debug {
    fn log(&self, message: &OutgoingMessage);
}

/// An outgoing message as handed to the send hook.
#[derive(Debug, Clone)]
pub struct OutgoingMessage {
    pub from: String,
    pub recipients: Vec<Recipient>,
    pub subject: String,
    pub body: String,
    native_log: Option<Arc<dyn NativeLog>>,
}

impl OutgoingMessage {
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        recipients: Vec<Recipient>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            recipients,
            subject: subject.into(),
            body: body.into(),
            native_log: None,
        }
    }

    /// Attach the host's own logging capability for this message kind.
    #[must_use]
    pub fn with_native_log(mut self, native_log: Arc<dyn NativeLog>) -> Self {
        self.native_log = Some(native_log);
        self
    }

    /// The host's own logging capability, when this message kind carries
    /// one.
    #[must_use]
    pub fn native_log(&self) -> Option<&Arc<dyn NativeLog>> {
        self.native_log.as_ref()
    }
}
