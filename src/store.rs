use std::sync::Arc;

use crate::{
    error::Result,
    record::{ContextId, LogRecord},
    settings::SettingsStore,
};

/// Name of the settings entry the generic log is persisted under.
pub const EMAIL_LOG_SETTING: &str = "emailLog";

/// Append-only, context-scoped log of intercepted emails, persisted through
/// the settings collaborator as one JSON array per context.
///
/// Nothing here ever mutates or removes an appended record; the only way to
/// empty a log is to reset the setting through the store itself.
#[derive(Debug, Clone)]
pub struct EmailLog {
    settings: Arc<dyn SettingsStore>,
}

impl EmailLog {
    #[must_use]
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    /// Append `record` to the log for `context`.
    ///
    /// This is a read-modify-write over externally persisted state and is
    /// not atomic: two callers appending to the same context at once can
    /// race, and the storage layer keeps whichever full list lands last.
    ///
    /// # Errors
    /// If the settings collaborator fails to read or write the log.
    pub fn append(&self, context: ContextId, record: LogRecord) -> Result<()> {
        let mut log = self.stored(context)?;
        log.push(record);

        self.settings
            .update(context, EMAIL_LOG_SETTING, serde_json::to_value(&log)?)
    }

    /// All records for `context`, oldest first.
    ///
    /// Refreshes the collaborator's cache first so records written through
    /// another handle of the same backing medium are observed.
    ///
    /// # Errors
    /// If the settings collaborator fails to read the log.
    pub fn read_all(&self, context: ContextId) -> Result<Vec<LogRecord>> {
        self.settings.refresh(context)?;
        self.stored(context)
    }

    // A missing or non-list value reads as an empty log.
    fn stored(&self, context: ContextId) -> Result<Vec<LogRecord>> {
        Ok(self
            .settings
            .get(context, EMAIL_LOG_SETTING)?
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default())
    }
}
