use std::{collections::HashMap, fmt::Debug, sync::Arc};

use crate::record::{AssocLogEntry, AssocType};

/// External record provider owning the email-log entries tied to one kind
/// of domain entity (the host's log DAO for submissions, files, ...).
pub trait AssocLogProvider: Send + Sync + Debug {
    /// All entries tied to (`assoc_type`, `assoc_id`), in provider order.
    fn by_assoc(&self, assoc_type: AssocType, assoc_id: u64) -> Vec<AssocLogEntry>;
}

/// Registry from association kind to its record provider.
///
/// New kinds are added by registering a provider, not by touching the query
/// side. A lookup for a kind with no registered provider yields no entries
/// rather than an error: callers check for an empty result, not a failure,
/// to express "association type not supported".
#[derive(Debug, Default, Clone)]
pub struct AssocLogRegistry {
    providers: HashMap<AssocType, Arc<dyn AssocLogProvider>>,
}

impl AssocLogRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `provider` for `assoc_type`, replacing any previous one.
    pub fn register(&mut self, assoc_type: AssocType, provider: Arc<dyn AssocLogProvider>) {
        self.providers.insert(assoc_type, provider);
    }

    /// The provider registered for `assoc_type`, if any.
    #[must_use]
    pub fn provider(&self, assoc_type: AssocType) -> Option<&Arc<dyn AssocLogProvider>> {
        self.providers.get(&assoc_type)
    }

    /// Entries tied to (`assoc_type`, `assoc_id`), exactly as the provider
    /// returns them (no re-sorting, no deduplication). Empty when no
    /// provider is registered for the kind.
    #[must_use]
    pub fn lookup(&self, assoc_type: AssocType, assoc_id: u64) -> Vec<AssocLogEntry> {
        self.providers
            .get(&assoc_type)
            .map(|provider| provider.by_assoc(assoc_type, assoc_id))
            .unwrap_or_default()
    }
}
