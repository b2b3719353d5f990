use crate::{
    address::recipient_emails,
    assoc::AssocLogRegistry,
    record::{AssocType, ContextId, EventType, NotificationType},
    store::EmailLog,
};

/// Existence queries over the recorded logs, for test harnesses and audits.
///
/// Every supplied criterion must match (a conjunction); a `None` criterion
/// is a wildcard. Matching is exact and case-sensitive throughout, and body
/// criteria are literal substrings with no pattern syntax. The scan stops at
/// the first fully matching entry.
#[derive(Debug)]
pub struct LogQuery {
    log: EmailLog,
    registry: AssocLogRegistry,
}

impl LogQuery {
    #[must_use]
    pub fn new(log: EmailLog, registry: AssocLogRegistry) -> Self {
        Self { log, registry }
    }

    /// Whether any generic record matches all supplied criteria.
    ///
    /// With no criteria this is true iff anything at all has been recorded.
    /// The log is re-read from the backing medium first, so records written
    /// through another handle are observed. A recipient criterion matches
    /// against the record's recipients after normalization to bare
    /// addresses.
    #[must_use]
    pub fn exists(
        &self,
        notification_type: Option<NotificationType>,
        recipient_email: Option<&str>,
        body: Option<&str>,
    ) -> bool {
        let records = match self.log.read_all(ContextId::NONE) {
            Ok(records) => records,
            Err(error) => {
                crate::internal!(level = WARN, "Failed to read the email log: {error}");
                return false;
            }
        };

        records.iter().any(|record| {
            if notification_type.is_some() && record.notification_type != notification_type {
                return false;
            }

            if let Some(email) = recipient_email {
                if !recipient_emails(&record.recipients)
                    .iter()
                    .any(|candidate| candidate == email)
                {
                    return false;
                }
            }

            if let Some(needle) = body {
                if !record.body.contains(needle) {
                    return false;
                }
            }

            true
        })
    }

    /// Whether any entry tied to (`assoc_type`, `assoc_id`) matches all
    /// supplied criteria.
    ///
    /// An association kind with no registered provider yields no entries
    /// and therefore never matches; that case is false, not an error.
    #[must_use]
    pub fn exists_by_assoc(
        &self,
        assoc_type: AssocType,
        assoc_id: u64,
        recipient_email: Option<&str>,
        event_type: Option<EventType>,
        body: Option<&str>,
    ) -> bool {
        self.registry
            .lookup(assoc_type, assoc_id)
            .iter()
            .any(|entry| {
                if let Some(email) = recipient_email {
                    if !recipient_emails(&entry.recipients)
                        .iter()
                        .any(|candidate| candidate == email)
                    {
                        return false;
                    }
                }

                if event_type.is_some() && entry.event_type != event_type {
                    return false;
                }

                if let Some(needle) = body {
                    if !entry.body.contains(needle) {
                        return false;
                    }
                }

                true
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        address::Recipient,
        assoc::AssocLogProvider,
        record::{AssocLogEntry, LogRecord},
        settings::MemorySettingsStore,
    };

    fn log_with(records: Vec<LogRecord>) -> EmailLog {
        let log = EmailLog::new(Arc::new(MemorySettingsStore::new()));
        for record in records {
            log.append(ContextId::NONE, record).unwrap();
        }
        log
    }

    fn record(notification_type: Option<NotificationType>, body: &str) -> LogRecord {
        LogRecord {
            date_sent: 1_700_000_000,
            notification_type,
            from: "sys@x.com".to_string(),
            recipients: vec![Recipient::raw("U <u@x.com>")],
            subject: "Hi".to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn no_criteria_is_true_iff_any_record_exists() {
        let empty = LogQuery::new(log_with(vec![]), AssocLogRegistry::new());
        assert!(!empty.exists(None, None, None));

        let populated = LogQuery::new(
            log_with(vec![record(None, "body")]),
            AssocLogRegistry::new(),
        );
        assert!(populated.exists(None, None, None));
    }

    #[test]
    fn all_supplied_criteria_must_match() {
        let query = LogQuery::new(
            log_with(vec![record(Some(NotificationType(1)), "Please confirm")]),
            AssocLogRegistry::new(),
        );

        assert!(query.exists(Some(NotificationType(1)), Some("u@x.com"), Some("confirm")));
        assert!(!query.exists(Some(NotificationType(2)), Some("u@x.com"), Some("confirm")));
        assert!(!query.exists(Some(NotificationType(1)), Some("other@x.com"), Some("confirm")));
        assert!(!query.exists(Some(NotificationType(1)), Some("u@x.com"), Some("reject")));
    }

    #[test]
    fn type_criterion_never_matches_an_untyped_record() {
        let query = LogQuery::new(
            log_with(vec![record(None, "body")]),
            AssocLogRegistry::new(),
        );

        assert!(!query.exists(Some(NotificationType(1)), None, None));
    }

    #[test]
    fn body_matching_is_literal_and_case_sensitive() {
        let query = LogQuery::new(
            log_with(vec![record(None, "Please confirm your account")]),
            AssocLogRegistry::new(),
        );

        assert!(query.exists(None, None, Some("confirm your")));
        assert!(!query.exists(None, None, Some("Confirm your")));
        assert!(!query.exists(None, None, Some("confirm.*account")));
    }

    #[test]
    fn any_matching_record_suffices() {
        let query = LogQuery::new(
            log_with(vec![
                record(Some(NotificationType(1)), "first"),
                record(Some(NotificationType(2)), "second"),
            ]),
            AssocLogRegistry::new(),
        );

        assert!(query.exists(Some(NotificationType(2)), None, None));
        assert!(!query.exists(Some(NotificationType(3)), None, None));
    }

    #[derive(Debug)]
    struct FixedProvider {
        entries: Vec<AssocLogEntry>,
    }

    impl AssocLogProvider for FixedProvider {
        fn by_assoc(&self, _assoc_type: AssocType, assoc_id: u64) -> Vec<AssocLogEntry> {
            self.entries
                .iter()
                .filter(|entry| entry.assoc_id == assoc_id)
                .cloned()
                .collect()
        }
    }

    fn registry_with(entries: Vec<AssocLogEntry>) -> AssocLogRegistry {
        let mut registry = AssocLogRegistry::new();
        registry.register(AssocType::Submission, Arc::new(FixedProvider { entries }));
        registry
    }

    fn assoc_entry(assoc_id: u64, event_type: Option<EventType>) -> AssocLogEntry {
        AssocLogEntry {
            assoc_type: AssocType::Submission,
            assoc_id,
            event_type,
            recipients: vec![Recipient::structured("editor@x.com")],
            body: "Your submission was accepted".to_string(),
        }
    }

    #[test]
    fn unregistered_assoc_type_is_false_not_an_error() {
        let query = LogQuery::new(
            log_with(vec![]),
            registry_with(vec![assoc_entry(1, None)]),
        );

        assert!(!query.exists_by_assoc(AssocType::SubmissionFile, 1, None, None, None));
    }

    #[test]
    fn assoc_criteria_are_conjunctive() {
        let query = LogQuery::new(
            log_with(vec![]),
            registry_with(vec![assoc_entry(1, Some(EventType(3)))]),
        );

        assert!(query.exists_by_assoc(
            AssocType::Submission,
            1,
            Some("editor@x.com"),
            Some(EventType(3)),
            Some("accepted")
        ));
        assert!(!query.exists_by_assoc(
            AssocType::Submission,
            1,
            Some("editor@x.com"),
            Some(EventType(4)),
            Some("accepted")
        ));
        assert!(!query.exists_by_assoc(AssocType::Submission, 2, None, None, None));
    }

    #[test]
    fn event_criterion_never_matches_an_untyped_entry() {
        let query = LogQuery::new(
            log_with(vec![]),
            registry_with(vec![assoc_entry(1, None)]),
        );

        assert!(query.exists_by_assoc(AssocType::Submission, 1, None, None, None));
        assert!(!query.exists_by_assoc(AssocType::Submission, 1, None, Some(EventType(3)), None));
    }
}
