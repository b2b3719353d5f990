use mailparse::{addrparse, MailAddr};
use serde::{Deserialize, Serialize};

/// A recipient in whichever shape the host hands it over: a raw composite
/// header string ("Display Name <addr@example.com>, ...") or a record that
/// already carries a bare email.
///
/// Serialized untagged so a persisted log holds either a plain string or an
/// object with an `email` field, matching the shapes the host itself stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recipient {
    Structured(StructuredRecipient),
    Raw(String),
}

impl Recipient {
    #[must_use]
    pub fn raw(addresses: impl Into<String>) -> Self {
        Self::Raw(addresses.into())
    }

    #[must_use]
    pub fn structured(email: impl Into<String>) -> Self {
        Self::Structured(StructuredRecipient {
            email: email.into(),
            name: None,
        })
    }
}

/// A recipient record with the email already split out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredRecipient {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Flatten `recipients` to bare email addresses for matching.
///
/// A raw entry that does not parse contributes a single empty string rather
/// than failing the whole resolution; such entries never match a non-empty
/// criterion, and callers must tolerate them.
#[must_use]
pub fn recipient_emails(recipients: &[Recipient]) -> Vec<String> {
    recipients.iter().flat_map(emails_of).collect()
}

fn emails_of(recipient: &Recipient) -> Vec<String> {
    match recipient {
        Recipient::Structured(structured) => vec![structured.email.clone()],
        Recipient::Raw(raw) => match addrparse(raw) {
            Ok(addresses) => addresses
                .iter()
                .flat_map(|address| match address {
                    MailAddr::Single(single) => vec![single.addr.clone()],
                    MailAddr::Group(group) => {
                        group.addrs.iter().map(|single| single.addr.clone()).collect()
                    }
                })
                .collect(),
            Err(_) => vec![String::new()],
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn composite_string_resolves_every_address() {
        let recipients = vec![Recipient::raw("A <a@x.com>, B <b@x.com>")];
        assert_eq!(
            recipient_emails(&recipients),
            vec!["a@x.com".to_string(), "b@x.com".to_string()]
        );
    }

    #[test]
    fn structured_record_resolves_its_email_field() {
        let recipients = vec![Recipient::Structured(StructuredRecipient {
            email: "b@x.com".to_string(),
            name: Some("B".to_string()),
        })];
        assert_eq!(recipient_emails(&recipients), vec!["b@x.com".to_string()]);
    }

    #[test]
    fn group_address_resolves_each_member() {
        let recipients = vec![Recipient::raw("editors: a@x.com, b@x.com;")];
        assert_eq!(
            recipient_emails(&recipients),
            vec!["a@x.com".to_string(), "b@x.com".to_string()]
        );
    }

    #[test]
    fn malformed_entry_resolves_to_an_empty_string() {
        let recipients = vec![Recipient::raw("Broken <unclosed")];
        assert_eq!(recipient_emails(&recipients), vec![String::new()]);
    }

    #[test]
    fn mixed_shapes_resolve_in_order() {
        let recipients = vec![
            Recipient::raw("A <a@x.com>"),
            Recipient::structured("b@x.com"),
        ];
        assert_eq!(
            recipient_emails(&recipients),
            vec!["a@x.com".to_string(), "b@x.com".to_string()]
        );
    }

    #[test]
    fn raw_and_structured_round_trip_untagged() {
        let raw = serde_json::to_value(Recipient::raw("A <a@x.com>")).expect("serialize");
        assert_eq!(raw, serde_json::json!("A <a@x.com>"));

        let structured =
            serde_json::to_value(Recipient::structured("b@x.com")).expect("serialize");
        assert_eq!(structured, serde_json::json!({ "email": "b@x.com" }));

        let back: Vec<Recipient> =
            serde_json::from_value(serde_json::json!(["A <a@x.com>", { "email": "b@x.com" }]))
                .expect("deserialize");
        assert_eq!(
            back,
            vec![Recipient::raw("A <a@x.com>"), Recipient::structured("b@x.com")]
        );
    }
}
