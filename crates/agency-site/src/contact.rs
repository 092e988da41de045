//! Contact Form
//!
//! Validation of the JSON payload posted by the contact page and its
//! rendering as a plain-text email.

use lettre::Address;
use serde::{Deserialize, Serialize};

use crate::{error::ContactError, mailer::MailMessage};

/// Raw contact form payload.
///
/// Every field is optional at this stage so a missing field reports as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: Option<String>,
    pub contact_preference: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub service: Option<String>,
    pub budget: Option<String>,
    pub timeframe: Option<String>,
}

/// How the sender wants to be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPreference {
    Email,
    Phone,
}

impl ContactPreference {
    fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("email") {
            Some(Self::Email)
        } else if value.eq_ignore_ascii_case("phone") {
            Some(Self::Phone)
        } else {
            None
        }
    }

    /// Label used in the email body.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }
}

/// A contact request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub preference: ContactPreference,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: String,
    pub service: Option<String>,
    pub budget: Option<String>,
    pub timeframe: Option<String>,
}

impl ContactRequest {
    /// Checks required fields and the chosen contact channel.
    pub fn validate(self) -> Result<ContactSubmission, ContactError> {
        let name = filled(self.name);
        let preference = filled(self.contact_preference);
        let description = filled(self.description);

        let (Some(name), Some(preference), Some(description)) = (name, preference, description) else {
            return Err(ContactError::MissingFields);
        };

        let preference = ContactPreference::parse(&preference).ok_or(ContactError::InvalidPreference)?;
        let email = filled(self.email);
        let phone = filled(self.phone);

        match preference {
            ContactPreference::Email if email.is_none() => return Err(ContactError::MissingChannel("email")),
            ContactPreference::Phone if phone.is_none() => return Err(ContactError::MissingChannel("phone")),
            _ => {}
        }

        // Same parser the mailer uses for the reply-to header
        if let Some(address) = email.as_deref() {
            address.parse::<Address>().map_err(|_| ContactError::InvalidEmail)?;
        }

        Ok(ContactSubmission {
            name,
            preference,
            email,
            phone,
            description,
            service: filled(self.service),
            budget: filled(self.budget),
            timeframe: filled(self.timeframe),
        })
    }
}

impl ContactSubmission {
    /// Renders the submission as the message sent to the agency inbox.
    pub fn to_mail(&self) -> MailMessage {
        let optional = [
            ("Email", &self.email),
            ("Phone", &self.phone),
            ("Service", &self.service),
            ("Budget", &self.budget),
            ("Timeframe", &self.timeframe),
        ];
        let details: String = optional
            .into_iter()
            .filter_map(|(label, value)| value.as_ref().map(|value| format!("{label}: {value}\n")))
            .collect();

        let body = format!(
            "New contact request from the website\n\n\
             Name: {}\n\
             Preferred contact: {}\n\
             {details}\n\
             Project description:\n{}\n",
            self.name,
            self.preference.label(),
            self.description,
        );

        MailMessage {
            subject: format!("New contact request from {}", single_line(&self.name)),
            body,
            reply_to: self.email.clone(),
        }
    }
}

/// Trims a field, treating blank values as absent.
fn filled(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Collapses control characters so a header value stays on one line.
fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ContactRequest {
        ContactRequest {
            name: Some("Ana Souza".to_string()),
            contact_preference: Some("email".to_string()),
            email: Some("ana@example.com".to_string()),
            description: Some("We need a new marketing site.".to_string()),
            ..ContactRequest::default()
        }
    }

    #[test]
    fn complete_request_validates() {
        let submission = complete().validate().expect("valid request");
        assert_eq!(submission.name, "Ana Souza");
        assert_eq!(submission.preference, ContactPreference::Email);
        assert_eq!(submission.service, None);
    }

    #[test]
    fn blank_required_fields_are_missing() {
        let request = ContactRequest {
            name: Some("   ".to_string()),
            ..complete()
        };
        assert!(matches!(request.validate(), Err(ContactError::MissingFields)));

        let request = ContactRequest {
            description: None,
            ..complete()
        };
        assert!(matches!(request.validate(), Err(ContactError::MissingFields)));
    }

    #[test]
    fn preference_must_be_known() {
        let request = ContactRequest {
            contact_preference: Some("pigeon".to_string()),
            ..complete()
        };
        assert!(matches!(request.validate(), Err(ContactError::InvalidPreference)));

        let request = ContactRequest {
            contact_preference: Some("EMAIL".to_string()),
            ..complete()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn preferred_channel_must_be_provided() {
        let request = ContactRequest {
            contact_preference: Some("phone".to_string()),
            ..complete()
        };
        assert!(matches!(request.validate(), Err(ContactError::MissingChannel("phone"))));

        let request = ContactRequest {
            email: Some(String::new()),
            phone: Some("+33 6 12 34 56 78".to_string()),
            ..complete()
        };
        assert!(matches!(request.validate(), Err(ContactError::MissingChannel("email"))));
    }

    #[test]
    fn email_must_be_a_deliverable_address() {
        for address in [
            "ana",
            "@example.com",
            "ana@@example.com",
            "ana @example.com",
            "a,b@example.com",
            "a<b@example.com",
            "a\"b@example.com",
        ] {
            let request = ContactRequest {
                email: Some(address.to_string()),
                ..complete()
            };
            assert!(matches!(request.validate(), Err(ContactError::InvalidEmail)), "{address}");
        }
    }

    #[test]
    fn single_label_domains_are_accepted() {
        let request = ContactRequest {
            email: Some("ana@localhost".to_string()),
            ..complete()
        };
        let submission = request.validate().expect("valid request");
        assert_eq!(submission.email.as_deref(), Some("ana@localhost"));
    }

    #[test]
    fn accepted_email_is_a_valid_reply_to() {
        let mail = complete().validate().expect("valid").to_mail();
        let reply_to = mail.reply_to.expect("reply-to set");
        assert!(reply_to.parse::<lettre::message::Mailbox>().is_ok());
    }

    #[test]
    fn mail_lists_only_provided_fields() {
        let request = ContactRequest {
            budget: Some("10k to 25k".to_string()),
            ..complete()
        };
        let mail = request.validate().expect("valid").to_mail();

        assert_eq!(mail.subject, "New contact request from Ana Souza");
        assert_eq!(mail.reply_to.as_deref(), Some("ana@example.com"));
        assert!(mail.body.contains("Budget: 10k to 25k"));
        assert!(mail.body.contains("Preferred contact: Email"));
        assert!(!mail.body.contains("Timeframe"));
        assert!(mail.body.ends_with("We need a new marketing site.\n"));
    }

    #[test]
    fn subject_stays_on_one_line() {
        let request = ContactRequest {
            name: Some("Ana\r\nBcc: everyone@example.com".to_string()),
            ..complete()
        };
        let mail = request.validate().expect("valid").to_mail();
        assert!(!mail.subject.contains('\n'));
        assert!(!mail.subject.contains('\r'));
    }

    #[test]
    fn payload_uses_camel_case() {
        let request: ContactRequest = serde_json::from_str(
            r#"{"name":"Luc","contactPreference":"phone","phone":"0600000000","description":"App"}"#,
        )
        .expect("payload parses");
        let submission = request.validate().expect("valid");
        assert_eq!(submission.preference, ContactPreference::Phone);
        assert_eq!(submission.phone.as_deref(), Some("0600000000"));
    }
}
