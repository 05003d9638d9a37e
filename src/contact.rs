//! Contact form: validation and delivery to an outgoing webhook.

use crate::error::ContactError;
use crate::i18n::Locale;
use crate::retry::{with_retry_if, RetryConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const MAX_MESSAGE_CHARS: usize = 5000;
const MAX_FIELD_CHARS: usize = 200;

#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactRequest {
    /// Check and trim all fields.
    pub fn validate(self) -> Result<ValidContact, ContactError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() {
            return Err(invalid("name", "required"));
        }
        if name.chars().count() > MAX_FIELD_CHARS {
            return Err(invalid("name", "too long"));
        }
        if !is_plausible_email(email) {
            return Err(invalid("email", "not an email address"));
        }
        if message.is_empty() {
            return Err(invalid("message", "required"));
        }
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(invalid("message", "too long"));
        }

        Ok(ValidContact {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ContactError {
    ContactError::Invalid { field, reason }
}

/// Something before and after a single `@`, no whitespace.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().count() > MAX_FIELD_CHARS || email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    locale: Locale,
}

/// Post the submission to the webhook, retrying network errors and 5xx.
pub async fn forward(
    http: &reqwest::Client,
    webhook_url: &str,
    contact: &ValidContact,
    locale: Locale,
    retry: &RetryConfig,
) -> Result<(), ContactError> {
    let payload = WebhookPayload {
        name: &contact.name,
        email: &contact.email,
        message: &contact.message,
        locale,
    };

    with_retry_if(
        retry,
        "Contact webhook",
        || post_once(http, webhook_url, &payload),
        ContactError::is_retryable,
    )
    .await?;

    info!("Contact message from {} forwarded", contact.email);
    Ok(())
}

async fn post_once(
    http: &reqwest::Client,
    webhook_url: &str,
    payload: &WebhookPayload<'_>,
) -> Result<(), ContactError> {
    let response = http.post(webhook_url).json(payload).send().await?;
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ContactError::Status(status.as_u16()))
    }
}
