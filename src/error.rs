use thiserror::Error;

/// A locale code that is not served by this site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("Unknown locale code: '{0}'")]
    Unknown(String),

    #[error("Locale '{0}' is not enabled")]
    Disabled(String),
}

/// Failure while loading or fetching CMS content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid content dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("CMS request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CMS returned status {status}: {body}")]
    Status { status: u16, body: String },
}

impl ContentError {
    /// Network failures and 5xx responses are worth retrying, client errors
    /// and malformed payloads are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ContentError::Http(e) => !e.is_decode(),
            ContentError::Status { status, .. } => *status >= 500,
            ContentError::Read { .. } | ContentError::Parse(_) => false,
        }
    }
}

/// Malformed rich-text tags in a localized message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("tag <{0}> is never closed")]
    Unclosed(String),

    #[error("expected </{expected}>, found </{found}>")]
    Mismatched { expected: String, found: String },

    #[error("closing tag </{0}> has no opening tag")]
    UnexpectedClose(String),
}

/// Contact form submission problems.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("invalid field '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },

    #[error("contact webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("contact webhook returned status {0}")]
    Status(u16),
}

impl ContactError {
    pub fn is_retryable(&self) -> bool {
        match self {
            ContactError::Http(_) => true,
            ContactError::Status(status) => *status >= 500,
            ContactError::Invalid { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_error_messages() {
        assert_eq!(
            LocaleError::Unknown("fr".into()).to_string(),
            "Unknown locale code: 'fr'"
        );
        assert_eq!(
            LocaleError::Disabled("de".into()).to_string(),
            "Locale 'de' is not enabled"
        );
    }

    #[test]
    fn test_status_retryable_only_for_server_errors() {
        let server = ContentError::Status {
            status: 503,
            body: String::new(),
        };
        let client = ContentError::Status {
            status: 404,
            body: String::new(),
        };
        assert!(server.is_retryable());
        assert!(!client.is_retryable());
    }

    #[test]
    fn test_parse_error_not_retryable() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!ContentError::from(err).is_retryable());
    }

    #[test]
    fn test_tag_error_messages() {
        let err = TagError::Mismatched {
            expected: "strong".into(),
            found: "em".into(),
        };
        assert_eq!(err.to_string(), "expected </strong>, found </em>");
    }

    #[test]
    fn test_contact_error_retryable() {
        assert!(ContactError::Status(502).is_retryable());
        assert!(!ContactError::Status(400).is_retryable());
        assert!(!ContactError::Invalid {
            field: "email",
            reason: "missing '@'"
        }
        .is_retryable());
    }
}
