use thiserror::Error;

use super::types::DocumentKind;

/// Convenience alias used throughout the crate.
pub type Result<T, E = SevdeskError> = std::result::Result<T, E>;

/// Errors that can occur while building requests or talking to sevdesk.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SevdeskError {
    /// A required configuration value is absent or empty.
    #[error("configuration parameter not found: {0}")]
    ConfigurationMissing(&'static str),

    /// A configuration value is present but cannot be read as its type.
    #[error("configuration parameter {key} has invalid value '{value}'")]
    ConfigurationInvalid { key: &'static str, value: String },

    /// A document was requested without any line items.
    #[error("no {0} items found")]
    EmptyLineItems(DocumentKind),

    /// A line item field is present but holds an unusable value.
    #[error("line item {position}: invalid value for '{field}'")]
    InvalidLineItem { position: usize, field: &'static str },

    /// sevdesk reported that the addressed object does not exist (error code 151).
    #[error("not found: {0}")]
    RemoteNotFound(String),

    /// sevdesk rejected the API token (status 401).
    #[error("unauthorized: {0}")]
    RemoteUnauthorized(String),

    /// sevdesk returned an error message.
    #[error("sevdesk error: {0}")]
    Remote(String),

    /// The request failed without a classifiable remote error.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response did not have the documented shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl SevdeskError {
    /// Whether the error originates from the remote service rather than local input.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::RemoteNotFound(_) | Self::RemoteUnauthorized(_) | Self::Remote(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_missing_names_key() {
        let err = SevdeskError::ConfigurationMissing("tax_rate");
        assert_eq!(err.to_string(), "configuration parameter not found: tax_rate");
    }

    #[test]
    fn empty_items_names_document_kind() {
        assert_eq!(
            SevdeskError::EmptyLineItems(DocumentKind::Invoice).to_string(),
            "no invoice items found"
        );
        assert_eq!(
            SevdeskError::EmptyLineItems(DocumentKind::Order).to_string(),
            "no order items found"
        );
    }

    #[test]
    fn remote_classification() {
        assert!(SevdeskError::RemoteNotFound("x".into()).is_remote());
        assert!(SevdeskError::RemoteUnauthorized("x".into()).is_remote());
        assert!(!SevdeskError::Transport("x".into()).is_remote());
        assert!(!SevdeskError::ConfigurationMissing("currency").is_remote());
    }
}
