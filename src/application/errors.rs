//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while talking to an external data provider.
///
/// Every variant collapses into `CapabilityResult::Failure` at the
/// capability boundary, except `Credential`, which degrades into a
/// maintenance notice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Credential rejected with status {0}")]
    Credential(u16),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Map a non-success HTTP status onto the taxonomy
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ApiError::Credential(status),
            other => ApiError::Status(other),
        }
    }

    pub fn is_credential(&self) -> bool {
        matches!(self, ApiError::Credential(_))
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses_are_credential_errors() {
        assert_eq!(ApiError::from_status(401), ApiError::Credential(401));
        assert_eq!(ApiError::from_status(403), ApiError::Credential(403));
        assert!(ApiError::from_status(403).is_credential());
    }

    #[test]
    fn test_other_statuses_are_plain_status_errors() {
        assert_eq!(ApiError::from_status(500), ApiError::Status(500));
        assert_eq!(ApiError::from_status(404), ApiError::Status(404));
        assert!(!ApiError::from_status(429).is_credential());
    }
}
