//! Error types for credex.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Configuration errors
    #[error("Missing required environment value `{0}`. Are you running in GitHub Actions?")]
    MissingEnvironment(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Credential errors
    #[error("{0}")]
    InvalidToken(String),

    #[error("Failed to mint identity token: {0}")]
    IdentityToken(String),

    // Broker errors
    #[error("{0}")]
    BrokerRejected(String),

    // Infrastructure errors
    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_environment_message() {
        let err = Error::MissingEnvironment("GITHUB_SHA".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment value `GITHUB_SHA`. Are you running in GitHub Actions?"
        );
    }

    #[test]
    fn test_broker_rejection_is_verbatim() {
        let err = Error::BrokerRejected("bad audience".to_string());
        assert_eq!(err.to_string(), "bad audience");
    }
}
