//! Secret value type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A credential value that must never reach a log line in clear text.
///
/// `Debug` and `Display` are redacted; call [`Secret::expose`] at the exact
/// point where the plaintext is handed to the wire or to the host.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The plaintext value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let secret = Secret::new("ghs_abcdef");
        assert_eq!(format!("{:?}", secret), "Secret(***)");
        assert_eq!(secret.to_string(), "***");
        assert_eq!(secret.expose(), "ghs_abcdef");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let secret = Secret::new("tok");
        assert_eq!(serde_json::to_string(&secret).unwrap(), "\"tok\"");

        let back: Secret = serde_json::from_str("\"tok\"").unwrap();
        assert_eq!(back, secret);
    }
}
