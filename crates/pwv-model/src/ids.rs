#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// Prefix marking sessions that are never written to the session store.
pub const EPHEMERAL_PREFIX: &str = "ephemeral_";

/// Number of hex characters kept from a generated UUID.
const SESSION_ID_LEN: usize = 12;

#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidSessionId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Generate a fresh short identifier from a v4 UUID.
    pub fn generate() -> Self {
        let mut hex = uuid::Uuid::new_v4().simple().to_string();
        hex.truncate(SESSION_ID_LEN);
        Self(hex)
    }

    /// Generate an identifier for a session that is discarded after one run.
    pub fn ephemeral() -> Self {
        Self(format!("{EPHEMERAL_PREFIX}{}", Self::generate()))
    }

    pub fn is_ephemeral(&self) -> bool {
        self.0.starts_with(EPHEMERAL_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for SessionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
