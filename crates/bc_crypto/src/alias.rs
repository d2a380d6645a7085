//! Validated alias — the human-chosen public name an identity registers
//! under. The directory enforces uniqueness; the client only enforces
//! shape, so a bad alias is rejected before it ever hits the wire.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_LEN: usize = 3;
pub const MAX_LEN: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AliasError {
    #[error("alias is too short, minimum length is {MIN_LEN} characters")]
    TooShort,

    #[error("alias is too long, maximum length is {MAX_LEN} characters")]
    TooLong,

    #[error("alias contains invalid character `{0}`")]
    InvalidChar(char),
}

/// An alias resolves to exactly one public key in the directory.
/// Allowed characters: ASCII alphanumerics plus `_`, `-` and `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alias(String);

impl Alias {
    pub fn parse(s: impl Into<String>) -> Result<Self, AliasError> {
        let s = s.into();
        if s.len() < MIN_LEN {
            return Err(AliasError::TooShort);
        }
        if s.len() > MAX_LEN {
            return Err(AliasError::TooLong);
        }
        if let Some(c) = s.chars().find(|&c| !is_valid_char(c)) {
            return Err(AliasError::InvalidChar(c));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

impl AsRef<str> for Alias {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for Alias {
    type Error = AliasError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Alias> for String {
    fn from(value: Alias) -> Self {
        value.0
    }
}

impl std::fmt::Display for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
