//! City identifier
//!
//! Cities created on the client carry a temporary id (`temp-<uuid>`) until
//! the backend persists them and hands out a stable one.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

const TEMPORARY_PREFIX: &str = "temp-";

/// A city identifier, either persisted or temporary
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawCityId", into = "String")]
pub struct CityId(String);

impl CityId {
    /// Create a new temporary client-side id
    pub fn temporary() -> Self {
        Self(format!("{TEMPORARY_PREFIX}{}", Uuid::new_v4()))
    }

    /// Parse an id from a string
    ///
    /// # Errors
    /// Returns an error if the string is empty or contains only whitespace
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidCityId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Whether this id was generated on the client and not yet persisted
    pub fn is_temporary(&self) -> bool {
        self.0.starts_with(TEMPORARY_PREFIX)
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CityId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Wire form of an id: backends send either a string or an integer
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCityId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl TryFrom<RawCityId> for CityId {
    type Error = DomainError;

    fn try_from(value: RawCityId) -> Result<Self, Self::Error> {
        match value {
            RawCityId::Text(text) => Self::parse(&text),
            RawCityId::Signed(number) => Ok(Self(number.to_string())),
            RawCityId::Unsigned(number) => Ok(Self(number.to_string())),
        }
    }
}

impl From<CityId> for String {
    fn from(id: CityId) -> Self {
        id.0
    }
}
