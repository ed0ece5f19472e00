//! Store-assigned record identifiers.
//!
//! A [`RecordId`] is the 12-byte object id the document store assigns on
//! insert. At the API boundary it is always rendered as 24 lowercase
//! hexadecimal characters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of raw bytes in an identifier.
pub const RECORD_ID_LEN: usize = 12;

/// Reasons a textual identifier cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdError {
    /// The input is not exactly 24 characters long.
    #[error("identifier must be 24 hexadecimal characters, got {length}")]
    WrongLength { length: usize },
    /// The input contains a non-hexadecimal character.
    #[error("identifier must contain only hexadecimal characters")]
    InvalidHex,
}

/// Immutable 12-byte record identifier.
///
/// # Examples
/// ```
/// use marketplace::domain::RecordId;
///
/// let id: RecordId = "65f1c0ffee0000000000beef".parse().expect("valid id");
/// assert_eq!(id.to_string(), "65f1c0ffee0000000000beef");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId([u8; RECORD_ID_LEN]);

impl RecordId {
    /// Wrap raw identifier bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; RECORD_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw identifier bytes.
    #[must_use]
    pub const fn bytes(&self) -> [u8; RECORD_ID_LEN] {
        self.0
    }

    /// Parse a 24-character hexadecimal string.
    pub fn parse(value: &str) -> Result<Self, RecordIdError> {
        if value.len() != RECORD_ID_LEN * 2 {
            return Err(RecordIdError::WrongLength {
                length: value.chars().count(),
            });
        }
        let mut bytes = [0_u8; RECORD_ID_LEN];
        hex::decode_to_slice(value, &mut bytes).map_err(|_| RecordIdError::InvalidHex)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for reference fields: `Option<RecordId>` where the unset
/// value travels as the empty string.
///
/// Deserialisation accepts `""`, `null` or a valid identifier; anything else is
/// a decode error.
pub mod reference {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::RecordId;

    /// Serialise an unset reference as `""`.
    pub fn serialize<S: Serializer>(
        value: &Option<RecordId>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(id) => serializer.collect_str(id),
            None => serializer.serialize_str(""),
        }
    }

    /// Deserialise `""` and `null` to `None`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<RecordId>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(value) => RecordId::parse(value)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
