//! Value identifiers
//!
//! A [`ValueId`] is the 32-byte content hash of the block a proposal or
//! vote commits to.

use crate::{Result, SignGuardError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Length in bytes of a value identifier.
pub const VALUE_ID_LEN: usize = 32;

/// Fixed-size content hash identifying a block/value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId(pub [u8; VALUE_ID_LEN]);

impl ValueId {
    /// Wrap raw hash bytes
    pub fn from_bytes(bytes: [u8; VALUE_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw hash bytes
    pub fn as_bytes(&self) -> &[u8; VALUE_ID_LEN] {
        &self.0
    }

    /// Lowercase hex rendering
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a hex string of exactly 64 characters
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)
            .map_err(|e| SignGuardError::invalid(format!("value id is not hex: {e}")))?;
        Self::try_from(bytes.as_slice())
    }
}

impl TryFrom<&[u8]> for ValueId {
    type Error = SignGuardError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let array: [u8; VALUE_ID_LEN] = bytes.try_into().map_err(|_| {
            SignGuardError::invalid(format!(
                "value id must be {VALUE_ID_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }
}

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueId({}…)", hex::encode(&self.0[..6]))
    }
}

impl Serialize for ValueId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ValueId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ValueId::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Kind of value a consensus lock commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockValueType {
    /// A block hash
    #[default]
    Block,
}

impl fmt::Display for LockValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockValueType::Block => f.write_str("block"),
        }
    }
}
