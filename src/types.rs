/// Shared types used across the codebase

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Length of a record id in hex characters (12 bytes)
pub const RECORD_ID_LEN: usize = 24;

/// 24-character lowercase hex record identifier
///
/// Document-store style id: a 4-byte creation timestamp followed by
/// 8 random bytes. The all-zero value is the nil id and doubles as the
/// identifier kind's zero value during body decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(transparent)]
pub struct RecordId(String);

#[derive(Debug, thiserror::Error)]
#[error("invalid record id: expected {RECORD_ID_LEN} hex characters")]
pub struct InvalidRecordId;

impl RecordId {
    /// Generate a fresh id: unix seconds (big-endian) + 8 random bytes
    pub fn new() -> Self {
        use fmt::Write;

        let secs = chrono::Utc::now().timestamp() as u32;
        let mut tail = [0u8; 8];
        rand::thread_rng().fill_bytes(&mut tail);

        let mut hex = String::with_capacity(RECORD_ID_LEN);
        for b in secs.to_be_bytes().iter().chain(tail.iter()) {
            let _ = write!(hex, "{:02x}", b);
        }
        RecordId(hex)
    }

    /// The all-zero nil id
    pub fn nil() -> Self {
        RecordId("0".repeat(RECORD_ID_LEN))
    }

    pub fn is_nil(&self) -> bool {
        self.0.bytes().all(|b| b == b'0')
    }

    /// Parse a 24-character hex string; uppercase input is normalized
    pub fn parse(value: &str) -> Result<Self, InvalidRecordId> {
        if value.len() == RECORD_ID_LEN && value.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(RecordId(value.to_ascii_lowercase()))
        } else {
            Err(InvalidRecordId)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::nil()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = InvalidRecordId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RecordId::parse(&raw).map_err(serde::de::Error::custom)
    }
}
