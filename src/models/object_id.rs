// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! 12-byte object identifiers rendered as 24 hex characters.
//!
//! Layout: 4-byte big-endian unix timestamp, 5 bytes of per-process
//! randomness, 3-byte big-endian counter. Identifiers minted by one process
//! therefore sort in creation order, which the stores rely on for listing.

use ring::rand::{SecureRandom, SystemRandom};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

const COUNTER_MASK: u32 = 0x00ff_ffff;

/// Unique, system-assigned record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; 12]);

/// Returned when a string is not exactly 24 hex characters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid object id: expected 24 hex characters")]
pub struct InvalidObjectId(pub String);

struct ProcessSeed {
    unique: [u8; 5],
    counter: AtomicU32,
}

fn process_seed() -> &'static ProcessSeed {
    static SEED: OnceLock<ProcessSeed> = OnceLock::new();
    SEED.get_or_init(|| {
        let rng = SystemRandom::new();
        let mut unique = [0u8; 5];
        let mut start = [0u8; 4];
        // Fall back to fixed values if the OS RNG is unavailable; uniqueness
        // within the process still comes from the counter.
        if rng.fill(&mut unique).is_err() || rng.fill(&mut start).is_err() {
            tracing::warn!("System RNG unavailable, object ids use a fixed process seed");
        }
        ProcessSeed {
            unique,
            // Start in the lower half so the counter does not wrap early.
            counter: AtomicU32::new(u32::from_be_bytes(start) & (COUNTER_MASK >> 1)),
        }
    })
}

impl ObjectId {
    /// Mint a new identifier for the current time.
    pub fn new() -> Self {
        let secs = chrono::Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        Self::from_parts(secs, process_seed())
    }

    fn from_parts(secs: u32, seed: &ProcessSeed) -> Self {
        let count = seed.counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&seed.unique);
        bytes[9..12].copy_from_slice(&count.to_be_bytes()[1..4]);
        Self(bytes)
    }

    /// Parse the canonical 24-character hex form (either case).
    pub fn parse_str(s: &str) -> Result<Self, InvalidObjectId> {
        if s.len() != 24 {
            return Err(InvalidObjectId(s.to_string()));
        }
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| InvalidObjectId(s.to_string()))?;
        Ok(Self(bytes))
    }

    /// Lowercase hex rendering, used on the wire and as the document id.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Seconds since the unix epoch at which this id was minted.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = InvalidObjectId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_str(&raw).map_err(de::Error::custom)
    }
}
