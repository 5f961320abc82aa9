//! Rings: ordered anonymity sets of public keys.

use core::fmt;

use chrono::{DateTime, Utc};
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::constants::{MIN_RING_SIZE, RING_ID_PREFIX};
use crate::errors::{Result, RingError};
use crate::keys::PublicKey;

/// Opaque ring identifier, minted as `ring_<unix-millis>_<8 hex>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RingId(String);

impl RingId {
    /// Mints a fresh identifier from the current time and 32 random bits.
    pub fn generate<R: CryptoRng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Self {
        let suffix: u32 = rng.random();
        RingId(format!(
            "{RING_ID_PREFIX}_{}_{suffix:08x}",
            now.timestamp_millis()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RingId {
    fn from(id: &str) -> Self {
        RingId(id.to_string())
    }
}

impl From<String> for RingId {
    fn from(id: String) -> Self {
        RingId(id)
    }
}

impl fmt::Display for RingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cohort label used to pick semantically relevant ring members
/// (for example a skill tier).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cohort(String);

impl Cohort {
    pub fn new(label: impl Into<String>) -> Self {
        Cohort(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Cohort {
    fn from(label: &str) -> Self {
        Cohort(label.to_string())
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An assembled ring.
///
/// Immutable once built: members are only exposed as a slice. Member order
/// is part of what a signature authenticates, so the ring must be stored
/// and handed back exactly as assembled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RingRecord")]
pub struct Ring {
    id: RingId,
    cohort: Cohort,
    group_name: Option<String>,
    members: Vec<PublicKey>,
    created_at: DateTime<Utc>,
}

impl Ring {
    pub(crate) fn new(
        id: RingId,
        cohort: Cohort,
        group_name: Option<String>,
        members: Vec<PublicKey>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            cohort,
            group_name,
            members,
            created_at,
        }
    }

    /// Rebuilds a ring from a persisted record.
    ///
    /// Fails with `InvalidRingSize` if fewer than two members are given.
    pub fn from_parts(
        id: RingId,
        cohort: Cohort,
        group_name: Option<String>,
        members: Vec<PublicKey>,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        if members.len() < MIN_RING_SIZE {
            return Err(RingError::InvalidRingSize(members.len()));
        }
        Ok(Self::new(id, cohort, group_name, members, created_at))
    }

    pub fn id(&self) -> &RingId {
        &self.id
    }

    pub fn cohort(&self) -> &Cohort {
        &self.cohort
    }

    /// Display name for the ring, if one was assigned.
    pub fn group_name(&self) -> Option<&str> {
        self.group_name.as_deref()
    }

    /// Members in signing order.
    pub fn members(&self) -> &[PublicKey] {
        &self.members
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn contains(&self, key: &PublicKey) -> bool {
        self.members.contains(key)
    }
}

/// Stored shape of a [`Ring`]. Deserialization goes through
/// [`Ring::from_parts`] so persisted records get the same size check.
#[derive(Deserialize)]
struct RingRecord {
    id: RingId,
    cohort: Cohort,
    group_name: Option<String>,
    members: Vec<PublicKey>,
    created_at: DateTime<Utc>,
}

impl TryFrom<RingRecord> for Ring {
    type Error = RingError;

    fn try_from(record: RingRecord) -> Result<Self> {
        Ring::from_parts(
            record.id,
            record.cohort,
            record.group_name,
            record.members,
            record.created_at,
        )
    }
}

/// Concatenation of each member's compressed encoding, in ring order.
///
/// Hashing this into every challenge binds a signature to the exact ring and
/// its ordering.
pub(crate) fn encode_members(members: &[PublicKey]) -> Vec<u8> {
    members
        .iter()
        .flat_map(|member| member.as_bytes().iter().copied())
        .collect()
}
