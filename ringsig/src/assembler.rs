//! Ring assembly: the requester's key plus cohort members and decoys,
//! shuffled once so position reveals nothing.

use chrono::Utc;
use parking_lot::RwLock;
use rand::CryptoRng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::constants::{DEFAULT_RING_SIZE, MAX_DECOY_ATTEMPTS, MIN_RING_SIZE};
use crate::errors::{Result, RingError};
use crate::keys::{PublicKey, generate_keypair, validate_public_key};
use crate::ring::{Cohort, Ring, RingId};

/// Tunables for ring assembly.
///
/// Every field has a default, so a host service can embed this in its own
/// configuration file and override only what it needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Ring size used when a caller does not specify one.
    pub default_ring_size: usize,
    /// Safety bound on decoy keypair generations per ring.
    pub max_decoy_attempts: usize,
    /// Display names a new ring may be labelled with. Empty disables naming.
    pub group_names: Vec<String>,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            default_ring_size: DEFAULT_RING_SIZE,
            max_decoy_attempts: MAX_DECOY_ATTEMPTS,
            group_names: [
                "Lightning Runners",
                "Whirlwind Squad",
                "Dawn Warriors",
                "Night Owls",
                "Weekend Heroes",
                "Marathon Camp",
                "Healthy Living",
                "City Explorers",
                "Rhythm Masters",
                "Endurance Kings",
                "Speed Stars",
                "Never Quit",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
        }
    }
}

/// A candidate ring member as supplied by external storage. The key bytes
/// are untrusted until validated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub cohort: Cohort,
    #[serde(with = "hex")]
    pub public_key: Vec<u8>,
}

impl PoolEntry {
    pub fn new(cohort: Cohort, public_key: impl Into<Vec<u8>>) -> Self {
        Self {
            cohort,
            public_key: public_key.into(),
        }
    }
}

/// Sink for decoy keys so that later rings can reuse them as
/// real-looking members.
///
/// Each registration is independent; a failure is logged and does not
/// affect the ring being assembled.
pub trait DecoyRegistry {
    fn register_decoy(&self, cohort: &Cohort, key: &PublicKey) -> Result<()>;
}

/// In-memory candidate pool, safe to share between concurrent assemblers.
///
/// Duplicate registrations are kept; they are harmless because rings are
/// keyed by their own identifier.
#[derive(Debug, Default)]
pub struct MemoryPool {
    entries: RwLock<Vec<PoolEntry>>,
}

impl MemoryPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, entry: PoolEntry) {
        self.entries.write().push(entry);
    }

    /// Copy of the current entries, suitable for passing to an assembler.
    pub fn snapshot(&self) -> Vec<PoolEntry> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl DecoyRegistry for MemoryPool {
    fn register_decoy(&self, cohort: &Cohort, key: &PublicKey) -> Result<()> {
        self.insert(PoolEntry::new(cohort.clone(), key.as_bytes().to_vec()));
        Ok(())
    }
}

/// Builds rings according to an [`AssemblerConfig`], optionally feeding
/// generated decoys back into a [`DecoyRegistry`].
pub struct RingAssembler<'a> {
    config: &'a AssemblerConfig,
    registry: Option<&'a dyn DecoyRegistry>,
}

impl<'a> RingAssembler<'a> {
    pub fn new(config: &'a AssemblerConfig) -> Self {
        Self {
            config,
            registry: None,
        }
    }

    pub fn with_registry(mut self, registry: &'a dyn DecoyRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Assembles a ring of exactly `target_size` members around `requester`.
    ///
    /// 1. The requester key must validate, otherwise `InvalidKey`.
    /// 2. Pool entries in `cohort` (excluding the requester, duplicates and
    ///    anything that fails validation) fill up to `target_size - 1` slots.
    /// 3. Remaining slots get fresh decoy keys, at most
    ///    `max_decoy_attempts` generations, otherwise `ExhaustedAttempts`.
    /// 4. The complete member list is shuffled once.
    /// 5. The ring gets a fresh id and the cohort label.
    ///
    /// Decoys are registered only once the ring is complete, so a failed
    /// assembly leaves no trace in the pool.
    #[instrument(skip_all, fields(cohort = %cohort, target_size = target_size))]
    pub fn assemble<R: CryptoRng + ?Sized>(
        &self,
        rng: &mut R,
        requester: &[u8],
        cohort: &Cohort,
        pool: &[PoolEntry],
        target_size: usize,
    ) -> Result<Ring> {
        let requester = PublicKey::from_bytes(requester)
            .map_err(|err| RingError::InvalidKey(format!("requester key rejected: {err}")))?;

        if target_size < MIN_RING_SIZE {
            return Err(RingError::InvalidRingSize(target_size));
        }

        let mut members = Vec::with_capacity(target_size);
        members.push(requester);

        for entry in pool.iter().filter(|entry| entry.cohort == *cohort) {
            if members.len() == target_size {
                break;
            }
            match PublicKey::from_bytes(&entry.public_key) {
                Ok(key) if members.contains(&key) => {}
                Ok(key) => members.push(key),
                Err(err) => debug!(%err, "Skipping invalid pool entry"),
            }
        }
        let from_pool = members.len() - 1;

        let mut decoys = Vec::new();
        let mut attempts = 0;
        while members.len() < target_size {
            if attempts == self.config.max_decoy_attempts {
                warn!(attempts, members = members.len(), "Decoy generation exhausted");
                return Err(RingError::ExhaustedAttempts {
                    attempts,
                    members: members.len(),
                    target: target_size,
                });
            }
            attempts += 1;

            // The secret half of a decoy is dropped here and never stored.
            let decoy = generate_keypair(rng).public;
            if !validate_public_key(decoy.as_bytes()) || members.contains(&decoy) {
                continue;
            }
            decoys.push(decoy.clone());
            members.push(decoy);
        }

        members.shuffle(rng);

        let created_at = Utc::now();
        let id = RingId::generate(rng, created_at);
        let group_name = self.config.group_names.choose(rng).cloned();
        let ring = Ring::new(id, cohort.clone(), group_name, members, created_at);

        if let Some(registry) = self.registry {
            for decoy in &decoys {
                if let Err(err) = registry.register_decoy(cohort, decoy) {
                    warn!(%err, decoy = %decoy, "Failed to register decoy");
                }
            }
        }

        info!(
            ring_id = %ring.id(),
            size = ring.size(),
            from_pool,
            decoys = decoys.len(),
            "Assembled ring"
        );

        Ok(ring)
    }
}

/// Assembles a ring with the default configuration and no decoy registry.
pub fn assemble_ring<R: CryptoRng + ?Sized>(
    rng: &mut R,
    requester: &[u8],
    cohort: &Cohort,
    pool: &[PoolEntry],
    target_size: usize,
) -> Result<Ring> {
    RingAssembler::new(&AssemblerConfig::default()).assemble(rng, requester, cohort, pool, target_size)
}
