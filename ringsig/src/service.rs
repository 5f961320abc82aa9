//! Hex functional surface for a host service.
//!
//! Every binary value crossing this boundary is lowercase, fixed-width hex:
//! 64 chars for secret keys, challenges and scalars, 66 chars for public
//! keys. Inputs are accepted in either case.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assembler::{AssemblerConfig, DecoyRegistry, PoolEntry, RingAssembler};
use crate::backend::Backend;
use crate::errors::{Result, RingError};
use crate::keys::{PublicKey, SecretKey};
use crate::ring::{Cohort, Ring};
use crate::signatures::{Signature, SignatureHex};

/// Output of [`RingService::generate_keypair`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeypairHex {
    pub private_key: String,
    pub public_key: String,
}

/// Output of [`RingService::assemble_ring`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingHex {
    pub ring_id: String,
    pub members: Vec<String>,
    pub cohort: String,
    pub group_name: Option<String>,
}

impl From<&Ring> for RingHex {
    fn from(ring: &Ring) -> Self {
        Self {
            ring_id: ring.id().to_string(),
            members: ring.members().iter().map(PublicKey::to_hex).collect(),
            cohort: ring.cohort().to_string(),
            group_name: ring.group_name().map(str::to_owned),
        }
    }
}

/// Output of [`RingService::sign`]: the signature plus the effective ring,
/// which is one longer than the input when the signer had to be appended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedHex {
    pub c0: String,
    pub s: Vec<String>,
    pub ring_members: Vec<String>,
}

impl SignedHex {
    pub fn signature(&self) -> SignatureHex {
        SignatureHex {
            c0: self.c0.clone(),
            s: self.s.clone(),
        }
    }
}

/// Stateless entry point for the surrounding service.
///
/// Holds only configuration; randomness is drawn fresh from the OS on every
/// call that needs it.
#[derive(Clone, Debug, Default)]
pub struct RingService {
    backend: Backend,
    config: AssemblerConfig,
}

impl RingService {
    pub fn new(backend: Backend, config: AssemblerConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    pub fn generate_keypair(&self) -> Result<KeypairHex> {
        let mut rng = os_rng()?;
        let keypair = self.backend.generate_keypair(&mut rng)?;
        Ok(KeypairHex {
            private_key: keypair.secret.to_hex(),
            public_key: keypair.public.to_hex(),
        })
    }

    /// Builds a ring for `requester_pub` from hex pool entries of the given
    /// cohort. Entries that are not valid hex are skipped like any other
    /// invalid pool key. Without a `target_size` the configured default
    /// ring size is used.
    pub fn assemble_ring<S: AsRef<str>>(
        &self,
        requester_pub: &str,
        cohort: &str,
        pool: &[S],
        target_size: Option<usize>,
    ) -> Result<RingHex> {
        self.assemble_ring_with(requester_pub, cohort, pool, target_size, None)
    }

    /// Like [`assemble_ring`](Self::assemble_ring), but registers freshly
    /// generated decoys into `registry` once the ring is complete.
    pub fn assemble_ring_with<S: AsRef<str>>(
        &self,
        requester_pub: &str,
        cohort: &str,
        pool: &[S],
        target_size: Option<usize>,
        registry: Option<&dyn DecoyRegistry>,
    ) -> Result<RingHex> {
        let target_size = target_size.unwrap_or(self.config.default_ring_size);
        let requester = hex::decode(requester_pub)
            .map_err(|err| RingError::InvalidKey(format!("requester key rejected: {err}")))?;
        let cohort = Cohort::new(cohort);

        let entries: Vec<PoolEntry> = pool
            .iter()
            .filter_map(|key| match hex::decode(key.as_ref()) {
                Ok(bytes) => Some(PoolEntry::new(cohort.clone(), bytes)),
                Err(err) => {
                    debug!(%err, "Skipping pool entry with malformed hex");
                    None
                }
            })
            .collect();

        let mut assembler = RingAssembler::new(&self.config);
        if let Some(registry) = registry {
            assembler = assembler.with_registry(registry);
        }

        let mut rng = os_rng()?;
        let ring = assembler.assemble(&mut rng, &requester, &cohort, &entries, target_size)?;
        Ok(RingHex::from(&ring))
    }

    pub fn sign<S: AsRef<str>>(
        &self,
        message: &[u8],
        private_key: &str,
        ring_members: &[S],
    ) -> Result<SignedHex> {
        let secret = SecretKey::from_hex(private_key)?;
        let ring = decode_members(ring_members)?;

        let mut rng = os_rng()?;
        let signed = self.backend.sign(&mut rng, message, &ring, &secret)?;
        let SignatureHex { c0, s } = signed.signature.to_hex();

        Ok(SignedHex {
            c0,
            s,
            ring_members: signed.ring.iter().map(PublicKey::to_hex).collect(),
        })
    }

    /// Never fails: undecodable members, challenge or scalars yield `false`.
    pub fn verify<S: AsRef<str>, T: AsRef<str>>(
        &self,
        message: &[u8],
        ring_members: &[S],
        c0: &str,
        s: &[T],
    ) -> bool {
        let decoded = decode_members(ring_members)
            .and_then(|ring| Signature::from_hex(c0, s).map(|sig| (ring, sig)));

        match decoded {
            Ok((ring, signature)) => self.backend.verify(message, &ring, &signature),
            Err(err) => {
                debug!(%err, "Rejecting undecodable signature input");
                false
            }
        }
    }
}

fn decode_members<S: AsRef<str>>(members: &[S]) -> Result<Vec<PublicKey>> {
    members
        .iter()
        .map(|member| PublicKey::from_hex(member.as_ref()))
        .collect()
}

fn os_rng() -> Result<StdRng> {
    StdRng::try_from_os_rng().map_err(|err| RingError::RandomnessUnavailable(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::MemoryPool;

    fn service() -> RingService {
        RingService::default()
    }

    fn is_lower_hex(s: &str, len: usize) -> bool {
        s.len() == len && s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    }

    #[test]
    fn test_keypair_hex_shape() {
        let keypair = service().generate_keypair().expect("keypair");
        assert!(is_lower_hex(&keypair.private_key, 64));
        assert!(is_lower_hex(&keypair.public_key, 66));
        assert!(keypair.public_key.starts_with("02") || keypair.public_key.starts_with("03"));
    }

    #[test]
    fn test_assemble_ring_skips_malformed_pool_entries() {
        let svc = service();
        let requester = svc.generate_keypair().expect("keypair").public_key;
        let peer = svc.generate_keypair().expect("keypair").public_key;
        let pool = vec!["zz".to_string(), "02abcd".to_string(), peer.clone()];

        let ring = svc.assemble_ring(&requester, "beginner", &pool, Some(4)).expect("ring");
        assert_eq!(ring.members.len(), 4);
        assert!(ring.members.contains(&requester));
        assert!(ring.members.contains(&peer));
        assert!(ring.members.iter().all(|m| is_lower_hex(m, 66)));
        assert!(ring.ring_id.starts_with("ring_"));
        assert_eq!(ring.cohort, "beginner");
    }

    #[test]
    fn test_assemble_ring_registers_decoys() {
        let svc = service();
        let pool = MemoryPool::new();
        let requester = svc.generate_keypair().expect("keypair").public_key;

        let ring = svc
            .assemble_ring_with(&requester, "elite", &[] as &[String], Some(3), Some(&pool))
            .expect("ring");
        assert_eq!(ring.members.len(), 3);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_assemble_ring_default_size() {
        let svc = service();
        let requester = svc.generate_keypair().expect("keypair").public_key;
        let ring = svc
            .assemble_ring(&requester, "beginner", &[] as &[String], None)
            .expect("ring");
        assert_eq!(ring.members.len(), svc.config().default_ring_size);
    }

    #[test]
    fn test_assemble_ring_rejects_bad_requester() {
        let err = service()
            .assemble_ring("not hex", "beginner", &[] as &[String], Some(3))
            .unwrap_err();
        assert!(matches!(err, RingError::InvalidKey(_)));
    }

    #[test]
    fn test_sign_and_verify_hex() {
        let svc = service();
        let keypairs: Vec<_> = (0..3).map(|_| svc.generate_keypair().expect("keypair")).collect();
        let ring: Vec<String> = keypairs.iter().map(|kp| kp.public_key.clone()).collect();

        let signed = svc.sign(b"hello", &keypairs[1].private_key, &ring).expect("sign");
        assert_eq!(signed.ring_members, ring);
        assert!(is_lower_hex(&signed.c0, 64));
        assert_eq!(signed.s.len(), 3);
        assert!(signed.s.iter().all(|s| is_lower_hex(s, 64)));

        assert!(svc.verify(b"hello", &ring, &signed.c0, &signed.s));
        assert!(!svc.verify(b"hellO", &ring, &signed.c0, &signed.s));

        let upper: Vec<String> = ring.iter().map(|m| m.to_uppercase()).collect();
        assert!(svc.verify(b"hello", &upper, &signed.c0.to_uppercase(), &signed.s));
    }

    #[test]
    fn test_verify_rejects_undecodable_input() {
        let svc = service();
        let keypairs: Vec<_> = (0..2).map(|_| svc.generate_keypair().expect("keypair")).collect();
        let ring: Vec<String> = keypairs.iter().map(|kp| kp.public_key.clone()).collect();
        let signed = svc.sign(b"m", &keypairs[0].private_key, &ring).expect("sign");

        assert!(!svc.verify(b"m", &ring, "xyz", &signed.s));
        assert!(!svc.verify(b"m", &ring, &signed.c0, &["00"]));
        assert!(!svc.verify(b"m", &["02ff"], &signed.c0, &signed.s));
        // Scalar at the group order is out of range.
        let order = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
        assert!(!svc.verify(b"m", &ring, &signed.c0, &[order, signed.s[1].as_str()]));
    }

    #[test]
    fn test_sign_rejects_bad_private_key() {
        let svc = service();
        let ring = vec![svc.generate_keypair().expect("keypair").public_key];
        let zero = "0".repeat(64);

        assert!(matches!(svc.sign(b"m", &zero, &ring), Err(RingError::InvalidKey(_))));
        assert!(matches!(svc.sign(b"m", "abcd", &ring), Err(RingError::InvalidEncoding(_))));
    }

    #[test]
    fn test_sign_rejects_repeated_member() {
        let svc = service();
        let keypair = svc.generate_keypair().expect("keypair");
        let ring = vec![keypair.public_key.clone(), keypair.public_key.to_uppercase()];

        assert!(matches!(
            svc.sign(b"m", &keypair.private_key, &ring),
            Err(RingError::DuplicateMember(_))
        ));
    }

    #[test]
    fn test_unavailable_service_fails_closed() {
        let svc = RingService::new(Backend::Unavailable, AssemblerConfig::default());
        assert_eq!(svc.generate_keypair(), Err(RingError::BackendUnavailable));

        let real = service();
        let keypairs: Vec<_> = (0..2).map(|_| real.generate_keypair().expect("keypair")).collect();
        let ring: Vec<String> = keypairs.iter().map(|kp| kp.public_key.clone()).collect();
        let signed = real.sign(b"m", &keypairs[0].private_key, &ring).expect("sign");

        assert_eq!(
            svc.sign(b"m", &keypairs[0].private_key, &ring),
            Err(RingError::BackendUnavailable)
        );
        assert!(!svc.verify(b"m", &ring, &signed.c0, &signed.s));
    }
}
