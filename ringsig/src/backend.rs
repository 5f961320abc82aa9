//! Cryptographic backend capability.

use rand::CryptoRng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{Result, RingError};
use crate::keys::{Keypair, PublicKey, SecretKey, generate_keypair};
use crate::signatures::Signature;
use crate::signer::{SignedMessage, sign};
use crate::verifier::verify;

/// Which curve implementation backs key generation, signing and
/// verification.
///
/// `Unavailable` stands in for a host without a working curve library. It
/// refuses every operation: keypair generation and signing return
/// [`RingError::BackendUnavailable`] and verification answers `false`. It
/// never substitutes a hash-based imitation of a signature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    #[default]
    Secp256k1,
    Unavailable,
}

impl Backend {
    pub fn is_available(self) -> bool {
        matches!(self, Backend::Secp256k1)
    }

    pub fn generate_keypair<R: CryptoRng + ?Sized>(self, rng: &mut R) -> Result<Keypair> {
        match self {
            Backend::Secp256k1 => Ok(generate_keypair(rng)),
            Backend::Unavailable => {
                warn!("Refusing keypair generation without a curve backend");
                Err(RingError::BackendUnavailable)
            }
        }
    }

    pub fn sign<R: CryptoRng + ?Sized>(
        self,
        rng: &mut R,
        message: &[u8],
        ring: &[PublicKey],
        secret: &SecretKey,
    ) -> Result<SignedMessage> {
        match self {
            Backend::Secp256k1 => sign(rng, message, ring, secret),
            Backend::Unavailable => {
                warn!("Refusing to sign without a curve backend");
                Err(RingError::BackendUnavailable)
            }
        }
    }

    pub fn verify(self, message: &[u8], ring: &[PublicKey], signature: &Signature) -> bool {
        match self {
            Backend::Secp256k1 => verify(message, ring, signature),
            Backend::Unavailable => {
                warn!("Rejecting signature without a curve backend");
                false
            }
        }
    }
}
