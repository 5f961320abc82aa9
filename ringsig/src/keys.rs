//! Secret and public keys for ring signatures.

use core::fmt;

use curve::{Affine, RandomField, ScalarField};
use rand::CryptoRng;
use serde::{Deserialize, Serialize};

use crate::constants::{PUBLIC_KEY_SIZE, SECRET_KEY_SIZE};
use crate::errors::{Result, RingError};

/// A secret signing key: a scalar in `[1, n-1]`.
///
/// Secret keys never appear in rings or signatures and have no serde
/// implementation. `Debug` output is redacted.
///
/// # Example
///
/// ```
/// use ringsig::SecretKey;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let secret = SecretKey::random(&mut rng);
/// let public = secret.public_key();
/// assert_eq!(public.to_hex().len(), 66);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    scalar: ScalarField,
}

/// A public key: a finite secp256k1 point, carried together with its
/// 33-byte compressed encoding.
///
/// Either derived from a [`SecretKey`] or decoded from untrusted bytes, in
/// which case it has passed full curve validation. Serializes as a 66-char
/// lowercase hex string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PublicKey {
    point: Affine,
    encoded: [u8; PUBLIC_KEY_SIZE],
}

/// A freshly generated key pair.
#[derive(Clone, Debug)]
pub struct Keypair {
    pub secret: SecretKey,
    pub public: PublicKey,
}

impl SecretKey {
    /// Draws a secret key uniformly from `[1, n-1]`.
    pub fn random<R: CryptoRng + ?Sized>(rng: &mut R) -> Self {
        Self {
            scalar: ScalarField::random_nonzero(rng),
        }
    }

    /// Parses a 32-byte big-endian secret key.
    ///
    /// Fails with `InvalidEncoding` on a wrong length and `InvalidKey` if
    /// the value is zero or not below the group order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; SECRET_KEY_SIZE] = bytes.try_into().map_err(|_| {
            RingError::InvalidEncoding(format!(
                "secret key must be {SECRET_KEY_SIZE} bytes, got {}",
                bytes.len()
            ))
        })?;

        match ScalarField::from_canonical_bytes(&bytes) {
            Some(scalar) if !scalar.is_zero() => Ok(Self { scalar }),
            _ => Err(RingError::InvalidKey(
                "secret key must be in [1, n-1]".to_string(),
            )),
        }
    }

    /// Parses a 64-char hex secret key.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        Self::from_bytes(&hex::decode(hex_str)?)
    }

    pub fn to_bytes(&self) -> [u8; SECRET_KEY_SIZE] {
        self.scalar.to_bytes()
    }

    /// Lowercase 64-char hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derives the public key `x * G`.
    pub fn public_key(&self) -> PublicKey {
        let point = Affine::mul_generator(&self.scalar);
        // x is nonzero and G has prime order, so x * G is finite.
        PublicKey::from_point(point).unwrap_or_else(|| unreachable!("x * G is finite for x != 0"))
    }

    pub(crate) fn scalar(&self) -> &ScalarField {
        &self.scalar
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl PublicKey {
    /// Wraps a curve point; `None` for the point at infinity or a point
    /// off the curve.
    pub(crate) fn from_point(point: Affine) -> Option<Self> {
        if !point.is_on_curve() {
            return None;
        }
        let encoded = point.to_compressed()?;
        Some(Self { point, encoded })
    }

    /// Decodes and validates a 33-byte compressed public key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let point = Affine::from_compressed(bytes)?;
        Self::from_point(point)
            .ok_or_else(|| RingError::InvalidKey("point at infinity".to_string()))
    }

    /// Decodes and validates a 66-char hex public key.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        Self::from_bytes(&hex::decode(hex_str)?)
    }

    /// The canonical compressed encoding.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.encoded
    }

    /// Lowercase 66-char hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.encoded)
    }

    pub fn point(&self) -> &Affine {
        &self.point
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<PublicKey> for String {
    fn from(key: PublicKey) -> Self {
        key.to_hex()
    }
}

impl TryFrom<String> for PublicKey {
    type Error = RingError;

    fn try_from(hex_str: String) -> Result<Self> {
        PublicKey::from_hex(&hex_str)
    }
}

impl From<&SecretKey> for PublicKey {
    fn from(secret: &SecretKey) -> Self {
        secret.public_key()
    }
}

/// Generates a key pair with a secret drawn uniformly from `[1, n-1]`.
pub fn generate_keypair<R: CryptoRng + ?Sized>(rng: &mut R) -> Keypair {
    let secret = SecretKey::random(rng);
    let public = secret.public_key();
    Keypair { secret, public }
}

/// True iff `bytes` is exactly a 33-byte compressed encoding with prefix 2
/// or 3 of a point on the curve.
///
/// Every externally supplied key is filtered through this before it can
/// enter a ring.
pub fn validate_public_key(bytes: &[u8]) -> bool {
    PublicKey::from_bytes(bytes).is_ok()
}
