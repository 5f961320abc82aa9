//! Constants used by the ring signature scheme and ring assembly.

/// Size of a serialized public key in bytes.
///
/// A public key is a SEC1 compressed secp256k1 point: one parity byte
/// followed by the 32-byte x-coordinate.
pub const PUBLIC_KEY_SIZE: usize = curve::COMPRESSED_POINT_SIZE;

/// Size of a serialized secret key in bytes.
pub const SECRET_KEY_SIZE: usize = 32;

/// Size of a challenge digest (SHA-256) in bytes.
pub const CHALLENGE_SIZE: usize = 32;

/// Size of a serialized response scalar in bytes.
pub const SCALAR_SIZE: usize = 32;

/// Smallest ring that still hides the signer.
pub const MIN_RING_SIZE: usize = 2;

/// Ring size used when the caller does not ask for one.
pub const DEFAULT_RING_SIZE: usize = 5;

/// Upper bound on decoy keypair generations per assembled ring.
pub const MAX_DECOY_ATTEMPTS: usize = 50;

/// Prefix of minted ring identifiers.
pub(crate) const RING_ID_PREFIX: &str = "ring";
