//! Error types for ring assembly and ring signing.

use curve::CurveError;
use thiserror::Error;

/// Result type alias for ring signature operations.
pub type Result<T> = std::result::Result<T, RingError>;

/// Errors that can occur while building rings or producing signatures.
///
/// Verification never returns these; it answers `false` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingError {
    /// Malformed hex or a byte string of the wrong length.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Bytes of the right shape that do not form a usable key.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The effective ring has fewer than two members.
    #[error("Invalid ring size: {0} (at least 2 members required)")]
    InvalidRingSize(usize),

    /// The same public key appears more than once in a ring.
    #[error("Duplicate ring member: {0}")]
    DuplicateMember(String),

    /// Decoy generation hit its safety bound before filling the ring.
    #[error("Exhausted {attempts} decoy attempts with {members} of {target} members")]
    ExhaustedAttempts {
        attempts: usize,
        members: usize,
        target: usize,
    },

    /// A commitment landed on the point at infinity during signing.
    ///
    /// This requires hitting a specific scalar out of ~2^256 and is not
    /// expected in practice.
    #[error("Commitment is the point at infinity")]
    InvalidPoint,

    /// The operating system could not provide secure randomness.
    #[error("Secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    /// No curve backend is available; signing is refused rather than faked.
    #[error("Cryptographic backend unavailable")]
    BackendUnavailable,
}

impl From<CurveError> for RingError {
    fn from(err: CurveError) -> Self {
        match err {
            CurveError::InvalidLength { .. } | CurveError::ScalarOutOfRange => {
                RingError::InvalidEncoding(err.to_string())
            }
            CurveError::InvalidPrefix(_) | CurveError::NonCanonical | CurveError::NotOnCurve => {
                RingError::InvalidKey(err.to_string())
            }
        }
    }
}

impl From<hex::FromHexError> for RingError {
    fn from(err: hex::FromHexError) -> Self {
        RingError::InvalidEncoding(err.to_string())
    }
}
