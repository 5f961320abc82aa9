//! Errors raised while decoding curve points and scalars.

use thiserror::Error;

/// Decoding failures. Every variant means the input bytes are not a valid
/// encoding of a curve element.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// The encoding has the wrong number of bytes.
    #[error("invalid encoding length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The compressed point prefix is neither `0x02` nor `0x03`.
    #[error("invalid point prefix: {0:#04x}")]
    InvalidPrefix(u8),

    /// The x-coordinate is not below the field modulus.
    #[error("non-canonical field element")]
    NonCanonical,

    /// `x^3 + 7` has no square root, so no point with this x exists.
    #[error("x-coordinate is not on the curve")]
    NotOnCurve,

    /// A scalar encoding is not below the group order.
    #[error("scalar out of range")]
    ScalarOutOfRange,
}
