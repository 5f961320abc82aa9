//! Scalar field of secp256k1, i.e. integers modulo the group order
//! n = 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141

use std::sync::OnceLock;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::CurveError;
use crate::field::{biguint_from_limbs, prime_field};
use crate::group::ScalarBits;

// Group order, little-endian limbs
const MODULUS: [u64; 4] = [
    0xbfd25e8cd0364141,
    0xbaaedce6af48a03b,
    0xfffffffffffffffe,
    0xffffffffffffffff,
];

/// Scalar field element for the curve.
///
/// Serializes as its canonical 32-byte big-endian encoding.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "[u8; 32]", try_from = "[u8; 32]")]
pub struct ScalarField(BigUint);

fn modulus() -> &'static BigUint {
    static N: OnceLock<BigUint> = OnceLock::new();
    N.get_or_init(|| biguint_from_limbs(MODULUS))
}

prime_field!(ScalarField, modulus);

impl ScalarBits for ScalarField {
    fn to_u64_limbs(&self) -> [u64; 4] {
        let mut limbs = [0u64; 4];
        for (limb, digit) in limbs.iter_mut().zip(self.0.to_u64_digits()) {
            *limb = digit;
        }
        limbs
    }
}

impl From<ScalarField> for [u8; 32] {
    fn from(scalar: ScalarField) -> Self {
        scalar.to_bytes()
    }
}

impl TryFrom<[u8; 32]> for ScalarField {
    type Error = CurveError;

    fn try_from(bytes: [u8; 32]) -> Result<Self, Self::Error> {
        ScalarField::from_canonical_bytes(&bytes).ok_or(CurveError::ScalarOutOfRange)
    }
}
