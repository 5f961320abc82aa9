//! Base field of secp256k1. p = 2^256 - 2^32 - 977
//!
//! Since p ≡ 3 (mod 4), square roots are a single exponentiation by (p+1)/4.

use std::sync::OnceLock;

use num_bigint::BigUint;

use crate::field::{biguint_from_limbs, prime_field};

// Field modulus: p = 0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f
const MODULUS: [u64; 4] = [
    0xfffffffefffffc2f,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
];

/// Element of the secp256k1 base field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseField(BigUint);

fn modulus() -> &'static BigUint {
    static P: OnceLock<BigUint> = OnceLock::new();
    P.get_or_init(|| biguint_from_limbs(MODULUS))
}

fn legendre_exponent() -> &'static BigUint {
    static E: OnceLock<BigUint> = OnceLock::new();
    E.get_or_init(|| (modulus() - BigUint::from(1u32)) >> 1u32)
}

fn sqrt_exponent() -> &'static BigUint {
    static E: OnceLock<BigUint> = OnceLock::new();
    E.get_or_init(|| (modulus() + BigUint::from(1u32)) >> 2u32)
}

prime_field!(BaseField, modulus);

impl BaseField {
    /// Euler's criterion: `self^((p-1)/2) == 1`.
    ///
    /// Zero is not treated as a residue.
    pub fn is_quadratic_residue(&self) -> bool {
        self.pow_vartime(legendre_exponent()) == Self::one()
    }

    /// Returns a square root of `self`, or `None` if `self` is not a square.
    ///
    /// The returned root is `self^((p+1)/4)`; its negation is the other root.
    pub fn sqrt(&self) -> Option<Self> {
        let root = self.pow_vartime(sqrt_exponent());
        if root.square() == *self {
            Some(root)
        } else {
            None
        }
    }
}
