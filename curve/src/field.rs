//! Arithmetic shared by the two prime fields of secp256k1.
//!
//! Both fields are thin wrappers around a reduced `BigUint`. Operations are
//! variable time.

use num_bigint::BigUint;

/// Builds a `BigUint` from little-endian `u64` limbs.
pub(crate) fn biguint_from_limbs(limbs: [u64; 4]) -> BigUint {
    let mut bytes = Vec::with_capacity(32);
    for &limb in &limbs {
        bytes.extend_from_slice(&limb.to_le_bytes());
    }
    BigUint::from_bytes_le(&bytes)
}

/// Big-endian encoding left-padded to 32 bytes. `value` must be below 2^256.
pub(crate) fn to_bytes32(value: &BigUint) -> [u8; 32] {
    let bytes = value.to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}

/// Implements the common constructors and `core::ops` traits for a prime
/// field newtype `$name(BigUint)` whose modulus is returned by `$modulus()`.
macro_rules! prime_field {
    ($name:ident, $modulus:path) => {
        impl $name {
            /// The additive identity.
            pub fn zero() -> Self {
                $name(BigUint::default())
            }

            /// The multiplicative identity.
            pub fn one() -> Self {
                $name(BigUint::from(1u32))
            }

            /// The field modulus.
            pub fn modulus() -> &'static BigUint {
                $modulus()
            }

            /// Creates an element from a small integer.
            pub fn from_canonical_u64(val: u64) -> Self {
                $name(BigUint::from(val) % $modulus())
            }

            /// Creates an element from little-endian limbs, reducing if needed.
            pub fn from_limbs(limbs: [u64; 4]) -> Self {
                $name(crate::field::biguint_from_limbs(limbs) % $modulus())
            }

            /// Parses a big-endian 32-byte value, rejecting anything not below the modulus.
            pub fn from_canonical_bytes(bytes: &[u8; 32]) -> Option<Self> {
                let value = BigUint::from_bytes_be(bytes);
                if value < *$modulus() {
                    Some($name(value))
                } else {
                    None
                }
            }

            /// Interprets a big-endian 32-byte value as an integer and reduces it.
            pub fn from_bytes_mod_order(bytes: &[u8; 32]) -> Self {
                $name(BigUint::from_bytes_be(bytes) % $modulus())
            }

            /// Canonical big-endian 32-byte encoding.
            pub fn to_bytes(&self) -> [u8; 32] {
                crate::field::to_bytes32(&self.0)
            }

            pub fn as_biguint(&self) -> &BigUint {
                &self.0
            }

            #[inline]
            pub fn is_zero(&self) -> bool {
                self.0.bits() == 0
            }

            #[inline]
            pub fn is_odd(&self) -> bool {
                self.0.bit(0)
            }

            pub fn square(&self) -> Self {
                self * self
            }

            /// Variable-time exponentiation.
            pub fn pow_vartime(&self, exp: &BigUint) -> Self {
                $name(self.0.modpow(exp, $modulus()))
            }

            /// Multiplicative inverse via Fermat's little theorem: `a^{m-2}`.
            pub fn inverse(&self) -> Option<Self> {
                if self.is_zero() {
                    return None;
                }
                let exp = $modulus() - BigUint::from(2u32);
                Some(self.pow_vartime(&exp))
            }
        }

        impl core::ops::Add<&$name> for &$name {
            type Output = $name;

            fn add(self, rhs: &$name) -> $name {
                $name((&self.0 + &rhs.0) % $modulus())
            }
        }

        impl core::ops::Add for $name {
            type Output = $name;

            fn add(self, rhs: $name) -> $name {
                &self + &rhs
            }
        }

        impl core::ops::Sub<&$name> for &$name {
            type Output = $name;

            fn sub(self, rhs: &$name) -> $name {
                $name((&self.0 + $modulus() - &rhs.0) % $modulus())
            }
        }

        impl core::ops::Sub for $name {
            type Output = $name;

            fn sub(self, rhs: $name) -> $name {
                &self - &rhs
            }
        }

        impl core::ops::Mul<&$name> for &$name {
            type Output = $name;

            fn mul(self, rhs: &$name) -> $name {
                $name((&self.0 * &rhs.0) % $modulus())
            }
        }

        impl core::ops::Mul for $name {
            type Output = $name;

            fn mul(self, rhs: $name) -> $name {
                &self * &rhs
            }
        }

        impl core::ops::Neg for &$name {
            type Output = $name;

            fn neg(self) -> $name {
                if self.is_zero() {
                    $name::zero()
                } else {
                    $name($modulus() - &self.0)
                }
            }
        }

        impl core::ops::Neg for $name {
            type Output = $name;

            fn neg(self) -> $name {
                -&self
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "0x{:064x}", self.0)
            }
        }
    };
}

pub(crate) use prime_field;
