use rand::CryptoRng;

use crate::{BaseField, ScalarField};

/// Helper trait for sampling random field elements from a secure source.
pub trait RandomField: Sized {
    /// Uniform element of the field.
    fn random<R: CryptoRng + ?Sized>(rng: &mut R) -> Self;

    /// Uniform nonzero element of the field.
    fn random_nonzero<R: CryptoRng + ?Sized>(rng: &mut R) -> Self;
}

macro_rules! impl_random_field {
    ($name:ident) => {
        impl RandomField for $name {
            // Rejection sampling over 32-byte strings; both moduli are within
            // 2^-127 of 2^256, so retries are practically never taken.
            fn random<R: CryptoRng + ?Sized>(rng: &mut R) -> Self {
                loop {
                    let mut bytes = [0u8; 32];
                    rng.fill_bytes(&mut bytes);
                    if let Some(value) = $name::from_canonical_bytes(&bytes) {
                        return value;
                    }
                }
            }

            fn random_nonzero<R: CryptoRng + ?Sized>(rng: &mut R) -> Self {
                loop {
                    let value = Self::random(rng);
                    if !value.is_zero() {
                        return value;
                    }
                }
            }
        }
    };
}

impl_random_field!(BaseField);
impl_random_field!(ScalarField);
