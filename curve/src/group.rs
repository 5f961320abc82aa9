use core::ops::{Add, Neg};

pub trait ScalarBits {
    fn to_u64_limbs(&self) -> [u64; 4];
}

pub trait Group: Sized + Clone + PartialEq + Add<Output = Self> + Neg<Output = Self> {
    type Scalar: ScalarBits;

    fn identity() -> Self;
    fn is_identity(&self) -> bool;
    fn generator() -> Self;
    fn double(&self) -> Self;
    fn negate(&self) -> Self;

    /// Group law on borrowed operands.
    fn add_point(&self, other: &Self) -> Self;

    /// Left-to-right double-and-add. Leading zero bits only double the
    /// identity, which is free.
    fn scalar_mul(&self, scalar: &Self::Scalar) -> Self {
        let scalar_limbs = scalar.to_u64_limbs();
        let mut result = Self::identity();

        for &limb in scalar_limbs.iter().rev() {
            for shift in (0..64).rev() {
                result = result.double();
                if (limb >> shift) & 1 == 1 {
                    result = result.add_point(self);
                }
            }
        }

        result
    }

    fn mul_generator(scalar: &Self::Scalar) -> Self {
        Self::generator().scalar_mul(scalar)
    }
}
