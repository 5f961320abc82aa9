use crate::group::ScalarBits;
use crate::{Affine, Projective, ScalarField};

/// Compute a * G + b * P with a single shared doubling chain (Shamir's trick).
pub fn double_scalar_mul_basepoint_affine(
    a: &ScalarField,
    b: &ScalarField,
    point: &Affine,
) -> Affine {
    let g = Projective::generator();
    let p = Projective::from_affine(point);
    let g_plus_p = g.add_point(&p);

    let a_limbs = a.to_u64_limbs();
    let b_limbs = b.to_u64_limbs();
    let mut result = Projective::infinity();

    for limb_idx in (0..4).rev() {
        let a_limb = a_limbs[limb_idx];
        let b_limb = b_limbs[limb_idx];
        for shift in (0..64).rev() {
            result = result.double();

            let a_bit = (a_limb >> shift) & 1 == 1;
            let b_bit = (b_limb >> shift) & 1 == 1;
            match (a_bit, b_bit) {
                (true, true) => result = result.add_point(&g_plus_p),
                (true, false) => result = result.add_point(&g),
                (false, true) => result = result.add_point(&p),
                (false, false) => {}
            }
        }
    }

    result.to_affine()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Group;

    #[test]
    fn test_matches_separate_multiplications() {
        let g = Affine::generator();
        let p = Affine::mul_generator(&ScalarField::from_canonical_u64(99));
        let a = ScalarField::from_canonical_u64(123_456);
        let b = -ScalarField::from_canonical_u64(789);

        let expected = &g.scalar_mul(&a) + &p.scalar_mul(&b);
        assert_eq!(double_scalar_mul_basepoint_affine(&a, &b, &p), expected);
    }

    #[test]
    fn test_zero_scalars() {
        let p = Affine::generator().double();
        let zero = ScalarField::zero();

        assert_eq!(
            double_scalar_mul_basepoint_affine(&zero, &zero, &p),
            Affine::infinity()
        );
        assert_eq!(
            double_scalar_mul_basepoint_affine(&zero, &ScalarField::one(), &p),
            p
        );
    }

    #[test]
    fn test_point_at_infinity_operand() {
        let a = ScalarField::from_canonical_u64(3);
        let b = ScalarField::from_canonical_u64(5);
        let result = double_scalar_mul_basepoint_affine(&a, &b, &Affine::infinity());

        assert_eq!(result, Affine::mul_generator(&a));
    }

    #[test]
    fn test_cancellation_yields_identity() {
        // x*G + (-1)*(x*G) = O
        let x = ScalarField::from_canonical_u64(4242);
        let p = Affine::mul_generator(&x);
        let result = double_scalar_mul_basepoint_affine(&x, &-ScalarField::one(), &p);

        assert!(result.is_infinity());
    }
}
