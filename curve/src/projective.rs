use crate::affine::Affine;
use crate::basefield::BaseField;
use crate::{Group, ScalarField};
use core::ops::{Add, Mul, Neg, Sub};

/// Jacobian point on the curve.
/// Represents (X:Y:Z) with (x,y) = (X/Z^2, Y/Z^3).
/// The point at infinity is any point with Z = 0.
#[derive(Clone, Debug)]
pub struct Projective {
    pub x: BaseField,
    pub y: BaseField,
    pub z: BaseField,
}

impl Projective {
    /// The point at infinity (identity element): (1:1:0)
    pub fn infinity() -> Self {
        Projective {
            x: BaseField::one(),
            y: BaseField::one(),
            z: BaseField::zero(),
        }
    }

    /// Create a new Jacobian point.
    pub fn new(x: BaseField, y: BaseField, z: BaseField) -> Self {
        Projective { x, y, z }
    }

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    /// Convert to affine coordinates. Costs one field inversion.
    pub fn to_affine(&self) -> Affine {
        let Some(z_inv) = self.z.inverse() else {
            return Affine::infinity();
        };

        let z_inv2 = z_inv.square();
        let z_inv3 = &z_inv2 * &z_inv;
        Affine::new(&self.x * &z_inv2, &self.y * &z_inv3)
    }

    /// Convert from affine coordinates.
    pub fn from_affine(point: &Affine) -> Self {
        if point.is_infinity() {
            return Self::infinity();
        }

        Projective::new(point.x.clone(), point.y.clone(), BaseField::one())
    }

    /// Check if a point is on the curve: Y^2 = X^3 + 7*Z^6.
    pub fn is_on_curve(&self) -> bool {
        if self.is_infinity() {
            return true;
        }

        let z2 = self.z.square();
        let z6 = &z2.square() * &z2;
        let rhs = &(&self.x.square() * &self.x) + &(&Affine::curve_b() * &z6);

        self.y.square() == rhs
    }

    /// The standard secp256k1 base point.
    pub fn generator() -> Self {
        Self::from_affine(&Affine::generator())
    }

    /// Point doubling for a = 0 (dbl-2009-l).
    pub fn double(&self) -> Self {
        if self.is_infinity() || self.y.is_zero() {
            return Self::infinity();
        }

        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let xb = &self.x + &b;
        let d = &(&(&xb.square() - &a) - &c) * &BaseField::from_canonical_u64(2);
        let e = &a * &BaseField::from_canonical_u64(3);
        let f = e.square();

        let x3 = &f - &(&d + &d);
        let y3 = &(&e * &(&d - &x3)) - &(&c * &BaseField::from_canonical_u64(8));
        let z3 = &(&self.y * &self.z) * &BaseField::from_canonical_u64(2);

        Projective::new(x3, y3, z3)
    }

    /// Negate a point.
    pub fn negate(&self) -> Self {
        Projective::new(self.x.clone(), -&self.y, self.z.clone())
    }

    /// General addition (add-1998-cmo-2), falling back to doubling when
    /// both operands are the same point.
    pub fn add_point(&self, other: &Self) -> Self {
        if self.is_infinity() {
            return other.clone();
        }
        if other.is_infinity() {
            return self.clone();
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = &self.x * &z2z2;
        let u2 = &other.x * &z1z1;
        let s1 = &(&self.y * &other.z) * &z2z2;
        let s2 = &(&other.y * &self.z) * &z1z1;

        let h = &u2 - &u1;
        let r = &s2 - &s1;

        if h.is_zero() {
            return if r.is_zero() {
                self.double()
            } else {
                Self::infinity()
            };
        }

        let hh = h.square();
        let hhh = &h * &hh;
        let v = &u1 * &hh;

        let x3 = &(&r.square() - &hhh) - &(&v + &v);
        let y3 = &(&r * &(&v - &x3)) - &(&s1 * &hhh);
        let z3 = &(&self.z * &other.z) * &h;

        Projective::new(x3, y3, z3)
    }
}

impl PartialEq for Projective {
    /// Compares the underlying affine points without normalizing.
    fn eq(&self, other: &Self) -> bool {
        match (self.is_infinity(), other.is_infinity()) {
            (true, true) => return true,
            (true, false) | (false, true) => return false,
            _ => {}
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let x_eq = &self.x * &z2z2 == &other.x * &z1z1;
        let y_eq = &(&self.y * &other.z) * &z2z2 == &(&other.y * &self.z) * &z1z1;

        x_eq && y_eq
    }
}

impl Eq for Projective {}

impl Group for Projective {
    type Scalar = ScalarField;

    #[inline]
    fn identity() -> Self {
        Self::infinity()
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity()
    }

    #[inline]
    fn generator() -> Self {
        Projective::generator()
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }

    #[inline]
    fn add_point(&self, other: &Self) -> Self {
        Self::add_point(self, other)
    }
}

impl Add for Projective {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.add_point(&other)
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Projective {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.add_point(&other.negate())
    }
}

impl Neg for Projective {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Mul<&ScalarField> for &Projective {
    type Output = Projective;

    fn mul(self, scalar: &ScalarField) -> Projective {
        <Projective as Group>::scalar_mul(self, scalar)
    }
}

// Conversions
impl From<&Affine> for Projective {
    fn from(point: &Affine) -> Self {
        Projective::from_affine(point)
    }
}

impl From<&Projective> for Affine {
    fn from(point: &Projective) -> Self {
        point.to_affine()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infinity() {
        let inf = Projective::infinity();
        assert!(inf.is_infinity());
        assert!(inf.is_on_curve());
    }

    #[test]
    fn test_generator_on_curve() {
        let g = Projective::generator();
        assert!(g.is_on_curve(), "Generator point is not on the curve");
        assert!(!g.is_infinity());
    }

    #[test]
    fn test_conversion_affine_projective() {
        let affine = Affine::generator();
        let projective = Projective::from_affine(&affine);
        assert_eq!(projective.to_affine(), affine);
    }

    #[test]
    fn test_point_addition_with_infinity() {
        let g = Projective::generator();
        let inf = Projective::infinity();

        assert_eq!(g.add_point(&inf), g);
        assert_eq!(inf.add_point(&g), g);
        assert!(inf.add_point(&inf).is_infinity());
    }

    #[test]
    fn test_doubling_matches_affine() {
        let g = Projective::generator();
        let g2 = g.double();

        assert!(g2.is_on_curve());
        assert_eq!(g2.to_affine(), Affine::generator().double());
        assert_eq!(g.add_point(&g), g2);
    }

    #[test]
    fn test_addition_matches_affine() {
        let g = Projective::generator();
        let g3 = g.double().add_point(&g);
        let expected = Affine::generator() + Affine::generator().double();

        assert_eq!(g3.to_affine(), expected);
    }

    #[test]
    fn test_point_negation() {
        let g = Projective::generator();
        assert!(g.add_point(&g.negate()).is_infinity());
    }

    #[test]
    fn test_scalar_mul_small() {
        let g = Projective::generator();
        let five = ScalarField::from_canonical_u64(5);
        let expected = g.double().double().add_point(&g);

        assert_eq!(&g * &five, expected);
    }

    #[test]
    fn test_scalar_mul_zero() {
        let g = Projective::generator();
        assert!((&g * &ScalarField::zero()).is_infinity());
    }

    #[test]
    fn test_order_annihilates_generator() {
        let g = Projective::generator();
        let n_minus_one = -ScalarField::one();
        let result = (&g * &n_minus_one).add_point(&g);

        assert!(result.is_infinity());
    }

    #[test]
    fn test_equality_ignores_representation() {
        let g = Projective::generator();
        let two = BaseField::from_canonical_u64(2);
        let scaled = Projective::new(
            &g.x * &two.square(),
            &g.y * &(&two.square() * &two),
            two.clone(),
        );

        assert_eq!(scaled, g);
        assert_eq!(scaled.to_affine(), Affine::generator());
    }
}
