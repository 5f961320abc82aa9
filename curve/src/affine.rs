// secp256k1 (SEC 2, section 2.4.1)
// E(GF(p)) : y^2 = x^3 + 7
// p = 2^256 - 2^32 - 977
// Generator (compressed): 0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798
// Curve prime order: 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141
// Curve cofactor: 1

use crate::basefield::BaseField;
use crate::error::CurveError;
use crate::{double_scalar_mul_basepoint_affine, Group, Projective, ScalarField};
use core::ops::{Add, Mul, Neg, Sub};
use serde::{Deserialize, Serialize};

/// Size of a SEC1 compressed point: one parity byte plus the x-coordinate.
pub const COMPRESSED_POINT_SIZE: usize = 33;

const PREFIX_EVEN: u8 = 0x02;
const PREFIX_ODD: u8 = 0x03;

// SEC1 encoding of the point at infinity; only used by serde.
const IDENTITY_ENCODING: u8 = 0x00;

const GENERATOR_X: [u64; 4] = [
    0x59f2815b16f81798,
    0x029bfcdb2dce28d9,
    0x55a06295ce870b07,
    0x79be667ef9dcbbac,
];

const GENERATOR_Y: [u64; 4] = [
    0x9c47d08ffb10d4b8,
    0xfd17b448a6855419,
    0x5da4fbfc0e1108a8,
    0x483ada7726a3c465,
];

/// Affine point on the elliptic curve.
/// Represents a point in affine coordinates (x, y) or the point at infinity.
///
/// Serializes as its SEC1 encoding: 33 compressed bytes, or a single zero
/// byte for the point at infinity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct Affine {
    /// The x-coordinate of the point
    pub x: BaseField,
    /// The y-coordinate of the point
    pub y: BaseField,
    /// Whether this point is the point at infinity (identity element)
    pub is_infinity: bool,
}

impl Affine {
    /// Get the 'b' coefficient: 7
    #[inline]
    pub(crate) fn curve_b() -> BaseField {
        BaseField::from_canonical_u64(7)
    }

    /// The point at infinity (identity element)
    pub fn infinity() -> Self {
        Affine {
            x: BaseField::zero(),
            y: BaseField::zero(),
            is_infinity: true,
        }
    }

    /// Create a new affine point.
    pub fn new(x: BaseField, y: BaseField) -> Self {
        Affine {
            x,
            y,
            is_infinity: false,
        }
    }

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.is_infinity
    }

    /// Right-hand side of the curve equation: x^3 + 7.
    fn rhs(x: &BaseField) -> BaseField {
        &(&x.square() * x) + &Self::curve_b()
    }

    /// Check if a point is on the curve: y^2 = x^3 + 7.
    pub fn is_on_curve(&self) -> bool {
        if self.is_infinity {
            return true;
        }

        self.y.square() == Self::rhs(&self.x)
    }

    /// The standard secp256k1 base point.
    pub fn generator() -> Self {
        Affine::new(
            BaseField::from_limbs(GENERATOR_X),
            BaseField::from_limbs(GENERATOR_Y),
        )
    }

    /// Point doubling: 2*P.
    pub fn double(&self) -> Self {
        if self.is_infinity || self.y.is_zero() {
            return Self::infinity();
        }

        // Compute slope: λ = 3x^2 / (2y)
        let x2 = self.x.square();
        let numerator = &(&x2 + &x2) + &x2;
        let denominator = &self.y + &self.y;
        let lambda = match denominator.inverse() {
            Some(inv) => &numerator * &inv,
            None => return Self::infinity(),
        };

        // x_r = λ^2 - 2x
        let x_r = &(&lambda.square() - &self.x) - &self.x;

        // y_r = λ(x - x_r) - y
        let y_r = &(&lambda * &(&self.x - &x_r)) - &self.y;

        Affine::new(x_r, y_r)
    }

    /// Negate a point.
    pub fn negate(&self) -> Self {
        if self.is_infinity {
            return self.clone();
        }
        Affine::new(self.x.clone(), -&self.y)
    }

    /// Group law on affine coordinates.
    pub fn add_point(&self, other: &Self) -> Self {
        // Handle infinity cases
        if self.is_infinity {
            return other.clone();
        }
        if other.is_infinity {
            return self.clone();
        }

        if self.x == other.x {
            return if self.y == other.y {
                self.double()
            } else {
                // Points are inverses
                Self::infinity()
            };
        }

        // λ = (y2 - y1) / (x2 - x1)
        let numerator = &other.y - &self.y;
        let denominator = &other.x - &self.x;
        let lambda = match denominator.inverse() {
            Some(inv) => &numerator * &inv,
            None => return Self::infinity(),
        };

        // x_r = λ^2 - x1 - x2
        let x_r = &(&lambda.square() - &self.x) - &other.x;

        // y_r = λ(x1 - x_r) - y1
        let y_r = &(&lambda * &(&self.x - &x_r)) - &self.y;

        Affine::new(x_r, y_r)
    }

    /// Multiply the fixed generator.
    pub fn mul_generator(scalar: &ScalarField) -> Self {
        Projective::generator().scalar_mul(scalar).to_affine()
    }

    /// Compute a * G + b * P, where G is the fixed generator.
    pub fn double_scalar_mul_basepoint(a: &ScalarField, b: &ScalarField, point: &Self) -> Self {
        double_scalar_mul_basepoint_affine(a, b, point)
    }

    /// SEC1 compressed encoding: `0x02 | x` for even `y`, `0x03 | x` for odd `y`.
    ///
    /// The point at infinity has no compressed encoding.
    pub fn to_compressed(&self) -> Option<[u8; COMPRESSED_POINT_SIZE]> {
        if self.is_infinity {
            return None;
        }

        let mut out = [0u8; COMPRESSED_POINT_SIZE];
        out[0] = if self.y.is_odd() { PREFIX_ODD } else { PREFIX_EVEN };
        out[1..].copy_from_slice(&self.x.to_bytes());
        Some(out)
    }

    /// Decodes a SEC1 compressed point.
    ///
    /// Rejects a wrong length, a prefix other than 2 or 3, an x-coordinate not
    /// below p, and any x for which `x^3 + 7` is not a quadratic residue.
    /// Otherwise picks the square root whose parity matches the prefix.
    pub fn from_compressed(bytes: &[u8]) -> Result<Self, CurveError> {
        if bytes.len() != COMPRESSED_POINT_SIZE {
            return Err(CurveError::InvalidLength {
                expected: COMPRESSED_POINT_SIZE,
                actual: bytes.len(),
            });
        }

        let prefix = bytes[0];
        if prefix != PREFIX_EVEN && prefix != PREFIX_ODD {
            return Err(CurveError::InvalidPrefix(prefix));
        }

        let mut x_bytes = [0u8; 32];
        x_bytes.copy_from_slice(&bytes[1..]);
        let x = BaseField::from_canonical_bytes(&x_bytes).ok_or(CurveError::NonCanonical)?;

        let rhs = Self::rhs(&x);
        if !rhs.is_quadratic_residue() {
            return Err(CurveError::NotOnCurve);
        }
        let root = rhs.sqrt().ok_or(CurveError::NotOnCurve)?;

        let y = if root.is_odd() == (prefix == PREFIX_ODD) {
            root
        } else {
            -root
        };

        Ok(Affine::new(x, y))
    }
}

impl Group for Affine {
    type Scalar = ScalarField;

    #[inline]
    fn identity() -> Self {
        Self::infinity()
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity
    }

    #[inline]
    fn generator() -> Self {
        Affine::generator()
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

    /// Runs the ladder in Jacobian coordinates and normalizes once.
    fn scalar_mul(&self, scalar: &ScalarField) -> Self {
        Projective::from_affine(self).scalar_mul(scalar).to_affine()
    }

    fn mul_generator(scalar: &ScalarField) -> Self {
        Affine::mul_generator(scalar)
    }
}

impl Add for Affine {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.add_point(&other)
    }
}

impl Add<&Affine> for &Affine {
    type Output = Affine;

    fn add(self, other: &Affine) -> Affine {
        self.add_point(other)
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Affine {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.add_point(&other.negate())
    }
}

impl Neg for Affine {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

// Scalar multiplication
impl Mul<&ScalarField> for &Affine {
    type Output = Affine;

    fn mul(self, scalar: &ScalarField) -> Affine {
        <Affine as Group>::scalar_mul(self, scalar)
    }
}

impl Mul<&Affine> for &ScalarField {
    type Output = Affine;

    fn mul(self, point: &Affine) -> Affine {
        <Affine as Group>::scalar_mul(point, self)
    }
}

impl From<Affine> for Vec<u8> {
    fn from(point: Affine) -> Self {
        match point.to_compressed() {
            Some(bytes) => bytes.to_vec(),
            None => vec![IDENTITY_ENCODING],
        }
    }
}

impl TryFrom<Vec<u8>> for Affine {
    type Error = CurveError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes == [IDENTITY_ENCODING] {
            return Ok(Affine::infinity());
        }
        Affine::from_compressed(&bytes)
    }
}
