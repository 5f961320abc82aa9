//! The secp256k1 elliptic curve group.
//!
//! This crate provides the base and scalar fields, affine and Jacobian curve
//! points, SEC1 compressed point encoding, and helpers for random sampling.
//! The curve parameters and generator are fixed to the values in the `affine`
//! module.
//!
//! Arithmetic is variable time and is not hardened against side channels.

mod affine;
mod basefield;
mod error;
mod field;
mod group;
mod msm;
mod projective;
mod random;
mod scalarfield;

pub use affine::{Affine, COMPRESSED_POINT_SIZE};
pub use basefield::BaseField;
pub use error::CurveError;
pub use group::{Group, ScalarBits};
pub use msm::double_scalar_mul_basepoint_affine;
pub use projective::Projective;
pub use random::RandomField;
pub use scalarfield::ScalarField;
