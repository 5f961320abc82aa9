//! Ring signatures over secp256k1.
//!
//! A ring signature proves that the signer holds the secret key of *some*
//! member of a ring of public keys without revealing which one. This crate
//! provides:
//! - Key generation and validation of 33-byte compressed public keys
//! - Ring assembly from a cohort-filtered pool, padded with fresh decoys
//! - A chained Schnorr-style ring signature with SHA-256 challenges
//! - A hex surface for host services, and a fail-closed backend switch
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use ringsig::{generate_keypair, sign, verify, PublicKey};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let keypairs: Vec<_> = (0..3).map(|_| generate_keypair(&mut rng)).collect();
//! let ring: Vec<PublicKey> = keypairs.iter().map(|kp| kp.public.clone()).collect();
//!
//! let message = b"ring_demo|5.40|6.20";
//! let signed = sign(&mut rng, message, &ring, &keypairs[0].secret).expect("signing failed");
//!
//! assert_eq!(signed.signature.s.len(), 3);
//! assert!(verify(message, &signed.ring, &signed.signature));
//! ```
//!
//! # Security Considerations
//!
//! - Always pass a cryptographically secure random number generator
//! - A signature only holds for the exact message and member order it was
//!   made over; the ring is part of what is signed
//! - If the signer was not in the ring, [`sign`] appends them; verifiers must
//!   use [`SignedMessage::ring`]
//! - Arithmetic is variable-time

mod assembler;
mod attest;
mod backend;
pub mod constants;
mod errors;
mod keys;
mod ring;
mod service;
mod signatures;
mod signer;
mod verifier;

#[cfg(test)]
mod tests;

pub use assembler::{
    AssemblerConfig, DecoyRegistry, MemoryPool, PoolEntry, RingAssembler, assemble_ring,
};
pub use attest::{ScoreClaim, Submission, verify_submission};
pub use backend::Backend;
pub use errors::{Result, RingError};
pub use keys::{Keypair, PublicKey, SecretKey, generate_keypair, validate_public_key};
pub use ring::{Cohort, Ring, RingId};
pub use service::{KeypairHex, RingHex, RingService, SignedHex};
pub use signatures::{Signature, SignatureHex};
pub use signer::{SignedMessage, sign};
pub use verifier::verify;
