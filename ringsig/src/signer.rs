//! Ring signature generation.

use std::collections::HashSet;

use curve::{Affine, RandomField, ScalarField};
use rand::CryptoRng;
use tracing::{debug, info, instrument};

use crate::constants::{CHALLENGE_SIZE, MIN_RING_SIZE};
use crate::errors::{Result, RingError};
use crate::keys::{PublicKey, SecretKey};
use crate::ring::encode_members;
use crate::signatures::{Signature, hash_challenge, ring_commitment};

/// Output of [`sign`]: the signature together with the ring it verifies
/// against.
///
/// When the signer's own key was missing from the input ring it is appended,
/// so `ring` is one longer than the input and `extended` is set. Verifiers
/// must be given `ring`, not the input member list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedMessage {
    pub signature: Signature,
    pub ring: Vec<PublicKey>,
    pub extended: bool,
}

impl SignedMessage {
    /// Number of members in the effective ring.
    pub fn ring_size(&self) -> usize {
        self.ring.len()
    }
}

/// Signs `message` on behalf of some member of `ring`.
///
/// Chained Schnorr ring signature over k members, signer at index i:
/// 1. Draw a nonce r and commit `R = r * G`
/// 2. `c[i+1] = H(message || L || R)`
/// 3. For every other member j, walking forward from i+1: draw `s[j]`, form
///    `s[j] * G + c[j] * P_j` and hash it into `c[j+1]`
/// 4. Close at the signer: `s[i] = r - c[i] * x`
/// 5. Output `c[0]` and all `s`
///
/// # Errors
///
/// - `DuplicateMember` if a key appears more than once in `ring`
/// - `InvalidRingSize` if the effective ring has fewer than two members
/// - `InvalidPoint` if a commitment is the point at infinity (negligible)
#[instrument(skip_all, fields(ring_size = ring.len()))]
pub fn sign<R: CryptoRng + ?Sized>(
    rng: &mut R,
    message: &[u8],
    ring: &[PublicKey],
    secret: &SecretKey,
) -> Result<SignedMessage> {
    let mut seen = HashSet::with_capacity(ring.len());
    if let Some(duplicate) = ring.iter().find(|member| !seen.insert(*member)) {
        return Err(RingError::DuplicateMember(duplicate.to_hex()));
    }

    let public = secret.public_key();

    let mut members = ring.to_vec();
    let (signer_index, extended) = match members.iter().position(|member| *member == public) {
        Some(index) => (index, false),
        None => {
            debug!("Signer key absent from ring, appending it");
            members.push(public);
            (members.len() - 1, true)
        }
    };

    let k = members.len();
    if k < MIN_RING_SIZE {
        return Err(RingError::InvalidRingSize(k));
    }

    let encoded_ring = encode_members(&members);
    let mut challenges = vec![[0u8; CHALLENGE_SIZE]; k];
    let mut responses = vec![ScalarField::zero(); k];

    let nonce = ScalarField::random_nonzero(rng);
    let commitment = Affine::mul_generator(&nonce);

    let start = (signer_index + 1) % k;
    challenges[start] = hash_challenge(message, &encoded_ring, &commitment)?;

    let mut j = start;
    while j != signer_index {
        let s_j = ScalarField::random_nonzero(rng);
        let commitment_j = ring_commitment(&s_j, &challenges[j], &members[j]);
        let next = (j + 1) % k;
        challenges[next] = hash_challenge(message, &encoded_ring, &commitment_j)?;
        responses[j] = s_j;
        j = next;
    }

    let c_i = ScalarField::from_bytes_mod_order(&challenges[signer_index]);
    responses[signer_index] = &nonce - &(&c_i * secret.scalar());

    // The chain has wrapped all the way round, so c[0] is filled in no
    // matter which index it started from.
    let signature = Signature {
        c0: challenges[0],
        s: responses,
    };

    info!(effective_ring_size = k, extended, "Produced ring signature");

    Ok(SignedMessage {
        signature,
        ring: members,
        extended,
    })
}
