//! Ring signature verification.

use tracing::debug;

use crate::constants::MIN_RING_SIZE;
use crate::keys::PublicKey;
use crate::ring::encode_members;
use crate::signatures::{Signature, hash_challenge, ring_commitment};

/// Verifies `signature` over `message` against the ordered `ring`.
///
/// Starting from `c[0] = signature.c0`, recomputes each commitment
/// `s[j] * G + c[j] * P_j` and hashes it into `c[j+1]`. The signature is
/// valid iff the commitment of the last member hashes back to `c0`.
///
/// Total: any structural problem (a ring below the minimum size, length
/// mismatch, a commitment at infinity) yields `false`, the same answer as a
/// bad closure.
pub fn verify(message: &[u8], ring: &[PublicKey], signature: &Signature) -> bool {
    let k = ring.len();
    if k < MIN_RING_SIZE || signature.s.len() != k {
        debug!(ring_size = k, responses = signature.s.len(), "Rejecting signature");
        return false;
    }

    let encoded_ring = encode_members(ring);
    let mut challenge = signature.c0;

    for (member, response) in ring.iter().zip(&signature.s) {
        let commitment = ring_commitment(response, &challenge, member);
        challenge = match hash_challenge(message, &encoded_ring, &commitment) {
            Ok(next) => next,
            Err(_) => {
                debug!("Rejecting signature with commitment at infinity");
                return false;
            }
        };
    }

    let valid = challenge == signature.c0;
    debug!(ring_size = k, valid, "Verified ring signature");
    valid
}
