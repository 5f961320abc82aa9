//! Anonymous score attestations.
//!
//! A ring member vouches for a score without revealing which member they
//! are. The ring id is folded into the signed message, so a signature made
//! for one ring cannot be replayed as a claim about another.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ring::{Ring, RingId};
use crate::signatures::Signature;
use crate::verifier::verify;

/// The fields a member signs when submitting a score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreClaim {
    pub ring_id: RingId,
    pub total_distance: f64,
    pub average_pace: f64,
}

impl ScoreClaim {
    pub fn new(ring_id: RingId, total_distance: f64, average_pace: f64) -> Self {
        Self {
            ring_id,
            total_distance,
            average_pace,
        }
    }

    /// `<ring_id>|<distance>|<pace>`, numbers with two decimals.
    pub fn to_message(&self) -> Vec<u8> {
        format!(
            "{}|{:.2}|{:.2}",
            self.ring_id, self.total_distance, self.average_pace
        )
        .into_bytes()
    }
}

/// A claim together with the ring signature over its message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub claim: ScoreClaim,
    pub signature: Signature,
}

/// Checks that `submission` was signed by some member of `ring` and names
/// that ring.
pub fn verify_submission(ring: &Ring, submission: &Submission) -> bool {
    if submission.claim.ring_id != *ring.id() {
        debug!(
            claimed = %submission.claim.ring_id,
            actual = %ring.id(),
            "Submission names a different ring"
        );
        return false;
    }
    verify(
        &submission.claim.to_message(),
        ring.members(),
        &submission.signature,
    )
}
