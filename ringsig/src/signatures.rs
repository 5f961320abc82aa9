//! Signature types and challenge hashing for the ring signature scheme.

use curve::{Affine, ScalarField};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants::{CHALLENGE_SIZE, SCALAR_SIZE};
use crate::errors::{Result, RingError};
use crate::keys::PublicKey;

/// A ring signature `(c0, s)`.
///
/// - `c0` is the challenge anchored at ring member 0, whichever member
///   the chain started from during signing
/// - `s` holds one response scalar per ring member, in ring order
///
/// A signature means nothing outside the exact `(message, ring)` pair it
/// was produced for. Serializes as `{ "c0": <64 hex>, "s": [<64 hex>, ...] }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SignatureHex", try_from = "SignatureHex")]
pub struct Signature {
    /// Challenge digest for member 0
    pub c0: [u8; CHALLENGE_SIZE],
    /// Response scalars, `s.len()` equals the ring size
    pub s: Vec<ScalarField>,
}

/// Wire form of a [`Signature`]: lowercase fixed-width hex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureHex {
    pub c0: String,
    pub s: Vec<String>,
}

impl Signature {
    /// Number of ring members this signature was produced over.
    pub fn ring_size(&self) -> usize {
        self.s.len()
    }

    pub fn to_hex(&self) -> SignatureHex {
        SignatureHex {
            c0: hex::encode(self.c0),
            s: self.s.iter().map(|s| hex::encode(s.to_bytes())).collect(),
        }
    }

    /// Parses the hex wire form.
    ///
    /// Fails with `InvalidEncoding` on malformed hex, a wrong width, or a
    /// response scalar that is not below the group order.
    pub fn from_hex<S: AsRef<str>>(c0: &str, s: &[S]) -> Result<Self> {
        let c0 = decode_fixed::<CHALLENGE_SIZE>(c0, "c0")?;
        let s = s
            .iter()
            .map(|s_j| {
                let bytes = decode_fixed::<SCALAR_SIZE>(s_j.as_ref(), "s")?;
                ScalarField::from_canonical_bytes(&bytes).ok_or_else(|| {
                    RingError::InvalidEncoding("s value is not below the group order".to_string())
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Signature { c0, s })
    }
}

fn decode_fixed<const N: usize>(hex_str: &str, what: &str) -> Result<[u8; N]> {
    let bytes = hex::decode(hex_str)?;
    bytes.as_slice().try_into().map_err(|_| {
        RingError::InvalidEncoding(format!("{what} must be {N} bytes, got {}", bytes.len()))
    })
}

impl From<Signature> for SignatureHex {
    fn from(sig: Signature) -> Self {
        sig.to_hex()
    }
}

impl TryFrom<SignatureHex> for Signature {
    type Error = RingError;

    fn try_from(wire: SignatureHex) -> Result<Self> {
        Signature::from_hex(&wire.c0, &wire.s)
    }
}

/// Computes a link of the challenge chain: `H(message || L || encode(R))`.
///
/// `encoded_ring` is `L`, the concatenated member encodings, and `R` is the
/// commitment being linked. H is SHA-256.
///
/// Returns `InvalidPoint` if the commitment is the point at infinity, which
/// has no compressed encoding.
pub(crate) fn hash_challenge(
    message: &[u8],
    encoded_ring: &[u8],
    commitment: &Affine,
) -> Result<[u8; CHALLENGE_SIZE]> {
    let encoded = commitment.to_compressed().ok_or(RingError::InvalidPoint)?;

    let mut hasher = Sha256::new();
    hasher.update(message);
    hasher.update(encoded_ring);
    hasher.update(encoded);

    Ok(hasher.finalize().into())
}

/// Commitment implied by a response and a challenge:
/// `s * G + c * P`, with the digest `c` reduced modulo n.
pub(crate) fn ring_commitment(
    response: &ScalarField,
    challenge: &[u8; CHALLENGE_SIZE],
    member: &PublicKey,
) -> Affine {
    let c = ScalarField::from_bytes_mod_order(challenge);
    Affine::double_scalar_mul_basepoint(response, &c, member.point())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Signature {
        Signature {
            c0: [0xab; 32],
            s: vec![ScalarField::from_canonical_u64(1), ScalarField::from_canonical_u64(2)],
        }
    }

    #[test]
    fn test_hex_is_lowercase_fixed_width() {
        let wire = sample().to_hex();
        assert_eq!(wire.c0, "ab".repeat(32));
        assert_eq!(wire.s.len(), 2);
        assert_eq!(wire.s[0], format!("{}01", "0".repeat(62)));
        assert!(wire.s.iter().all(|s| s.len() == 64));
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        let good = "0".repeat(64);
        assert!(matches!(
            Signature::from_hex("xyz", &[good.clone()]),
            Err(RingError::InvalidEncoding(_))
        ));
        assert!(matches!(
            Signature::from_hex(&"0".repeat(62), &[good.clone()]),
            Err(RingError::InvalidEncoding(_))
        ));
        assert!(matches!(
            Signature::from_hex(&good, &["f".repeat(64)]),
            Err(RingError::InvalidEncoding(_))
        ));
        assert!(Signature::from_hex(&"f".repeat(64), &[good]).is_ok());
    }

    #[test]
    fn test_json_wire_form() {
        let json = serde_json::to_value(sample()).expect("serialize");
        assert_eq!(json["c0"], "ab".repeat(32));
        assert_eq!(json["s"].as_array().map(Vec::len), Some(2));

        let back: Signature = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, sample());
    }

    #[test]
    fn test_hash_challenge_rejects_identity() {
        assert_eq!(
            hash_challenge(b"msg", &[], &Affine::infinity()),
            Err(RingError::InvalidPoint)
        );
    }

    #[test]
    fn test_hash_challenge_binds_every_input() {
        let g = Affine::generator();
        let base = hash_challenge(b"msg", b"ring", &g).expect("hash");

        assert_ne!(hash_challenge(b"msh", b"ring", &g).expect("hash"), base);
        assert_ne!(hash_challenge(b"msg", b"rinh", &g).expect("hash"), base);
        assert_ne!(hash_challenge(b"msg", b"ring", &g.double()).expect("hash"), base);
        assert_eq!(hash_challenge(b"msg", b"ring", &g).expect("hash"), base);
    }
}
