//! Fiat-Shamir challenge derivation.

use crate::curve::{Point, Scalar};
use crate::tools::hashing::{Chain, Hash};

/// Derives the Sigma-protocol challenge `e = SHA-256(g || h || a) mod n`.
///
/// Each point enters as its 33-byte compressed encoding, in exactly this order
/// and with no additional framing, so that any party can recompute it byte-for-byte.
pub fn challenge(generator: &Point, commitment: &Point, randomness_commitment: &Point) -> Scalar {
    Hash::new()
        .chain(generator)
        .chain(commitment)
        .chain(randomness_commitment)
        .finalize_to_scalar()
}
