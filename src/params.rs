//! Group parameters and proof variant selection.

use serde::{Deserialize, Serialize};

use crate::curve::Point;
use crate::error::Error;

/// Fixed parameters of the prime-order group the protocols run in.
///
/// The curve is always secp256k1; the base `g` used for commitments
/// and Sigma proofs can be swapped for any other non-identity point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupParams {
    generator: Point,
}

impl GroupParams {
    /// secp256k1 with its standard generator.
    pub const SECP256K1: Self = Self {
        generator: Point::GENERATOR,
    };

    /// secp256k1 with an alternative base.
    pub fn with_generator(generator: Point) -> Result<Self, Error> {
        if generator.is_identity() {
            return Err(Error::PointNotOnCurve);
        }
        Ok(Self { generator })
    }

    /// The base `g`.
    pub fn generator(&self) -> &Point {
        &self.generator
    }

    /// Returns `true` if `g` is the standard secp256k1 generator.
    pub fn is_standard(&self) -> bool {
        self.generator == Point::GENERATOR
    }
}

impl Default for GroupParams {
    fn default() -> Self {
        Self::SECP256K1
    }
}

/// Which knowledge proof the Court accepts for a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofVariant {
    /// Fiat-Shamir Schnorr proof of knowledge of the discrete log of the commitment.
    Sigma,
    /// ECDSA signature over the payout address, with the witness as the private key.
    Ecdsa,
}
