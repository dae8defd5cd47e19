//! Witnesses and the `h = g^w` commitment to them.

use elliptic_curve::subtle::ConstantTimeEq;
use serde::{Deserialize, Serialize};

use crate::address::PayoutAddress;
use crate::curve::{Point, Scalar, COMPRESSED_POINT_SIZE};
use crate::error::Error;
use crate::params::GroupParams;
use crate::tools::Secret;

/// The secret whose knowledge is proven: a non-zero scalar derived from a puzzle solution.
///
/// The value is zeroized on drop and is never printed.
#[derive(Debug, Clone)]
pub struct Witness(Secret<Scalar>);

impl Witness {
    /// Wraps a scalar. Fails with [`Error::InvalidWitness`] for zero,
    /// which cannot serve as an ECDSA private key and commits to the identity.
    pub fn new(scalar: Scalar) -> Result<Self, Error> {
        if scalar.is_zero() {
            return Err(Error::InvalidWitness);
        }
        Ok(Self(Secret::init_with(|| scalar)))
    }

    /// Decodes a 32-byte big-endian witness.
    ///
    /// Fails with [`Error::InvalidWitness`] if the value is not in `[1, n)`.
    pub fn try_from_be_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let scalar = Scalar::try_from_be_bytes(bytes).map_err(|_| Error::InvalidWitness)?;
        Self::new(scalar)
    }

    pub(crate) fn expose_secret(&self) -> &Scalar {
        self.0.expose_secret()
    }
}

/// The Author's public commitment `h = g^w` to a witness `w`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commitment(Point);

impl Commitment {
    /// Computes `g^w`.
    pub fn new(params: &GroupParams, witness: &Witness) -> Self {
        Self(params.generator() * witness.expose_secret())
    }

    /// Recomputes `g^w'` for a candidate witness and compares it with this commitment.
    ///
    /// The comparison of the encodings is constant-time.
    pub fn is_opened_by(&self, params: &GroupParams, candidate: &Witness) -> bool {
        let recomputed = Self::new(params, candidate).to_bytes();
        recomputed.as_slice().ct_eq(self.to_bytes().as_slice()).into()
    }

    /// Wraps a point received from elsewhere.
    pub fn from_point(point: Point) -> Result<Self, Error> {
        if point.is_identity() {
            return Err(Error::PointNotOnCurve);
        }
        Ok(Self(point))
    }

    /// The committed group element.
    pub fn as_point(&self) -> &Point {
        &self.0
    }

    /// The 33-byte compressed encoding.
    pub fn to_bytes(&self) -> [u8; COMPRESSED_POINT_SIZE] {
        self.0.to_compressed_bytes()
    }

    /// Decodes a 33-byte compressed encoding.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Point::try_from_compressed_bytes(bytes).map(Self)
    }

    /// The account address of the commitment viewed as an ECDSA public key.
    ///
    /// Only meaningful with the standard generator.
    pub fn address(&self) -> PayoutAddress {
        PayoutAddress::from_public_key(&self.0)
    }
}
