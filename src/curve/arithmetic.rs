use core::ops::{Add, Mul};

use digest::Digest;
use elliptic_curve::{
    bigint::U256, // Note that this type is different from typenum::U256
    ops::Reduce,
    sec1::{FromEncodedPoint, ToEncodedPoint},
    Field, FieldBytesSize, NonZeroScalar, PrimeField,
};
use k256::{
    ecdsa::{SigningKey, VerifyingKey},
    EncodedPoint, FieldBytes, Secp256k1,
};
use rand_core::CryptoRngCore;
use secrecy::CloneableSecret;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_encoded_bytes::{Hex, SliceLike};
use zeroize::DefaultIsZeroes;

use crate::error::Error;
use crate::tools::hashing::{Chain, Hashable};

pub(crate) type BackendScalar = k256::Scalar;
pub(crate) type BackendPoint = k256::ProjectivePoint;

/// Length of a big-endian scalar encoding.
pub const SCALAR_SIZE: usize = 32;

/// Length of a compressed SEC1 point encoding.
pub const COMPRESSED_POINT_SIZE: usize = 33;

/// Length of an uncompressed SEC1 point encoding.
pub const UNCOMPRESSED_POINT_SIZE: usize = 65;

/// An element of the secp256k1 scalar field, always in `[0, n)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Scalar(BackendScalar);

impl Scalar {
    /// The additive identity.
    pub const ZERO: Self = Self(BackendScalar::ZERO);
    /// The multiplicative identity.
    pub const ONE: Self = Self(BackendScalar::ONE);

    /// Samples a uniformly random non-zero scalar.
    pub fn random_nonzero(rng: &mut impl CryptoRngCore) -> Self {
        Self(*NonZeroScalar::<Secp256k1>::random(rng).as_ref())
    }

    /// Returns `true` if this is the zero scalar.
    pub fn is_zero(&self) -> bool {
        bool::from(self.0.is_zero())
    }

    pub(crate) fn from_digest(d: impl Digest<OutputSize = FieldBytesSize<Secp256k1>>) -> Self {
        // There's currently no way to make the required digest output size
        // depend on the target scalar size, so we are hardcoding it to 256 bit
        // (that is, equal to the scalar size).
        Self(<BackendScalar as Reduce<U256>>::reduce_bytes(&d.finalize()))
    }

    /// Interprets `bytes` as a big-endian integer of any length and reduces it modulo the group order.
    pub fn reduce_from_bytes(bytes: &[u8]) -> Self {
        // 2^256 mod n
        let radix = Field::pow_vartime(&BackendScalar::from(2u64), [256u64]);

        let (head, tail) = bytes.split_at(bytes.len() % SCALAR_SIZE);
        let mut acc = reduce_padded(head);
        for chunk in tail.chunks_exact(SCALAR_SIZE) {
            acc = acc * radix + reduce_padded(chunk);
        }
        Self(acc)
    }

    /// Returns the canonical 32-byte big-endian encoding.
    pub fn to_be_bytes(self) -> FieldBytes {
        self.0.to_bytes()
    }

    /// Decodes a canonical 32-byte big-endian encoding.
    ///
    /// Values that are not fully reduced modulo the group order are rejected.
    pub fn try_from_be_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != SCALAR_SIZE {
            return Err(Error::InvalidEncoding("a scalar must be 32 bytes long"));
        }
        let repr = FieldBytes::from_slice(bytes).clone();
        Option::<BackendScalar>::from(BackendScalar::from_repr(repr))
            .map(Self)
            .ok_or(Error::InvalidEncoding("the scalar is not reduced modulo the group order"))
    }

    pub(crate) fn to_signing_key(self) -> Option<SigningKey> {
        let scalar: Option<NonZeroScalar<Secp256k1>> = NonZeroScalar::new(self.0).into();
        Some(SigningKey::from(scalar?))
    }
}

fn reduce_padded(chunk: &[u8]) -> BackendScalar {
    // `chunk` is at most `SCALAR_SIZE` long
    let mut repr = FieldBytes::default();
    let offset = SCALAR_SIZE.saturating_sub(chunk.len());
    for (dst, src) in repr.iter_mut().skip(offset).zip(chunk) {
        *dst = *src;
    }
    <BackendScalar as Reduce<U256>>::reduce_bytes(&repr)
}

impl<'a> TryFrom<&'a [u8]> for Scalar {
    type Error = Error;
    fn try_from(val: &'a [u8]) -> Result<Self, Self::Error> {
        Self::try_from_be_bytes(val)
    }
}

impl From<u64> for Scalar {
    fn from(val: u64) -> Self {
        Self(BackendScalar::from(val))
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SliceLike::<Hex>::serialize(&self.to_be_bytes(), serializer)
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SliceLike::<Hex>::deserialize(deserializer)
    }
}

impl DefaultIsZeroes for Scalar {}

impl CloneableSecret for Scalar {}

/// A point on the secp256k1 curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point(BackendPoint);

impl Point {
    /// The standard secp256k1 generator.
    pub const GENERATOR: Self = Self(BackendPoint::GENERATOR);

    /// The point at infinity.
    pub const IDENTITY: Self = Self(BackendPoint::IDENTITY);

    /// Returns `true` if this is the point at infinity.
    pub fn is_identity(&self) -> bool {
        self.0 == BackendPoint::IDENTITY
    }

    pub(crate) fn from_verifying_key(key: &VerifyingKey) -> Self {
        Self((*key.as_affine()).into())
    }

    /// Convert a [`Point`] to a [`VerifyingKey`] wrapped in an [`Option`]. Returns [`None`] if the
    /// `Point` is the point at infinity.
    pub(crate) fn to_verifying_key(self) -> Option<VerifyingKey> {
        VerifyingKey::from_affine(self.0.to_affine()).ok()
    }

    /// Decodes a 33-byte compressed SEC1 encoding.
    ///
    /// Fails with [`Error::InvalidEncoding`] on wrong length or tag,
    /// and with [`Error::PointNotOnCurve`] if the encoding does not describe
    /// a non-identity point satisfying the curve equation.
    pub fn try_from_compressed_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != COMPRESSED_POINT_SIZE {
            return Err(Error::InvalidEncoding("a compressed point must be 33 bytes long"));
        }
        // The identity, as written by `to_compressed_bytes`
        if bytes.iter().all(|byte| *byte == 0) {
            return Err(Error::PointNotOnCurve);
        }
        let ep = EncodedPoint::from_bytes(bytes).map_err(|_| Error::InvalidEncoding("unknown SEC1 point tag"))?;
        if !ep.is_compressed() {
            return Err(Error::InvalidEncoding("expected a compressed SEC1 point"));
        }

        // Unwrap CtOption into Option
        let cp_opt: Option<BackendPoint> = BackendPoint::from_encoded_point(&ep).into();
        cp_opt.map(Self).ok_or(Error::PointNotOnCurve)
    }

    /// Returns the 33-byte compressed SEC1 encoding.
    ///
    /// The identity has no compressed form and is written as all zeros,
    /// which [`Point::try_from_compressed_bytes`] rejects.
    pub fn to_compressed_bytes(&self) -> [u8; COMPRESSED_POINT_SIZE] {
        let mut bytes = [0u8; COMPRESSED_POINT_SIZE];
        let ep = self.0.to_affine().to_encoded_point(true);
        if let Some(dst) = bytes.get_mut(..ep.len()) {
            dst.copy_from_slice(ep.as_bytes());
        }
        bytes
    }

    /// Returns the 65-byte uncompressed SEC1 encoding (all zeros for the identity).
    pub fn to_uncompressed_bytes(&self) -> [u8; UNCOMPRESSED_POINT_SIZE] {
        let mut bytes = [0u8; UNCOMPRESSED_POINT_SIZE];
        let ep = self.0.to_affine().to_encoded_point(false);
        if let Some(dst) = bytes.get_mut(..ep.len()) {
            dst.copy_from_slice(ep.as_bytes());
        }
        bytes
    }
}

impl<'a> TryFrom<&'a [u8]> for Point {
    type Error = Error;
    fn try_from(val: &'a [u8]) -> Result<Self, Self::Error> {
        Self::try_from_compressed_bytes(val)
    }
}

impl Hashable for Point {
    fn chain<C: Chain>(&self, digest: C) -> C {
        digest.chain_constant_sized_bytes(&self.to_compressed_bytes())
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SliceLike::<Hex>::serialize(&self.to_compressed_bytes(), serializer)
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SliceLike::<Hex>::deserialize(deserializer)
    }
}

impl Add<Scalar> for Scalar {
    type Output = Scalar;

    fn add(self, other: Scalar) -> Scalar {
        Scalar(self.0.add(&other.0))
    }
}

impl Add<&Scalar> for &Scalar {
    type Output = Scalar;

    fn add(self, other: &Scalar) -> Scalar {
        Scalar(self.0.add(&other.0))
    }
}

impl Mul<&Scalar> for &Scalar {
    type Output = Scalar;

    fn mul(self, other: &Scalar) -> Scalar {
        Scalar(self.0.mul(&(other.0)))
    }
}

impl Add<&Point> for &Point {
    type Output = Point;

    fn add(self, other: &Point) -> Point {
        Point(self.0.add(&(other.0)))
    }
}

impl Mul<&Scalar> for &Point {
    type Output = Point;

    fn mul(self, other: &Scalar) -> Point {
        Point(self.0.mul(&(other.0)))
    }
}
