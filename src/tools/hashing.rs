use alloc::string::String;
use alloc::vec::Vec;

use digest::Digest;
use sha2::Sha256;

use crate::curve::Scalar;

/// A digest object that takes byte slices or decomposable ([`Hashable`]) objects.
pub(crate) trait Chain: Sized {
    /// Hash raw bytes.
    ///
    /// Note: only for impls in specific types, do not use directly.
    fn chain_raw_bytes(self, bytes: &[u8]) -> Self;

    /// Hash a bytestring that is known to be constant-sized
    /// (e.g. byte representation of a built-in integer).
    fn chain_constant_sized_bytes(self, bytes: &(impl AsRef<[u8]> + ?Sized)) -> Self {
        self.chain_raw_bytes(bytes.as_ref())
    }

    /// Hash raw bytes in a collision-resistant way.
    fn chain_bytes(self, bytes: &(impl AsRef<[u8]> + ?Sized)) -> Self {
        // Hash the length too to prevent hash conflicts. (e.g. H(AB|CD) == H(ABC|D)).
        let len = (bytes.as_ref().len() as u32).to_be_bytes();
        self.chain_raw_bytes(&len).chain_raw_bytes(bytes.as_ref())
    }

    fn chain<T: Hashable + ?Sized>(self, hashable: &T) -> Self {
        hashable.chain(self)
    }
}

pub(crate) type BackendDigest = Sha256;

/// Wraps a fixed output hash for easier replacement, and standardizes the use of DST.
pub(crate) struct Hash(BackendDigest);

impl Chain for Hash {
    fn chain_raw_bytes(self, bytes: &[u8]) -> Self {
        Self(self.0.chain_update(bytes))
    }
}

impl Hash {
    /// A hash with no domain separation, for transcripts whose byte layout is fixed externally.
    pub(crate) fn new() -> Self {
        Self(BackendDigest::new())
    }

    pub(crate) fn new_with_dst(dst: &[u8]) -> Self {
        Self::new().chain_bytes(dst)
    }

    pub(crate) fn finalize_to_scalar(self) -> Scalar {
        Scalar::from_digest(self.0)
    }
}

/// A trait allowing complex objects to give access to their contents for hashing purposes
/// without the need of a conversion to a new form (e.g. serialization).
pub(crate) trait Hashable {
    fn chain<C: Chain>(&self, digest: C) -> C;
}

// NOTE: we *do not* want to implement Hashable for `usize` to prevent hashes being different
// on different targets.
impl Hashable for u32 {
    fn chain<C: Chain>(&self, digest: C) -> C {
        digest.chain_constant_sized_bytes(&self.to_be_bytes())
    }
}

impl Hashable for String {
    fn chain<C: Chain>(&self, digest: C) -> C {
        digest.chain_bytes(self.as_bytes())
    }
}

impl<T: Hashable> Hashable for Vec<T> {
    fn chain<C: Chain>(&self, digest: C) -> C {
        // Hashing the vector length too to prevent collisions.
        let len = self.len() as u32;
        let mut digest = digest.chain(&len);
        for elem in self {
            digest = digest.chain(elem);
        }
        digest
    }
}
