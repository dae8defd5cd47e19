use ecdsa::RecoveryId;
use k256::ecdsa::{Signature as BackendSignature, VerifyingKey};
use rand_core::CryptoRngCore;
use signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};

use super::arithmetic::{Point, Scalar, SCALAR_SIZE};
use crate::error::Error;

/// Length of the `r || s || v` signature encoding.
pub const RECOVERABLE_SIGNATURE_SIZE: usize = 65;

/// A wrapper for a signature and public key recovery info.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature {
    signature: BackendSignature,
    recovery_id: RecoveryId,
}

impl RecoverableSignature {
    /// Signs a 32-byte prehash with `key` as the private key.
    ///
    /// The nonce is derived as per RFC 6979 with extra entropy drawn from `rng`.
    pub(crate) fn sign_prehash(rng: &mut impl CryptoRngCore, key: &Scalar, prehash: &[u8]) -> Result<Self, Error> {
        let signing_key = key.to_signing_key().ok_or(Error::InvalidWitness)?;
        let signature: BackendSignature = signing_key
            .sign_prehash_with_rng(rng, prehash)
            .map_err(|_| Error::SigningFailed)?;

        // Normalize the `s` component so that the signature passes low-S verification.
        let signature = signature.normalize_s().unwrap_or(signature);

        let recovery_id = RecoveryId::trial_recovery_from_prehash(signing_key.verifying_key(), prehash, &signature)
            .map_err(|_| Error::SigningFailed)?;

        Ok(Self {
            signature,
            recovery_id,
        })
    }

    /// Standard ECDSA verification of the prehash against the public key `key`.
    pub(crate) fn verify_prehash(&self, key: &Point, prehash: &[u8]) -> bool {
        let Some(verifying_key) = key.to_verifying_key() else {
            return false;
        };
        verifying_key.verify_prehash(prehash, &self.signature).is_ok()
    }

    /// Recovers the public key that produced this signature over the prehash.
    pub(crate) fn recover_prehash(&self, prehash: &[u8]) -> Option<Point> {
        VerifyingKey::recover_from_prehash(prehash, &self.signature, self.recovery_id)
            .ok()
            .map(|key| Point::from_verifying_key(&key))
    }

    /// The `r` component, big-endian.
    pub fn r_bytes(&self) -> [u8; SCALAR_SIZE] {
        self.signature.split_bytes().0.into()
    }

    /// The `s` component, big-endian.
    pub fn s_bytes(&self) -> [u8; SCALAR_SIZE] {
        self.signature.split_bytes().1.into()
    }

    /// The recovery id (`0` or `1` for signatures produced by this crate).
    pub fn recovery_byte(&self) -> u8 {
        self.recovery_id.to_byte()
    }

    /// Encodes as `r || s || v`.
    pub fn to_bytes(&self) -> [u8; RECOVERABLE_SIGNATURE_SIZE] {
        let mut bytes = [0u8; RECOVERABLE_SIGNATURE_SIZE];
        let (rs, v) = bytes.split_at_mut(2 * SCALAR_SIZE);
        rs.copy_from_slice(&self.signature.to_bytes());
        v.fill(self.recovery_id.to_byte());
        bytes
    }

    /// Decodes an `r || s || v` encoding.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != RECOVERABLE_SIGNATURE_SIZE {
            return Err(Error::InvalidEncoding("a recoverable signature must be 65 bytes long"));
        }
        let (rs, v) = bytes.split_at(2 * SCALAR_SIZE);
        let signature =
            BackendSignature::from_slice(rs).map_err(|_| Error::InvalidEncoding("invalid ECDSA signature scalars"))?;
        let recovery_id = v
            .first()
            .copied()
            .and_then(RecoveryId::from_byte)
            .ok_or(Error::InvalidEncoding("invalid signature recovery id"))?;
        Ok(Self {
            signature,
            recovery_id,
        })
    }
}
