//! ECDSA-based knowledge argument.
//!
//! The witness is used as an ECDSA private key and the commitment as its public key.
//! Knowing the witness is argued by signing the payout address.
//! This is sound under ECDSA unforgeability but, unlike [`SigmaProof`](crate::SigmaProof),
//! it is not a zero-knowledge proof of knowledge.

use rand_core::CryptoRngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_encoded_bytes::{Hex, SliceLike};

use crate::address::{PayoutAddress, ADDRESS_SIZE};
use crate::commitment::{Commitment, Witness};
use crate::curve::{RecoverableSignature, RECOVERABLE_SIGNATURE_SIZE, SCALAR_SIZE};
use crate::error::Error;

/// Length of the `r || s || v || payout` proof encoding.
pub const ECDSA_PROOF_SIZE: usize = RECOVERABLE_SIGNATURE_SIZE + ADDRESS_SIZE;

/// A signature by the witness over the Player's payout address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcdsaProof {
    signature: RecoverableSignature,
    payout: PayoutAddress,
}

/// A verified proof broken down into the pieces an on-chain verifier consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportedProof {
    /// `r || s || v`
    pub signature: [u8; RECOVERABLE_SIGNATURE_SIZE],
    /// The `r` component, big-endian.
    pub r: [u8; SCALAR_SIZE],
    /// The `s` component, big-endian.
    pub s: [u8; SCALAR_SIZE],
    /// The recovery id, `0` or `1`.
    pub v: u8,
    /// The signed payout address.
    pub payout: PayoutAddress,
}

impl EcdsaProof {
    /// Signs `payout` with the witness as the private key.
    pub fn new(rng: &mut impl CryptoRngCore, witness: &Witness, payout: PayoutAddress) -> Result<Self, Error> {
        let prehash = payout.message_prehash();
        let signature = RecoverableSignature::sign_prehash(rng, witness.expose_secret(), &prehash)?;
        Ok(Self { signature, payout })
    }

    /// Assembles a proof from a signature and the address it claims to sign.
    pub fn from_parts(signature: RecoverableSignature, payout: PayoutAddress) -> Self {
        Self { signature, payout }
    }

    /// Standard ECDSA verification of the signature over the payout address,
    /// with the commitment as the public key.
    pub fn verify(&self, commitment: &Commitment) -> bool {
        let accepted = self
            .signature
            .verify_prehash(commitment.as_point(), &self.payout.message_prehash());
        if !accepted {
            tracing::debug!("ECDSA proof rejected for {:?}", self.payout);
        }
        accepted
    }

    /// Verifies by recovering the signer's public key and comparing its account address,
    /// for when only the address of the commitment has been posted.
    pub fn verify_against_address(&self, commitment_address: &PayoutAddress) -> bool {
        self.signature
            .recover_prehash(&self.payout.message_prehash())
            .is_some_and(|key| &PayoutAddress::from_public_key(&key) == commitment_address)
    }

    /// Verifies the proof and, if valid, returns its components for on-chain submission.
    pub fn verify_and_export(&self, commitment: &Commitment) -> Option<ExportedProof> {
        if !self.verify(commitment) {
            return None;
        }
        Some(ExportedProof {
            signature: self.signature.to_bytes(),
            r: self.signature.r_bytes(),
            s: self.signature.s_bytes(),
            v: self.signature.recovery_byte(),
            payout: self.payout,
        })
    }

    /// The signature.
    pub fn signature(&self) -> &RecoverableSignature {
        &self.signature
    }

    /// The payout address the signature is over.
    pub fn payout(&self) -> &PayoutAddress {
        &self.payout
    }

    /// Encodes as `r || s || v || payout` (65 + 20 bytes).
    pub fn to_bytes(&self) -> [u8; ECDSA_PROOF_SIZE] {
        let mut bytes = [0u8; ECDSA_PROOF_SIZE];
        let (signature, payout) = bytes.split_at_mut(RECOVERABLE_SIGNATURE_SIZE);
        signature.copy_from_slice(&self.signature.to_bytes());
        payout.copy_from_slice(self.payout.as_bytes());
        bytes
    }

    /// Decodes an `r || s || v || payout` encoding.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != ECDSA_PROOF_SIZE {
            return Err(Error::InvalidEncoding("an ECDSA proof must be 85 bytes long"));
        }
        let (signature, payout) = bytes.split_at(RECOVERABLE_SIGNATURE_SIZE);
        Ok(Self {
            signature: RecoverableSignature::try_from_bytes(signature)?,
            payout: PayoutAddress::try_from_bytes(payout)?,
        })
    }
}

impl<'a> TryFrom<&'a [u8]> for EcdsaProof {
    type Error = Error;
    fn try_from(val: &'a [u8]) -> Result<Self, Self::Error> {
        Self::try_from_bytes(val)
    }
}

impl Serialize for EcdsaProof {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SliceLike::<Hex>::serialize(&self.to_bytes(), serializer)
    }
}

impl<'de> Deserialize<'de> for EcdsaProof {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SliceLike::<Hex>::deserialize(deserializer)
    }
}
