//! The two knowledge proof variants behind a common interface.

use alloc::vec::Vec;

use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use crate::address::PayoutAddress;
use crate::commitment::{Commitment, Witness};
use crate::ecdsa_proof::EcdsaProof;
use crate::error::Error;
use crate::params::{GroupParams, ProofVariant};
use crate::sigma::SigmaProof;

/// The outcome of checking a structurally valid proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The prover knows the witness; the reward may be released.
    Accepted,
    /// The proof does not verify. The Player may retry with another guess.
    Rejected,
}

impl From<bool> for Verdict {
    fn from(accepted: bool) -> Self {
        if accepted {
            Self::Accepted
        } else {
            Self::Rejected
        }
    }
}

/// A way for a Player to demonstrate knowledge of the witness behind a [`Commitment`].
///
/// Implementations are stateless; the Court enforces that a puzzle closes only once.
pub trait KnowledgeProofScheme {
    /// The proof object sent to the Court.
    type Proof;

    /// The group parameters this scheme was built with.
    fn params(&self) -> &GroupParams;

    /// Builds a proof for the witness, claiming the reward for `payout`.
    fn prove(
        &self,
        rng: &mut impl CryptoRngCore,
        witness: &Witness,
        commitment: &Commitment,
        payout: PayoutAddress,
    ) -> Result<Self::Proof, Error>;

    /// Checks a decoded proof. `Ok(false)` means the proof is well-formed but wrong.
    fn verify(&self, commitment: &Commitment, proof: &Self::Proof, payout: &PayoutAddress) -> Result<bool, Error>;

    /// Decodes a proof from its wire encoding.
    fn decode_proof(&self, bytes: &[u8]) -> Result<Self::Proof, Error>;

    /// The Court entry point: decodes the posted commitment and the submitted proof, then verifies.
    ///
    /// Malformed input is reported as an error and never as [`Verdict::Rejected`].
    fn adjudicate(&self, commitment: &[u8], proof: &[u8], payout: &PayoutAddress) -> Result<Verdict, Error> {
        let commitment = Commitment::try_from_bytes(commitment).inspect_err(|err| {
            tracing::warn!("Malformed commitment: {err}");
        })?;
        let proof = self.decode_proof(proof).inspect_err(|err| {
            tracing::warn!("Malformed proof: {err}");
        })?;
        self.verify(&commitment, &proof, payout).map(Verdict::from)
    }
}

/// The Fiat-Shamir Schnorr variant.
///
/// The transcript covers `(g, h, a)` only, so the proof is not bound to the payout address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigmaScheme {
    params: GroupParams,
}

impl SigmaScheme {
    /// Creates the scheme over the given group.
    pub fn new(params: GroupParams) -> Self {
        Self { params }
    }
}

impl KnowledgeProofScheme for SigmaScheme {
    type Proof = SigmaProof;

    fn params(&self) -> &GroupParams {
        &self.params
    }

    fn prove(
        &self,
        rng: &mut impl CryptoRngCore,
        witness: &Witness,
        commitment: &Commitment,
        _payout: PayoutAddress,
    ) -> Result<Self::Proof, Error> {
        Ok(SigmaProof::new(rng, &self.params, witness, commitment))
    }

    fn verify(&self, commitment: &Commitment, proof: &Self::Proof, _payout: &PayoutAddress) -> Result<bool, Error> {
        Ok(proof.verify(&self.params, commitment))
    }

    fn decode_proof(&self, bytes: &[u8]) -> Result<Self::Proof, Error> {
        SigmaProof::try_from_bytes(bytes)
    }
}

/// The ECDSA signature variant. Requires the standard secp256k1 generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcdsaScheme {
    params: GroupParams,
}

impl EcdsaScheme {
    /// Creates the scheme; fails with [`Error::NonStandardGenerator`] for custom bases.
    pub fn new(params: GroupParams) -> Result<Self, Error> {
        if !params.is_standard() {
            return Err(Error::NonStandardGenerator);
        }
        Ok(Self { params })
    }
}

impl KnowledgeProofScheme for EcdsaScheme {
    type Proof = EcdsaProof;

    fn params(&self) -> &GroupParams {
        &self.params
    }

    fn prove(
        &self,
        rng: &mut impl CryptoRngCore,
        witness: &Witness,
        _commitment: &Commitment,
        payout: PayoutAddress,
    ) -> Result<Self::Proof, Error> {
        EcdsaProof::new(rng, witness, payout)
    }

    fn verify(&self, commitment: &Commitment, proof: &Self::Proof, payout: &PayoutAddress) -> Result<bool, Error> {
        if proof.payout() != payout {
            tracing::debug!("ECDSA proof signs {:?}, claimed for {:?}", proof.payout(), payout);
            return Ok(false);
        }
        Ok(proof.verify(commitment))
    }

    fn decode_proof(&self, bytes: &[u8]) -> Result<Self::Proof, Error> {
        EcdsaProof::try_from_bytes(bytes)
    }
}

/// A proof of either variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Proof {
    /// See [`SigmaProof`].
    Sigma(SigmaProof),
    /// See [`EcdsaProof`].
    Ecdsa(EcdsaProof),
}

impl Proof {
    /// The variant that produced this proof.
    pub fn variant(&self) -> ProofVariant {
        match self {
            Self::Sigma(_) => ProofVariant::Sigma,
            Self::Ecdsa(_) => ProofVariant::Ecdsa,
        }
    }

    /// The wire encoding of the inner proof.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Sigma(proof) => proof.to_bytes().to_vec(),
            Self::Ecdsa(proof) => proof.to_bytes().to_vec(),
        }
    }
}

/// The scheme selected by a [`ProofVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// See [`SigmaScheme`].
    Sigma(SigmaScheme),
    /// See [`EcdsaScheme`].
    Ecdsa(EcdsaScheme),
}

impl Scheme {
    /// Builds the configured scheme.
    pub fn new(params: GroupParams, variant: ProofVariant) -> Result<Self, Error> {
        Ok(match variant {
            ProofVariant::Sigma => Self::Sigma(SigmaScheme::new(params)),
            ProofVariant::Ecdsa => Self::Ecdsa(EcdsaScheme::new(params)?),
        })
    }

    /// The configured variant.
    pub fn variant(&self) -> ProofVariant {
        match self {
            Self::Sigma(_) => ProofVariant::Sigma,
            Self::Ecdsa(_) => ProofVariant::Ecdsa,
        }
    }
}

impl KnowledgeProofScheme for Scheme {
    type Proof = Proof;

    fn params(&self) -> &GroupParams {
        match self {
            Self::Sigma(scheme) => scheme.params(),
            Self::Ecdsa(scheme) => scheme.params(),
        }
    }

    fn prove(
        &self,
        rng: &mut impl CryptoRngCore,
        witness: &Witness,
        commitment: &Commitment,
        payout: PayoutAddress,
    ) -> Result<Self::Proof, Error> {
        Ok(match self {
            Self::Sigma(scheme) => Proof::Sigma(scheme.prove(rng, witness, commitment, payout)?),
            Self::Ecdsa(scheme) => Proof::Ecdsa(scheme.prove(rng, witness, commitment, payout)?),
        })
    }

    fn verify(&self, commitment: &Commitment, proof: &Self::Proof, payout: &PayoutAddress) -> Result<bool, Error> {
        match (self, proof) {
            (Self::Sigma(scheme), Proof::Sigma(proof)) => scheme.verify(commitment, proof, payout),
            (Self::Ecdsa(scheme), Proof::Ecdsa(proof)) => scheme.verify(commitment, proof, payout),
            _ => {
                tracing::warn!(
                    "Got a {:?} proof, expected {:?}",
                    proof.variant(),
                    self.variant()
                );
                Err(Error::VariantMismatch)
            }
        }
    }

    fn decode_proof(&self, bytes: &[u8]) -> Result<Self::Proof, Error> {
        Ok(match self {
            Self::Sigma(scheme) => Proof::Sigma(scheme.decode_proof(bytes)?),
            Self::Ecdsa(scheme) => Proof::Ecdsa(scheme.decode_proof(bytes)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use rand_core::OsRng;

    use super::{EcdsaScheme, KnowledgeProofScheme, Proof, Scheme, SigmaScheme, Verdict};
    use crate::address::PayoutAddress;
    use crate::commitment::{Commitment, Witness};
    use crate::curve::{Point, Scalar};
    use crate::params::{GroupParams, ProofVariant};
    use crate::Error;

    const PAYOUT: PayoutAddress = PayoutAddress::new([0x5a; 20]);

    fn setup(params: &GroupParams) -> (Witness, Commitment) {
        let witness = Witness::new(Scalar::random_nonzero(&mut OsRng)).unwrap();
        let commitment = Commitment::new(params, &witness);
        (witness, commitment)
    }

    fn completeness<S: KnowledgeProofScheme>(scheme: &S) {
        let (witness, commitment) = setup(scheme.params());
        let proof = scheme.prove(&mut OsRng, &witness, &commitment, PAYOUT).unwrap();
        assert!(scheme.verify(&commitment, &proof, &PAYOUT).unwrap());

        let (wrong_witness, _) = setup(scheme.params());
        let proof = scheme.prove(&mut OsRng, &wrong_witness, &commitment, PAYOUT).unwrap();
        assert!(!scheme.verify(&commitment, &proof, &PAYOUT).unwrap());
    }

    #[test]
    fn both_variants_are_complete_and_sound() {
        completeness(&SigmaScheme::new(GroupParams::default()));
        completeness(&EcdsaScheme::new(GroupParams::default()).unwrap());
        completeness(&Scheme::new(GroupParams::default(), ProofVariant::Sigma).unwrap());
        completeness(&Scheme::new(GroupParams::default(), ProofVariant::Ecdsa).unwrap());
    }

    #[test]
    fn ecdsa_variant_rejects_custom_bases() {
        let params = GroupParams::with_generator(&Point::GENERATOR * &Scalar::from(3)).unwrap();
        assert_eq!(EcdsaScheme::new(params), Err(Error::NonStandardGenerator));
        assert_eq!(
            Scheme::new(params, ProofVariant::Ecdsa),
            Err(Error::NonStandardGenerator)
        );
        assert!(Scheme::new(params, ProofVariant::Sigma).is_ok());
    }

    #[test]
    fn ecdsa_proof_is_bound_to_the_payout() {
        let scheme = EcdsaScheme::new(GroupParams::default()).unwrap();
        let (witness, commitment) = setup(scheme.params());
        let proof = scheme.prove(&mut OsRng, &witness, &commitment, PAYOUT).unwrap();
        let thief = PayoutAddress::new([0x66; 20]);
        assert!(!scheme.verify(&commitment, &proof, &thief).unwrap());
    }

    #[test_log::test]
    fn variant_mismatch_is_an_error() {
        let sigma = Scheme::new(GroupParams::default(), ProofVariant::Sigma).unwrap();
        let ecdsa = Scheme::new(GroupParams::default(), ProofVariant::Ecdsa).unwrap();
        let (witness, commitment) = setup(&GroupParams::default());

        let proof = ecdsa.prove(&mut OsRng, &witness, &commitment, PAYOUT).unwrap();
        assert!(matches!(proof, Proof::Ecdsa(_)));
        assert_eq!(
            sigma.verify(&commitment, &proof, &PAYOUT),
            Err(Error::VariantMismatch)
        );
    }

    #[test_log::test]
    fn adjudication() {
        let scheme = Scheme::new(GroupParams::default(), ProofVariant::Sigma).unwrap();
        let (witness, commitment) = setup(scheme.params());
        let proof = scheme.prove(&mut OsRng, &witness, &commitment, PAYOUT).unwrap();

        assert_eq!(
            scheme.adjudicate(&commitment.to_bytes(), &proof.to_bytes(), &PAYOUT),
            Ok(Verdict::Accepted)
        );

        let (_, other_commitment) = setup(scheme.params());
        assert_eq!(
            scheme.adjudicate(&other_commitment.to_bytes(), &proof.to_bytes(), &PAYOUT),
            Ok(Verdict::Rejected)
        );

        assert!(matches!(
            scheme.adjudicate(&commitment.to_bytes(), &proof.to_bytes()[1..], &PAYOUT),
            Err(Error::InvalidEncoding(_))
        ));
        assert!(matches!(
            scheme.adjudicate(&[0u8; 33], &proof.to_bytes(), &PAYOUT),
            Err(Error::InvalidEncoding(_))
        ));
    }
}
