//! Deriving witnesses from puzzle solutions.

use alloc::string::String;
use alloc::vec::Vec;

use rand_core::CryptoRngCore;

use crate::address::PayoutAddress;
use crate::commitment::{Commitment, Witness};
use crate::ecdsa_proof::EcdsaProof;
use crate::error::Error;
use crate::params::GroupParams;
use crate::sigma::SigmaProof;
use crate::tools::hashing::{Chain, Hash};

/// Maps a solution to a witness scalar.
///
/// Implementations own the canonicalization of the answers;
/// the proof engine only relies on the output looking uniformly distributed.
pub trait PuzzleHash {
    /// Hashes the ordered answers into a witness.
    fn witness(&self, solution: &PuzzleSolution) -> Result<Witness, Error>;
}

/// SHA-256 over a domain tag, the number of answers, and each answer prefixed with its length,
/// reduced modulo the group order.
///
/// The answers are hashed in order, so permuting them changes the witness.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPuzzleHash;

impl PuzzleHash for DefaultPuzzleHash {
    fn witness(&self, solution: &PuzzleSolution) -> Result<Witness, Error> {
        let scalar = Hash::new_with_dst(b"puzzle-solution")
            .chain(&solution.answers)
            .finalize_to_scalar();
        Witness::new(scalar)
    }
}

/// An ordered list of answers to a puzzle.
#[derive(Clone, PartialEq, Eq)]
pub struct PuzzleSolution {
    answers: Vec<String>,
}

impl PuzzleSolution {
    /// Creates a solution from its answers, in order.
    pub fn new(answers: Vec<String>) -> Self {
        Self { answers }
    }

    /// The answers.
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// The witness under [`DefaultPuzzleHash`].
    pub fn witness(&self) -> Result<Witness, Error> {
        self.witness_with(&DefaultPuzzleHash)
    }

    /// The witness under a custom [`PuzzleHash`].
    pub fn witness_with(&self, hash: &impl PuzzleHash) -> Result<Witness, Error> {
        hash.witness(self)
    }

    /// Author side: derives the witness and the commitment to post.
    pub fn commit(&self, params: &GroupParams) -> Result<(Witness, Commitment), Error> {
        self.commit_with(&DefaultPuzzleHash, params)
    }

    /// [`PuzzleSolution::commit`] under a custom [`PuzzleHash`].
    pub fn commit_with(
        &self,
        hash: &impl PuzzleHash,
        params: &GroupParams,
    ) -> Result<(Witness, Commitment), Error> {
        let witness = self.witness_with(hash)?;
        let commitment = Commitment::new(params, &witness);
        Ok((witness, commitment))
    }

    /// Player side: checks `g^{w'} = h` locally before bothering to build a proof.
    pub fn matches(&self, params: &GroupParams, commitment: &Commitment) -> Result<bool, Error> {
        self.matches_with(&DefaultPuzzleHash, params, commitment)
    }

    /// [`PuzzleSolution::matches`] under a custom [`PuzzleHash`].
    pub fn matches_with(
        &self,
        hash: &impl PuzzleHash,
        params: &GroupParams,
        commitment: &Commitment,
    ) -> Result<bool, Error> {
        Ok(commitment.is_opened_by(params, &self.witness_with(hash)?))
    }

    /// Player side: checks the guess against the commitment and builds a Sigma proof.
    ///
    /// Fails with [`Error::InvalidWitness`] if the guess does not open the commitment.
    pub fn prove_sigma(
        &self,
        rng: &mut impl CryptoRngCore,
        params: &GroupParams,
        commitment: &Commitment,
    ) -> Result<SigmaProof, Error> {
        self.prove_sigma_with(&DefaultPuzzleHash, rng, params, commitment)
    }

    /// [`PuzzleSolution::prove_sigma`] under a custom [`PuzzleHash`].
    pub fn prove_sigma_with(
        &self,
        hash: &impl PuzzleHash,
        rng: &mut impl CryptoRngCore,
        params: &GroupParams,
        commitment: &Commitment,
    ) -> Result<SigmaProof, Error> {
        let witness = self.checked_witness(hash, params, commitment)?;
        Ok(SigmaProof::new(rng, params, &witness, commitment))
    }

    /// Player side: checks the guess against the commitment and signs the payout address.
    ///
    /// Fails with [`Error::InvalidWitness`] if the guess does not open the commitment.
    pub fn prove_ecdsa(
        &self,
        rng: &mut impl CryptoRngCore,
        params: &GroupParams,
        commitment: &Commitment,
        payout: PayoutAddress,
    ) -> Result<EcdsaProof, Error> {
        self.prove_ecdsa_with(&DefaultPuzzleHash, rng, params, commitment, payout)
    }

    /// [`PuzzleSolution::prove_ecdsa`] under a custom [`PuzzleHash`].
    pub fn prove_ecdsa_with(
        &self,
        hash: &impl PuzzleHash,
        rng: &mut impl CryptoRngCore,
        params: &GroupParams,
        commitment: &Commitment,
        payout: PayoutAddress,
    ) -> Result<EcdsaProof, Error> {
        if !params.is_standard() {
            return Err(Error::NonStandardGenerator);
        }
        let witness = self.checked_witness(hash, params, commitment)?;
        EcdsaProof::new(rng, &witness, payout)
    }

    fn checked_witness(
        &self,
        hash: &impl PuzzleHash,
        params: &GroupParams,
        commitment: &Commitment,
    ) -> Result<Witness, Error> {
        let witness = self.witness_with(hash)?;
        if !commitment.is_opened_by(params, &witness) {
            return Err(Error::InvalidWitness);
        }
        Ok(witness)
    }
}

impl core::fmt::Debug for PuzzleSolution {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PuzzleSolution({} answers)", self.answers.len())
    }
}
