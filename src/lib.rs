#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    missing_docs,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]
#![cfg_attr(not(test), warn(clippy::unwrap_used, clippy::indexing_slicing))]

extern crate alloc;

mod address;
mod commitment;
mod curve;
mod ecdsa_proof;
mod error;
mod params;
mod puzzle;
mod scheme;
mod sigma;
mod tools;
pub mod transcript;

// Some re-exports to avoid the need for version-matching
pub use k256;
pub use signature;

pub use address::{PayoutAddress, ADDRESS_SIZE};
pub use commitment::{Commitment, Witness};
pub use curve::{
    Point, RecoverableSignature, Scalar, COMPRESSED_POINT_SIZE, RECOVERABLE_SIGNATURE_SIZE, SCALAR_SIZE,
    UNCOMPRESSED_POINT_SIZE,
};
pub use ecdsa_proof::{EcdsaProof, ExportedProof, ECDSA_PROOF_SIZE};
pub use error::Error;
pub use params::{GroupParams, ProofVariant};
pub use puzzle::{DefaultPuzzleHash, PuzzleHash, PuzzleSolution};
pub use scheme::{EcdsaScheme, KnowledgeProofScheme, Proof, Scheme, SigmaScheme, Verdict};
pub use sigma::{SigmaProof, SIGMA_PROOF_SIZE};
