//! This module is an adapter to the ECC backend.
//! `elliptic_curves` has a somewhat unstable API,
//! and we isolate all the related logic here.

mod arithmetic;
mod ecdsa;

pub use arithmetic::{Point, Scalar, COMPRESSED_POINT_SIZE, SCALAR_SIZE, UNCOMPRESSED_POINT_SIZE};

pub use self::ecdsa::{RecoverableSignature, RECOVERABLE_SIGNATURE_SIZE};
