/// Errors surfaced by the proof engine.
///
/// A proof that is well-formed but does not verify is not an error;
/// it is reported as `false` (or [`Verdict::Rejected`](crate::Verdict::Rejected)).
#[derive(displaydoc::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Malformed byte input: {0}.
    InvalidEncoding(&'static str),
    /// The encoded point is not a valid non-identity point on the curve.
    PointNotOnCurve,
    /// The witness is out of range or does not open the commitment.
    InvalidWitness,
    /// The ECDSA variant requires the standard curve generator.
    NonStandardGenerator,
    /// The proof was produced by a different proof variant than the one configured.
    VariantMismatch,
    /// The signing backend failed to produce a signature.
    SigningFailed,
}

impl core::error::Error for Error {}
