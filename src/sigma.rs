//! Schnorr proof of knowledge made non-interactive with Fiat-Shamir.
//!
//! Publish $h$ and prove that we know a secret $w$ such that $g^w = h$,
//! where $g$ is the configured base.

use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use crate::commitment::{Commitment, Witness};
use crate::curve::{Point, Scalar, COMPRESSED_POINT_SIZE, SCALAR_SIZE};
use crate::error::Error;
use crate::params::GroupParams;
use crate::transcript::challenge;

/// Length of the `a || z` proof encoding.
pub const SIGMA_PROOF_SIZE: usize = COMPRESSED_POINT_SIZE + SCALAR_SIZE;

/// Schnorr PoK of the discrete log of a [`Commitment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigmaProof {
    /// `a = g^r`
    a: Point,
    /// `z = w * e + r`
    z: Scalar,
}

impl SigmaProof {
    /// Create a proof that we know the discrete log of `commitment`.
    ///
    /// The prover does not check that `witness` opens `commitment`;
    /// with the wrong witness the proof is simply rejected by the verifier.
    pub fn new(
        rng: &mut impl CryptoRngCore,
        params: &GroupParams,
        witness: &Witness,
        commitment: &Commitment,
    ) -> Self {
        let g = params.generator();
        let r = Scalar::random_nonzero(rng);
        let a = g * &r;
        let e = challenge(g, commitment.as_point(), &a);
        let z = &(&e * witness.expose_secret()) + &r;
        Self { a, z }
    }

    /// Verify that the proof is correct for a secret corresponding to the given `commitment`,
    /// that is `a · h^e = g^z`.
    pub fn verify(&self, params: &GroupParams, commitment: &Commitment) -> bool {
        let g = params.generator();
        let h = commitment.as_point();
        let e = challenge(g, h, &self.a);
        let accepted = &self.a + &(h * &e) == g * &self.z;
        if !accepted {
            tracing::debug!("Sigma proof rejected");
        }
        accepted
    }

    /// Verifies a proof given in wire encoding against a commitment in wire encoding.
    ///
    /// Malformed encodings are errors; only a decodable but incorrect proof yields `Ok(false)`.
    pub fn verify_encoded(params: &GroupParams, commitment: &[u8], proof: &[u8]) -> Result<bool, Error> {
        let commitment = Commitment::try_from_bytes(commitment)?;
        let proof = Self::try_from_bytes(proof)?;
        Ok(proof.verify(params, &commitment))
    }

    /// The prover's commitment to its randomness.
    pub fn a(&self) -> &Point {
        &self.a
    }

    /// The response.
    pub fn z(&self) -> &Scalar {
        &self.z
    }

    /// Encodes as `a || z` (33 + 32 bytes).
    pub fn to_bytes(&self) -> [u8; SIGMA_PROOF_SIZE] {
        let mut bytes = [0u8; SIGMA_PROOF_SIZE];
        let (a, z) = bytes.split_at_mut(COMPRESSED_POINT_SIZE);
        a.copy_from_slice(&self.a.to_compressed_bytes());
        z.copy_from_slice(&self.z.to_be_bytes());
        bytes
    }

    /// Decodes an `a || z` encoding.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != SIGMA_PROOF_SIZE {
            return Err(Error::InvalidEncoding("a Sigma proof must be 65 bytes long"));
        }
        let (a, z) = bytes.split_at(COMPRESSED_POINT_SIZE);
        Ok(Self {
            a: Point::try_from_compressed_bytes(a)?,
            z: Scalar::try_from_be_bytes(z)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_core::{OsRng, SeedableRng};
    use serde::{Deserialize, Serialize};
    use serde_assert::{Deserializer, Serializer, Token};

    use super::SigmaProof;
    use crate::commitment::{Commitment, Witness};
    use crate::curve::{Point, Scalar};
    use crate::params::GroupParams;
    use crate::Error;

    fn random_witness() -> Witness {
        Witness::new(Scalar::random_nonzero(&mut OsRng)).unwrap()
    }

    #[test_log::test]
    fn protocol() {
        let params = GroupParams::default();
        let witness = random_witness();
        let commitment = Commitment::new(&params, &witness);

        let proof = SigmaProof::new(&mut OsRng, &params, &witness, &commitment);
        assert!(proof.verify(&params, &commitment));
    }

    #[test]
    fn protocol_with_alternative_base() {
        let params = GroupParams::with_generator(&Point::GENERATOR * &Scalar::from(7)).unwrap();
        let witness = random_witness();
        let commitment = Commitment::new(&params, &witness);

        let proof = SigmaProof::new(&mut OsRng, &params, &witness, &commitment);
        assert!(proof.verify(&params, &commitment));
        assert!(!proof.verify(&GroupParams::default(), &commitment));
    }

    #[test_log::test]
    fn wrong_witnesses_are_rejected() {
        let params = GroupParams::default();
        let commitment = Commitment::new(&params, &random_witness());
        for _ in 0..32 {
            let wrong = random_witness();
            let proof = SigmaProof::new(&mut OsRng, &params, &wrong, &commitment);
            assert!(!proof.verify(&params, &commitment));
        }
    }

    #[test]
    fn seeded_proofs_are_reproducible() {
        let params = GroupParams::default();
        let witness = Witness::new(Scalar::from(42)).unwrap();
        let commitment = Commitment::new(&params, &witness);

        let p1 = SigmaProof::new(&mut ChaCha8Rng::seed_from_u64(1), &params, &witness, &commitment);
        let p2 = SigmaProof::new(&mut ChaCha8Rng::seed_from_u64(1), &params, &witness, &commitment);
        let p3 = SigmaProof::new(&mut ChaCha8Rng::seed_from_u64(2), &params, &witness, &commitment);
        assert_eq!(p1, p2);
        assert_ne!(p1.a(), p3.a());
        assert!(p3.verify(&params, &commitment));
    }

    #[test]
    fn tampered_responses_are_rejected() {
        let params = GroupParams::default();
        let witness = random_witness();
        let commitment = Commitment::new(&params, &witness);
        let proof = SigmaProof::new(&mut OsRng, &params, &witness, &commitment);

        let tampered = SigmaProof {
            a: *proof.a(),
            z: proof.z() + &Scalar::ONE,
        };
        assert!(!tampered.verify(&params, &commitment));
    }

    #[test]
    fn flipping_the_commitment_parity_breaks_the_binding() {
        let params = GroupParams::default();
        let witness = random_witness();
        let commitment = Commitment::new(&params, &witness);
        let proof = SigmaProof::new(&mut OsRng, &params, &witness, &commitment);

        let mut h_bytes = commitment.to_bytes();
        assert_eq!(
            SigmaProof::verify_encoded(&params, &h_bytes, &proof.to_bytes()),
            Ok(true)
        );

        // 0x02 <-> 0x03 encodes -h, which is always a valid point
        h_bytes[0] ^= 0x01;
        assert_eq!(
            SigmaProof::verify_encoded(&params, &h_bytes, &proof.to_bytes()),
            Ok(false)
        );
    }

    #[test]
    fn malformed_encodings_are_errors_not_rejections() {
        let params = GroupParams::default();
        let witness = random_witness();
        let commitment = Commitment::new(&params, &witness);
        let proof = SigmaProof::new(&mut OsRng, &params, &witness, &commitment);

        let mut bad_a = proof.to_bytes();
        bad_a[0] = 0x02;
        bad_a[1..33].fill(0);
        bad_a[32] = 5;
        assert_eq!(
            SigmaProof::verify_encoded(&params, &commitment.to_bytes(), &bad_a),
            Err(Error::PointNotOnCurve)
        );

        assert!(matches!(
            SigmaProof::verify_encoded(&params, &commitment.to_bytes()[..20], &proof.to_bytes()),
            Err(Error::InvalidEncoding(_))
        ));

        let mut bad_z = proof.to_bytes();
        bad_z[33..].fill(0xff);
        assert!(matches!(
            SigmaProof::try_from_bytes(&bad_z),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn encoding_round_trip() {
        let params = GroupParams::default();
        let witness = random_witness();
        let commitment = Commitment::new(&params, &witness);
        let proof = SigmaProof::new(&mut OsRng, &params, &witness, &commitment);
        assert_eq!(SigmaProof::try_from_bytes(&proof.to_bytes()).unwrap(), proof);
    }

    fn z_bytes(proof: &SigmaProof) -> [u8; 32] {
        let mut z = [0u8; 32];
        z.copy_from_slice(&proof.z().to_be_bytes());
        z
    }

    fn proof_tokens(a: [u8; 33], z: [u8; 32]) -> [Token; 6] {
        [
            Token::Struct {
                name: "SigmaProof",
                len: 2,
            },
            Token::Field("a"),
            Token::Str(hex::encode(a)),
            Token::Field("z"),
            Token::Str(hex::encode(z)),
            Token::StructEnd,
        ]
    }

    #[test]
    fn serde_round_trip() {
        let params = GroupParams::default();
        let witness = random_witness();
        let commitment = Commitment::new(&params, &witness);
        let proof = SigmaProof::new(&mut OsRng, &params, &witness, &commitment);

        let serializer = Serializer::builder().build();
        let tokens = proof.serialize(&serializer).unwrap();
        let mut deserializer = Deserializer::builder(tokens).build();
        let decoded = SigmaProof::deserialize(&mut deserializer).unwrap();
        assert_eq!(decoded, proof);
        assert!(decoded.verify(&params, &commitment));

        let mut deserializer =
            Deserializer::builder(proof_tokens(proof.a().to_compressed_bytes(), z_bytes(&proof)))
                .build();
        assert_eq!(SigmaProof::deserialize(&mut deserializer).unwrap(), proof);
    }

    #[test]
    fn serde_rejects_invalid_components() {
        let params = GroupParams::default();
        let witness = random_witness();
        let commitment = Commitment::new(&params, &witness);
        let proof = SigmaProof::new(&mut OsRng, &params, &witness, &commitment);
        let z = z_bytes(&proof);

        let mut off_curve = [0u8; 33];
        off_curve[0] = 0x02;
        off_curve[32] = 0x05;
        let mut deserializer = Deserializer::builder(proof_tokens(off_curve, z)).build();
        assert!(SigmaProof::deserialize(&mut deserializer).is_err());

        let mut deserializer = Deserializer::builder(proof_tokens([0u8; 33], z)).build();
        assert!(SigmaProof::deserialize(&mut deserializer).is_err());

        let mut deserializer =
            Deserializer::builder(proof_tokens(proof.a().to_compressed_bytes(), [0xff; 32])).build();
        assert!(SigmaProof::deserialize(&mut deserializer).is_err());
    }
}
