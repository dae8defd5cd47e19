use core::fmt;

use digest::Digest;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_encoded_bytes::{Hex, SliceLike};
use sha3::Keccak256;

use crate::curve::Point;
use crate::error::Error;

/// Length of an account address.
pub const ADDRESS_SIZE: usize = 20;

// ABI encoding left-pads an address to a full 32-byte word.
const ABI_WORD_SIZE: usize = 32;

/// The Ethereum-style account a Player wants the reward paid to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PayoutAddress([u8; ADDRESS_SIZE]);

impl PayoutAddress {
    /// Wraps raw address bytes.
    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    /// The address controlled by the private key behind `public_key`:
    /// the last 20 bytes of `Keccak-256(x || y)`.
    pub fn from_public_key(public_key: &Point) -> Self {
        let uncompressed = public_key.to_uncompressed_bytes();
        // Skip the SEC1 tag byte
        let coordinates = uncompressed.get(1..).unwrap_or_default();
        let digest = Keccak256::digest(coordinates);
        let (_, tail) = digest.split_at(ABI_WORD_SIZE - ADDRESS_SIZE);
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes.copy_from_slice(tail);
        Self(bytes)
    }

    /// The raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    /// Decodes a 20-byte address.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; ADDRESS_SIZE] = bytes
            .try_into()
            .map_err(|_| Error::InvalidEncoding("an address must be 20 bytes long"))?;
        Ok(Self(bytes))
    }

    /// The canonical message encoding: the address left-padded to a 32-byte word.
    pub fn abi_encode(&self) -> [u8; ABI_WORD_SIZE] {
        let mut word = [0u8; ABI_WORD_SIZE];
        let (_, tail) = word.split_at_mut(ABI_WORD_SIZE - ADDRESS_SIZE);
        tail.copy_from_slice(&self.0);
        word
    }

    /// The 32-byte prehash an ECDSA proof signs: `Keccak-256` of the ABI encoding.
    pub(crate) fn message_prehash(&self) -> [u8; 32] {
        Keccak256::digest(self.abi_encode()).into()
    }
}

impl fmt::Debug for PayoutAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PayoutAddress(0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl<'a> TryFrom<&'a [u8]> for PayoutAddress {
    type Error = Error;
    fn try_from(val: &'a [u8]) -> Result<Self, Self::Error> {
        Self::try_from_bytes(val)
    }
}

impl Serialize for PayoutAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SliceLike::<Hex>::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for PayoutAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SliceLike::<Hex>::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::PayoutAddress;
    use crate::curve::{Point, Scalar};

    #[test]
    fn address_of_a_known_key() {
        // The well-known account for private key 1.
        let public = &Point::GENERATOR * &Scalar::from(1);
        let expected = hex::decode("7e5f4552091a69125d5dfcb7b8c2659029395bdf").unwrap();
        assert_eq!(
            PayoutAddress::from_public_key(&public).as_bytes().as_slice(),
            expected.as_slice()
        );
    }

    #[test]
    fn abi_encoding_left_pads() {
        let address = PayoutAddress::new([0xab; 20]);
        let word = address.abi_encode();
        assert_eq!(&word[..12], &[0u8; 12]);
        assert_eq!(&word[12..], &[0xab; 20]);
    }

    #[test]
    fn decoding_checks_the_length() {
        assert!(PayoutAddress::try_from_bytes(&[1u8; 19]).is_err());
        let address = PayoutAddress::try_from_bytes(&[1u8; 20]).unwrap();
        assert_eq!(
            format!("{address:?}"),
            "PayoutAddress(0x0101010101010101010101010101010101010101)"
        );
    }
}
