use std::{fmt, str::FromStr};

use prost::bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::ParseError;

macro_rules! address_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(pub [u8; 20]);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix("0x").unwrap_or(s);
                let bytes = hex::decode(s).map_err(ParseError::new::<$name>)?;
                Self::try_from(bytes.as_slice())
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = ParseError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                <[u8; 20]>::try_from(bytes)
                    .map($name)
                    .map_err(|_| ParseError::new::<$name>(format!("expected 20 bytes, got {}", bytes.len())))
            }
        }

        impl TryFrom<Bytes> for $name {
            type Error = ParseError;

            fn try_from(bytes: Bytes) -> Result<Self, Self::Error> {
                Self::try_from(bytes.as_ref())
            }
        }

        impl From<$name> for Bytes {
            fn from(address: $name) -> Self {
                Bytes::copy_from_slice(&address.0)
            }
        }

        impl TryFrom<Vec<u8>> for $name {
            type Error = ParseError;

            fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
                Self::try_from(bytes.as_slice())
            }
        }

        impl From<$name> for Vec<u8> {
            fn from(address: $name) -> Self {
                address.0.to_vec()
            }
        }

        domain_type!($name => Vec<u8>);

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

address_type!(
    /// The operator address of a bonded validator.
    ValidatorAddress
);

address_type!(
    /// The address of the delegate key a validator signs cork submissions with.
    OrchestratorAddress
);

impl OrchestratorAddress {
    /// The first 20 bytes of the SHA-256 hash of the orchestrator's public key.
    pub fn from_public_key(public_key: &[u8]) -> Self {
        let hash: [u8; 32] = Sha256::digest(public_key).into();
        let mut address = [0; 20];
        address.copy_from_slice(&hash[0..20]);
        OrchestratorAddress(address)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hex_round_trip_accepts_prefix() {
        let address: ValidatorAddress = "0x0101010101010101010101010101010101010101".parse().unwrap();
        assert_eq!(address, ValidatorAddress([1; 20]));
        assert_eq!(address.to_string(), "01".repeat(20));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!("abcd".parse::<ValidatorAddress>().is_err());
        assert!("zz".repeat(20).parse::<OrchestratorAddress>().is_err());
    }

    #[test]
    fn orchestrator_address_is_hash_prefix() {
        let address = OrchestratorAddress::from_public_key(b"some public key");
        let hash = Sha256::digest(b"some public key");
        assert_eq!(&address.0[..], &hash[..20]);
    }
}
