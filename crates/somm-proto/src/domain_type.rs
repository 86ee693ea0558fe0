use std::fmt::Display;

use prost::Message;

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error(transparent)]
    Protobuf(#[from] prost::DecodeError),
    #[error("invalid {0}")]
    Invalid(String),
}

impl DecodeError {
    pub fn invalid(e: impl Display) -> Self {
        DecodeError::Invalid(e.to_string())
    }
}

/// A domain type with a canonical protobuf encoding.
///
/// Values in state are always stored in their protobuf form: decoding goes through
/// [`DomainType::try_from_proto`], so anything that comes out of state has been validated.
pub trait DomainType: Clone + Sized {
    type Proto: Message + Default;

    fn to_proto(&self) -> Self::Proto;

    fn try_from_proto(proto: Self::Proto) -> Result<Self, DecodeError>;

    fn encode_to_vec(&self) -> Vec<u8> {
        self.to_proto().encode_to_vec()
    }

    fn decode(buf: impl AsRef<[u8]>) -> Result<Self, DecodeError> {
        Self::try_from_proto(Self::Proto::decode(buf.as_ref())?)
    }
}

macro_rules! identity_domain_type {
    ($($t:ty),*) => {
        $(
            impl DomainType for $t {
                type Proto = $t;

                fn to_proto(&self) -> Self::Proto {
                    self.clone()
                }

                fn try_from_proto(proto: Self::Proto) -> Result<Self, DecodeError> {
                    Ok(proto)
                }
            }
        )*
    };
}

identity_domain_type!((), u64, String, Vec<u8>);
