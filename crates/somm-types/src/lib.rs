use std::fmt::Display;

pub use alloy_primitives::{Address, B256, Bytes};
pub use somm_proto::{DecodeError, DomainType, transaction::KeyPair};

#[derive(thiserror::Error, Debug)]
#[error("cannot parse invalid {type_name}: {reason}")]
pub struct ParseError {
    type_name: &'static str,
    reason: String,
}

impl ParseError {
    pub fn new<T>(reason: impl Display) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            reason: reason.to_string(),
        }
    }
}

/// Implement [`DomainType`] for a type with `From`/`TryFrom` conversions to and from its proto.
macro_rules! domain_type {
    ($t:ty => $proto:ty) => {
        impl ::somm_proto::DomainType for $t {
            type Proto = $proto;

            fn to_proto(&self) -> Self::Proto {
                self.clone().into()
            }

            fn try_from_proto(proto: Self::Proto) -> Result<Self, ::somm_proto::DecodeError> {
                Self::try_from(proto).map_err(::somm_proto::DecodeError::invalid)
            }
        }
    };
}

mod address;
pub use address::{OrchestratorAddress, ValidatorAddress};

mod decimal;
pub use decimal::Decimal;

mod cork;
pub use cork::{ContractCall, Cork, CorkResult, OutgoingContractCall, ScheduledCork};

mod params;
pub use params::Params;

mod validator;
pub use validator::{Power, Validator};

mod genesis;
pub use genesis::GenesisState;

mod event;
pub use event::Event;

pub mod response;
pub mod transaction;
