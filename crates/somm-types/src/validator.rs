use std::fmt;

use serde::{Deserialize, Serialize};
use somm_proto::cork as proto;

use crate::{OrchestratorAddress, ParseError, ValidatorAddress};

/// Voting power of a validator.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Power(pub u64);

impl Power {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Power({})", self.0)
    }
}

impl From<u64> for Power {
    fn from(power: u64) -> Self {
        Power(power)
    }
}

impl From<Power> for u64 {
    fn from(power: Power) -> Self {
        power.0
    }
}

domain_type!(Power => u64);

/// A validator as known to the chain: its operator address, the orchestrator key it delegates
/// cork signing to, and its voting power.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub address: ValidatorAddress,
    pub orchestrator: OrchestratorAddress,
    pub power: Power,
}

impl TryFrom<proto::Validator> for Validator {
    type Error = ParseError;

    fn try_from(proto: proto::Validator) -> Result<Self, Self::Error> {
        Ok(Validator {
            address: proto.address.try_into()?,
            orchestrator: proto.orchestrator.try_into()?,
            power: Power(proto.power),
        })
    }
}

impl From<Validator> for proto::Validator {
    fn from(validator: Validator) -> Self {
        proto::Validator {
            address: validator.address.into(),
            orchestrator: validator.orchestrator.into(),
            power: validator.power.0,
        }
    }
}

domain_type!(Validator => proto::Validator);
