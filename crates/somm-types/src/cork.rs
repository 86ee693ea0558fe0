use std::str::FromStr;

use alloy_primitives::{Address, B256, Bytes, keccak256};
use serde::{Deserialize, Serialize};
use somm_proto::cork as proto;

use crate::{Decimal, ParseError, ValidatorAddress};

/// A contract call a validator proposes to run against a managed cellar.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cork {
    pub target_contract_address: Address,
    pub encoded_contract_call: Bytes,
    /// Optional label naming the logical slot this call occupies on the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl Cork {
    /// The identity of the instruction slot this cork occupies on the bridge.
    ///
    /// With a scope label, every cork carrying that label for the same target shares one slot.
    /// Without one, the slot is specific to the exact call.
    pub fn invalidation_scope(&self) -> B256 {
        let mut preimage = self.target_contract_address.to_vec();
        match &self.scope {
            Some(label) => preimage.extend_from_slice(label.as_bytes()),
            None => preimage.extend_from_slice(&self.encoded_contract_call),
        }
        keccak256(preimage)
    }

    /// The identifier of this cork when scheduled for the given height.
    pub fn id(&self, block_height: u64) -> B256 {
        let mut preimage = block_height.to_be_bytes().to_vec();
        preimage.extend_from_slice(self.target_contract_address.as_slice());
        preimage.extend_from_slice(self.invalidation_scope().as_slice());
        preimage.extend_from_slice(&self.encoded_contract_call);
        keccak256(preimage)
    }

    /// The instruction handed to the bridge when this cork is approved.
    pub fn contract_call(&self) -> ContractCall {
        ContractCall {
            invalidation_scope: self.invalidation_scope(),
            target: self.target_contract_address,
            payload: self.encoded_contract_call.clone(),
        }
    }
}

/// A validator's cork vote bound to a target height.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledCork {
    pub cork: Cork,
    pub block_height: u64,
    pub validator: ValidatorAddress,
    pub id: B256,
}

impl ScheduledCork {
    pub fn new(cork: Cork, block_height: u64, validator: ValidatorAddress) -> Self {
        let id = cork.id(block_height);
        Self {
            cork,
            block_height,
            validator,
            id,
        }
    }
}

/// The outcome of tallying one group of identical corks at their target height.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorkResult {
    pub cork: Cork,
    pub block_height: u64,
    pub approved: bool,
    pub approval_percentage: Decimal,
}

/// An instruction as submitted to the outgoing bridge queue.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContractCall {
    pub invalidation_scope: B256,
    pub target: Address,
    pub payload: Bytes,
}

/// An instruction queued for relay, stamped with its invalidation nonce.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingContractCall {
    pub invalidation_nonce: u64,
    pub invalidation_scope: B256,
    pub target: Address,
    pub payload: Bytes,
    pub block_height: u64,
}

fn parse_address(s: &str) -> Result<Address, ParseError> {
    Address::from_str(s).map_err(ParseError::new::<Address>)
}

fn parse_b256(bytes: &[u8]) -> Result<B256, ParseError> {
    B256::try_from(bytes).map_err(|_| {
        ParseError::new::<B256>(format!("expected 32 bytes, got {}", bytes.len()))
    })
}

impl TryFrom<proto::Cork> for Cork {
    type Error = ParseError;

    fn try_from(
        proto::Cork {
            encoded_contract_call,
            target_contract_address,
            scope,
        }: proto::Cork,
    ) -> Result<Self, Self::Error> {
        Ok(Cork {
            target_contract_address: parse_address(&target_contract_address)?,
            encoded_contract_call: encoded_contract_call.into(),
            scope: (!scope.is_empty()).then_some(scope),
        })
    }
}

impl From<Cork> for proto::Cork {
    fn from(cork: Cork) -> Self {
        proto::Cork {
            encoded_contract_call: cork.encoded_contract_call.0,
            target_contract_address: cork.target_contract_address.to_string(),
            scope: cork.scope.unwrap_or_default(),
        }
    }
}

impl TryFrom<proto::ScheduledCork> for ScheduledCork {
    type Error = ParseError;

    fn try_from(proto: proto::ScheduledCork) -> Result<Self, Self::Error> {
        let cork: Cork = proto
            .cork
            .ok_or_else(|| ParseError::new::<ScheduledCork>("missing cork"))?
            .try_into()?;
        let id = parse_b256(&proto.id)?;
        if id != cork.id(proto.block_height) {
            return Err(ParseError::new::<ScheduledCork>(format!(
                "id {id} does not match cork contents"
            )));
        }
        Ok(ScheduledCork {
            cork,
            block_height: proto.block_height,
            validator: proto.validator.try_into()?,
            id,
        })
    }
}

impl From<ScheduledCork> for proto::ScheduledCork {
    fn from(scheduled: ScheduledCork) -> Self {
        proto::ScheduledCork {
            cork: Some(scheduled.cork.into()),
            block_height: scheduled.block_height,
            validator: scheduled.validator.into(),
            id: prost::bytes::Bytes::copy_from_slice(scheduled.id.as_slice()),
        }
    }
}

impl TryFrom<proto::CorkResult> for CorkResult {
    type Error = ParseError;

    fn try_from(proto: proto::CorkResult) -> Result<Self, Self::Error> {
        Ok(CorkResult {
            cork: proto
                .cork
                .ok_or_else(|| ParseError::new::<CorkResult>("missing cork"))?
                .try_into()?,
            block_height: proto.block_height,
            approved: proto.approved,
            approval_percentage: proto.approval_percentage.parse()?,
        })
    }
}

impl From<CorkResult> for proto::CorkResult {
    fn from(result: CorkResult) -> Self {
        proto::CorkResult {
            cork: Some(result.cork.into()),
            block_height: result.block_height,
            approved: result.approved,
            approval_percentage: result.approval_percentage.to_string(),
        }
    }
}

impl TryFrom<proto::OutgoingContractCall> for OutgoingContractCall {
    type Error = ParseError;

    fn try_from(proto: proto::OutgoingContractCall) -> Result<Self, Self::Error> {
        Ok(OutgoingContractCall {
            invalidation_nonce: proto.invalidation_nonce,
            invalidation_scope: parse_b256(&proto.invalidation_scope)?,
            target: parse_address(&proto.target_contract_address)?,
            payload: proto.payload.into(),
            block_height: proto.block_height,
        })
    }
}

impl From<OutgoingContractCall> for proto::OutgoingContractCall {
    fn from(call: OutgoingContractCall) -> Self {
        proto::OutgoingContractCall {
            invalidation_nonce: call.invalidation_nonce,
            invalidation_scope: prost::bytes::Bytes::copy_from_slice(
                call.invalidation_scope.as_slice(),
            ),
            target_contract_address: call.target.to_string(),
            payload: call.payload.0,
            block_height: call.block_height,
        }
    }
}

domain_type!(Cork => proto::Cork);
domain_type!(ScheduledCork => proto::ScheduledCork);
domain_type!(CorkResult => proto::CorkResult);
domain_type!(OutgoingContractCall => proto::OutgoingContractCall);
