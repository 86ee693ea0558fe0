use std::{fmt, ops::Deref};

use alloy_primitives::Address;
use prost::bytes::Bytes;
use ring::digest::{Context, SHA256};
use serde::{Deserialize, Serialize};
use somm_proto::transaction::{self as proto, SignError, Signer};

use crate::{Cork, OrchestratorAddress, Params};

/// Type conversions between the protobuf-generated types and the domain types.
mod convert;

mod build;
pub use build::Builder;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub String);

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub chain_id: ChainId,
    pub actions: Vec<Action>,
}

/// A transaction that has been signed and whose signatures have been verified.
///
/// This transaction is not necessarily valid, either internally or against the current state.
/// However, it is guaranteed that it was signed by the claimed public keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedTx(Transaction);

impl Deref for AuthenticatedTx {
    type Target = Transaction;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AuthenticatedTx {
    /// Decode a transaction from bytes, verify all its signatures, and convert it into the domain
    /// type.
    pub fn from_proto<B: AsRef<[u8]>>(buf: B) -> Result<AuthenticatedTx, crate::ParseError> {
        let tx = proto::Transaction::authenticate_from_proto(Context::new(&SHA256), buf)
            .map_err(|_| crate::ParseError::new::<Transaction>("signature verification failed"))?;
        Ok(AuthenticatedTx(tx.try_into()?))
    }
}

impl Transaction {
    /// Encode the transaction to bytes, signing all its actions with the given signer.
    pub fn sign_to_proto(self, signer: impl Signer) -> Result<Vec<u8>, SignError> {
        proto::Transaction::from(self).sign_to_proto(Context::new(&SHA256), signer)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    ScheduleCork(ScheduleCork),
    AddManagedCellars(ManageCellars),
    RemoveManagedCellars(ManageCellars),
    UpdateParams(UpdateParams),
}

impl Action {
    /// The public key that signed this action.
    pub fn signer(&self) -> &Bytes {
        match self {
            Action::ScheduleCork(a) => &a.orchestrator.identity,
            Action::AddManagedCellars(a) | Action::RemoveManagedCellars(a) => {
                &a.authority.identity
            }
            Action::UpdateParams(a) => &a.authority.identity,
        }
    }

    /// The signer's sequence number for this action.
    ///
    /// Each key's accepted sequences strictly increase, so a signed action can be applied once.
    pub fn sequence(&self) -> u64 {
        match self {
            Action::ScheduleCork(a) => a.sequence,
            Action::AddManagedCellars(a) | Action::RemoveManagedCellars(a) => a.sequence,
            Action::UpdateParams(a) => a.sequence,
        }
    }
}

/// The delegate key a validator signs cork submissions with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Orchestrator {
    pub identity: Bytes,
}

impl Orchestrator {
    pub fn address(&self) -> OrchestratorAddress {
        OrchestratorAddress::from_public_key(&self.identity)
    }
}

/// The key allowed to manage cellars and module parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Authority {
    pub identity: Bytes,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleCork {
    pub orchestrator: Orchestrator,
    pub cork: Cork,
    pub block_height: u64,
    pub sequence: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManageCellars {
    pub authority: Authority,
    pub cellar_ids: Vec<Address>,
    pub sequence: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateParams {
    pub authority: Authority,
    pub params: Params,
    pub sequence: u64,
}

#[cfg(test)]
mod test;
