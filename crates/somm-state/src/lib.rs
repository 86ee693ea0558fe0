#[macro_use]
extern crate tracing;

use std::collections::BTreeSet;

use alloy_primitives::{Address, B256};
use cnidarium::StateDelta;
use color_eyre::{
    Report,
    eyre::{OptionExt, bail, eyre},
};
use futures::TryStreamExt;
use prost::bytes::Bytes;
use sha2::{Digest, Sha256};
use somm_types::{
    ContractCall, Cork, CorkResult, GenesisState, OrchestratorAddress, OutgoingContractCall,
    Params, Power, ScheduledCork, Validator, ValidatorAddress,
    transaction::{
        Action, AuthenticatedTx, Authority, ChainId, ManageCellars, ScheduleCork, Transaction,
        UpdateParams,
    },
};
use tendermint::{
    AppHash,
    abci::{Code, request, response, types::Misbehavior},
    block::Header,
};

mod store;
pub use store::{Store, Substore};
use store::{
    StateReadExt, StateWriteExt, abci_event,
    Substore::{Bridge, Internal, Staking},
};

/// ABCI service implementation for [`Store`].
mod abci;

/// The cork lifecycle: submission checks, tallying, and per-block scheduling.
pub mod cork;
use cork::{
    InstructionSink, ManagedTargetRegistry, ScheduleError, ScheduledCorkStore, SinkError,
    VotingPowerProvider,
};

/// Implementation of the chain state machine over [`State`].
mod state;
pub use state::{AuthorityError, CODE_REJECTED, SequenceError};

pub struct State<S> {
    store: S,
}

impl<S> State<S> {
    /// Create a new state with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Unwrap the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }
}
