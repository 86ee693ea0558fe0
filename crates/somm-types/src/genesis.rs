use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};

use crate::{CorkResult, Params, ScheduledCork, Validator, transaction::ChainId};

/// The initial (or exported) state of the chain, as read from a genesis JSON file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub chain_id: ChainId,
    /// Ed25519 public key allowed to manage cellars and parameters; none disables those actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<Bytes>,
    #[serde(default)]
    pub params: Params,
    #[serde(default)]
    pub cellar_ids: Vec<Address>,
    #[serde(default)]
    pub validators: Vec<Validator>,
    /// The last invalidation nonce handed out by the outgoing queue.
    #[serde(default)]
    pub invalidation_nonce: u64,
    #[serde(default)]
    pub scheduled_corks: Vec<ScheduledCork>,
    #[serde(default)]
    pub cork_results: Vec<CorkResult>,
}

impl GenesisState {
    pub fn new(chain_id: ChainId) -> Self {
        Self {
            chain_id,
            authority: None,
            params: Params::default(),
            cellar_ids: Vec::new(),
            validators: Vec::new(),
            invalidation_nonce: 0,
            scheduled_corks: Vec::new(),
            cork_results: Vec::new(),
        }
    }
}
