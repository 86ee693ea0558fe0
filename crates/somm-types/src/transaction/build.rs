use alloy_primitives::Address;
use prost::bytes::Bytes;

use crate::transaction::{
    Action, Authority, ChainId, ManageCellars, Orchestrator, ScheduleCork, Transaction,
    UpdateParams,
};
use crate::{Cork, Params};

pub struct Builder {
    chain_id: ChainId,
    actions: Vec<Action>,
}

impl Builder {
    pub fn new(chain_id: ChainId) -> Self {
        Self {
            chain_id,
            actions: Vec::new(),
        }
    }

    fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn schedule_cork(
        self,
        orchestrator: impl Into<Bytes>,
        sequence: u64,
        cork: Cork,
        block_height: u64,
    ) -> Self {
        self.action(Action::ScheduleCork(ScheduleCork {
            orchestrator: Orchestrator {
                identity: orchestrator.into(),
            },
            cork,
            block_height,
            sequence,
        }))
    }

    pub fn add_managed_cellars(
        self,
        authority: impl Into<Bytes>,
        sequence: u64,
        cellar_ids: impl IntoIterator<Item = Address>,
    ) -> Self {
        self.action(Action::AddManagedCellars(ManageCellars {
            authority: Authority {
                identity: authority.into(),
            },
            cellar_ids: cellar_ids.into_iter().collect(),
            sequence,
        }))
    }

    pub fn remove_managed_cellars(
        self,
        authority: impl Into<Bytes>,
        sequence: u64,
        cellar_ids: impl IntoIterator<Item = Address>,
    ) -> Self {
        self.action(Action::RemoveManagedCellars(ManageCellars {
            authority: Authority {
                identity: authority.into(),
            },
            cellar_ids: cellar_ids.into_iter().collect(),
            sequence,
        }))
    }

    pub fn update_params(self, authority: impl Into<Bytes>, sequence: u64, params: Params) -> Self {
        self.action(Action::UpdateParams(UpdateParams {
            authority: Authority {
                identity: authority.into(),
            },
            params,
            sequence,
        }))
    }

    pub fn build(self) -> Transaction {
        Transaction {
            chain_id: self.chain_id,
            actions: self.actions,
        }
    }
}
