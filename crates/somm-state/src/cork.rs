//! Validators vote for contract calls ("corks") to be sent to a managed cellar at a future block
//! height. When that height is reached, the votes for it are grouped by identical instruction and
//! weighed by voting power; every group that reaches the approval threshold is handed to the
//! outgoing bridge queue, and all of the height's votes are then discarded.
//!
//! The engine only talks to its collaborators through the traits below, so it can run against
//! chain state or against in-memory fakes.

use std::collections::BTreeMap;
use std::future::Future;

use alloy_primitives::{Address, B256};
use color_eyre::Report;
use somm_types::{
    ContractCall, Cork, CorkResult, Event, OrchestratorAddress, Power, ValidatorAddress,
};

mod scheduler;
pub use scheduler::{EndBlockOutcome, end_block};

mod submit;
pub use submit::{ScheduleError, Scheduled, schedule_cork};

mod tally;
pub use tally::{GroupOutcome, tally};

/// Source of validator voting power.
pub trait VotingPowerProvider: Send + Sync {
    /// Every bonded validator with non-zero power at the given height, in address order.
    fn bonded_validators_and_power(
        &self,
        height: u64,
    ) -> impl Future<Output = Result<Vec<(ValidatorAddress, Power)>, Report>> + Send;

    /// The denominator for approval at the given height.
    fn total_bonded_power(&self, height: u64) -> impl Future<Output = Result<u64, Report>> + Send {
        async move {
            Ok(self
                .bonded_validators_and_power(height)
                .await?
                .into_iter()
                .fold(0u64, |total, (_, power)| total.saturating_add(power.value())))
        }
    }

    /// The bonded validator that has delegated cork signing to this orchestrator, if any.
    fn resolve_signer(
        &self,
        signer: OrchestratorAddress,
    ) -> impl Future<Output = Result<Option<ValidatorAddress>, Report>> + Send;
}

#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    /// The instruction itself is unacceptable; it is dropped and block processing continues.
    #[error("invalid contract call: {0}")]
    Invalid(String),
    /// The queue could not be written; block processing must halt.
    #[error("outgoing queue unavailable: {0}")]
    Storage(Report),
}

/// The outgoing bridge queue.
pub trait InstructionSink: Send {
    /// Durably queue a contract call for relay, returning the invalidation nonce assigned to it.
    ///
    /// Nonces come from a single counter shared by everything this chain emits, and are handed
    /// out without gaps or reuse.
    fn submit(&mut self, call: ContractCall) -> impl Future<Output = Result<u64, SinkError>> + Send;
}

/// The set of cellars validators may schedule corks for.
pub trait ManagedTargetRegistry: Send + Sync {
    fn is_managed(&self, target: Address) -> impl Future<Output = Result<bool, Report>> + Send;
}

/// Persistence for pending votes and their bookkeeping.
pub trait ScheduledCorkStore: Send + Sync {
    /// Store a validator's vote for a height, replacing any earlier vote it cast for that height.
    fn put(
        &mut self,
        height: u64,
        validator: ValidatorAddress,
        cork: Cork,
    ) -> impl Future<Output = Result<B256, Report>> + Send;

    /// Every vote stored for a height, in validator address order.
    fn list_by_height(
        &self,
        height: u64,
    ) -> impl Future<Output = Result<Vec<(ValidatorAddress, Cork)>, Report>> + Send;

    /// Remove every vote for a height. Clearing an empty height succeeds.
    fn clear_height(&mut self, height: u64) -> impl Future<Output = Result<(), Report>> + Send;

    fn count_for_validator(
        &self,
        validator: ValidatorAddress,
    ) -> impl Future<Output = Result<u64, Report>> + Send;

    fn increment_count_for_validator(
        &mut self,
        validator: ValidatorAddress,
    ) -> impl Future<Output = Result<(), Report>> + Send;

    /// Record how a group of identical corks fared when tallied.
    fn set_cork_result(
        &mut self,
        id: B256,
        result: CorkResult,
    ) -> impl Future<Output = Result<(), Report>> + Send;

    /// The most recent height whose votes have been tallied.
    fn last_tallied_height(&self) -> impl Future<Output = Result<Option<u64>, Report>> + Send;

    fn set_last_tallied_height(
        &mut self,
        height: u64,
    ) -> impl Future<Output = Result<(), Report>> + Send;
}

/// Event kinds emitted by the cork engine.
pub mod event {
    pub const CORK: &str = "cork";
    pub const CORK_RESULT: &str = "cork_result";
    pub const OUTGOING_CONTRACT_CALL: &str = "outgoing_contract_call";
}

fn powers_by_validator(
    powers: Vec<(ValidatorAddress, Power)>,
) -> BTreeMap<ValidatorAddress, Power> {
    powers.into_iter().collect()
}

fn cork_event(kind: &str, cork: &Cork) -> Event {
    Event::new(kind)
        .with("target_contract_address", cork.target_contract_address)
        .with("invalidation_scope", cork.invalidation_scope())
}
