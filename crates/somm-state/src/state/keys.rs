use std::str::FromStr;

use super::*;

pub(super) const CHAIN_ID: &str = "parameters/chain_id";
pub(super) const CORK_PARAMS: &str = "parameters/cork_params";
pub(super) const AUTHORITY: &str = "parameters/authority";
pub(super) const BLOCK_HEIGHT: &str = "current/block_height";
pub(super) const SEQUENCES_PREFIX: &str = "sequences/";

pub(super) const SCHEDULED_PREFIX: &str = "scheduled/";
pub(super) const RESULTS_PREFIX: &str = "results/";
pub(super) const CELLARS_PREFIX: &str = "cellar_ids/";
pub(super) const COUNTS_PREFIX: &str = "validator_count/";
pub(super) const LAST_TALLIED_HEIGHT: &str = "last_tallied_height";

pub(super) const INVALIDATION_NONCE: &str = "invalidation_nonce";
pub(super) const OUTGOING_PREFIX: &str = "outgoing/";

pub(super) const VALIDATORS_PREFIX: &str = "validators/";
pub(super) const ORCHESTRATORS_PREFIX: &str = "orchestrators/";

// Heights and nonces are zero-padded so that lexicographic key order is numeric order.

pub(super) fn scheduled_at_height(height: u64) -> String {
    format!("{SCHEDULED_PREFIX}{height:020}/")
}

pub(super) fn scheduled_cork(height: u64, validator: ValidatorAddress) -> String {
    format!("{}{validator}", scheduled_at_height(height))
}

pub(super) fn parse_scheduled_cork(key: &str) -> Result<(u64, ValidatorAddress), Report> {
    let remainder = key
        .strip_prefix(SCHEDULED_PREFIX)
        .ok_or_else(|| eyre!("invalid scheduled cork key: {key}"))?;
    let (height, validator) = remainder
        .split_once('/')
        .ok_or_else(|| eyre!("invalid scheduled cork key format: {key}"))?;
    Ok((height.parse()?, validator.parse()?))
}

pub(super) fn cork_result(id: B256) -> String {
    format!("{RESULTS_PREFIX}{}", hex::encode(id))
}

pub(super) fn cellar(address: Address) -> String {
    format!("{CELLARS_PREFIX}{}", hex::encode(address))
}

pub(super) fn parse_cellar(key: &str) -> Result<Address, Report> {
    let address = key
        .strip_prefix(CELLARS_PREFIX)
        .ok_or_else(|| eyre!("invalid cellar key: {key}"))?;
    Ok(Address::from_str(address)?)
}

pub(super) fn validator_count(validator: ValidatorAddress) -> String {
    format!("{COUNTS_PREFIX}{validator}")
}

pub(super) fn outgoing(nonce: u64) -> String {
    format!("{OUTGOING_PREFIX}{nonce:020}")
}

pub(super) fn sequence(signer: &[u8]) -> String {
    format!("{SEQUENCES_PREFIX}{}", hex::encode(signer))
}

pub(super) fn validator(address: ValidatorAddress) -> String {
    format!("{VALIDATORS_PREFIX}{address}")
}

pub(super) fn orchestrator(address: OrchestratorAddress) -> String {
    format!("{ORCHESTRATORS_PREFIX}{address}")
}
