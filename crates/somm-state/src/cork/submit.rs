use prost::Message as _;
use somm_proto::DomainType as _;

use super::*;

/// Reasons a cork submission is turned away.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("signer {0} is not a delegate of any bonded validator")]
    Unauthorized(OrchestratorAddress),
    #[error("cellar {0} is not managed")]
    UnmanagedCellarAddress(Address),
    #[error("cannot schedule a cork for height {requested} at height {current}")]
    SchedulingInThePast { requested: u64, current: u64 },
}

impl ScheduleError {
    /// The transaction result code reported to the submitter.
    pub fn code(&self) -> u32 {
        match self {
            ScheduleError::Unauthorized(_) => 2,
            ScheduleError::UnmanagedCellarAddress(_) => 3,
            ScheduleError::SchedulingInThePast { .. } => 4,
        }
    }
}

/// A vote that has been accepted and stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scheduled {
    pub id: B256,
    pub validator: ValidatorAddress,
    pub event: Event,
}

/// Validate and store a validator's vote for a cork at a future height.
///
/// Validation failures come back as a [`ScheduleError`] inside the report, so callers can map
/// them to result codes.
#[instrument(skip(host, cork), fields(target = %cork.target_contract_address))]
pub async fn schedule_cork<H>(
    host: &mut H,
    current_height: u64,
    signer: OrchestratorAddress,
    cork: Cork,
    block_height: u64,
) -> Result<Scheduled, Report>
where
    H: VotingPowerProvider + ManagedTargetRegistry + ScheduledCorkStore,
{
    let Some(validator) = host.resolve_signer(signer).await? else {
        return Err(ScheduleError::Unauthorized(signer).into());
    };

    if !host.is_managed(cork.target_contract_address).await? {
        return Err(ScheduleError::UnmanagedCellarAddress(cork.target_contract_address).into());
    }

    if block_height <= current_height {
        return Err(ScheduleError::SchedulingInThePast {
            requested: block_height,
            current: current_height,
        }
        .into());
    }

    let encoded = hex::encode(cork.to_proto().encode_to_vec());
    let id = host.put(block_height, validator, cork).await?;
    host.increment_count_for_validator(validator).await?;
    info!(%validator, block_height, %id, "scheduled cork");

    let event = Event::new(event::CORK)
        .with("signer", signer)
        .with("validator", validator)
        .with("cork", encoded)
        .with("block_height", block_height)
        .with("id", hex::encode(id));

    Ok(Scheduled {
        id,
        validator,
        event,
    })
}
