use color_eyre::eyre::bail;
use somm_types::{Decimal, OutgoingContractCall};

use super::*;

/// Everything that happened while closing out a height.
#[derive(Clone, Debug, Default)]
pub struct EndBlockOutcome {
    /// Every group tallied, approved or not, in tally order.
    pub results: Vec<(B256, CorkResult)>,
    /// Approved instructions accepted by the sink, in nonce order.
    pub submitted: Vec<OutgoingContractCall>,
    /// Approved instructions the sink refused as invalid.
    pub dropped: Vec<ContractCall>,
    pub events: Vec<Event>,
}

/// Close out the votes scheduled for `height`: tally them, hand every approved instruction to the
/// sink, then clear the height.
///
/// Each height can be closed out only once, and heights must be closed in increasing order.
/// Sink rejections of individual instructions are logged and skipped; any storage failure is
/// returned and must halt the block.
#[instrument(skip(host, threshold), fields(%threshold))]
pub async fn end_block<H>(
    host: &mut H,
    height: u64,
    threshold: Decimal,
) -> Result<EndBlockOutcome, Report>
where
    H: ScheduledCorkStore + VotingPowerProvider + InstructionSink,
{
    if let Some(last) = host.last_tallied_height().await?
        && height <= last
    {
        bail!("cannot tally height {height}: height {last} has already been tallied");
    }

    let votes = host.list_by_height(height).await?;
    let powers = powers_by_validator(host.bonded_validators_and_power(height).await?);
    let total = host.total_bonded_power(height).await?;
    info!(height, votes = votes.len(), total, "tallying scheduled cork votes");

    let mut outcome = EndBlockOutcome::default();
    let groups = tally(votes, &powers, total, threshold);

    for group in &groups {
        let id = group.cork.id(height);
        let result = CorkResult {
            cork: group.cork.clone(),
            block_height: height,
            approved: group.approved,
            approval_percentage: group.approval,
        };
        host.set_cork_result(id, result.clone()).await?;
        outcome.events.push(
            cork_event(event::CORK_RESULT, &group.cork)
                .with("id", hex::encode(id))
                .with("block_height", height)
                .with("approved", group.approved)
                .with("approval_percentage", group.approval),
        );
        outcome.results.push((id, result));
    }

    for group in groups.into_iter().filter(|g| g.approved) {
        let call = group.cork.contract_call();
        match host.submit(call.clone()).await {
            Ok(invalidation_nonce) => {
                info!(
                    invalidation_nonce,
                    target = %call.target,
                    payload = %call.payload,
                    "queued outgoing contract call"
                );
                outcome.events.push(
                    cork_event(event::OUTGOING_CONTRACT_CALL, &group.cork)
                        .with("invalidation_nonce", invalidation_nonce)
                        .with("block_height", height),
                );
                outcome.submitted.push(OutgoingContractCall {
                    invalidation_nonce,
                    invalidation_scope: call.invalidation_scope,
                    target: call.target,
                    payload: call.payload,
                    block_height: height,
                });
            }
            Err(SinkError::Invalid(reason)) => {
                warn!(target = %call.target, %reason, "dropping approved contract call");
                outcome.dropped.push(call);
            }
            Err(SinkError::Storage(e)) => return Err(e),
        }
    }

    host.clear_height(height).await?;
    host.set_last_tallied_height(height).await?;

    Ok(outcome)
}
