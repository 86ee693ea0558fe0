use std::collections::{BTreeMap, BTreeSet};

use alloy_primitives::{Address, B256, Bytes};
use somm_types::{Cork, Decimal, Power, ValidatorAddress};

/// How one group of identical votes fared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupOutcome {
    pub cork: Cork,
    pub voters: BTreeSet<ValidatorAddress>,
    /// Combined power of the distinct voters.
    pub power: u64,
    /// `power / total`, or zero when there is no bonded power at all.
    pub approval: Decimal,
    pub approved: bool,
}

/// Votes combine only when target, invalidation scope and payload all match.
type GroupKey = (Address, B256, Bytes, Option<String>);

/// Group the votes cast for one height and decide which groups reach the threshold.
///
/// Groups come back sorted by target address, then invalidation scope, then payload, whatever
/// order the votes arrived in. Validators missing from `powers` count for nothing. Approval is
/// measured against `total`, the full bonded power, not just the power of those who voted.
pub fn tally(
    votes: impl IntoIterator<Item = (ValidatorAddress, Cork)>,
    powers: &BTreeMap<ValidatorAddress, Power>,
    total: u64,
    threshold: Decimal,
) -> Vec<GroupOutcome> {
    let mut groups: BTreeMap<GroupKey, (Cork, BTreeSet<ValidatorAddress>)> = BTreeMap::new();
    for (validator, cork) in votes {
        let key = (
            cork.target_contract_address,
            cork.invalidation_scope(),
            cork.encoded_contract_call.clone(),
            cork.scope.clone(),
        );
        groups
            .entry(key)
            .or_insert_with(|| (cork, BTreeSet::new()))
            .1
            .insert(validator);
    }

    groups
        .into_values()
        .map(|(cork, voters)| {
            let power = voters
                .iter()
                .filter_map(|v| powers.get(v))
                .fold(0u64, |sum, power| sum.saturating_add(power.value()));
            GroupOutcome {
                approval: Decimal::from_ratio(power, total).unwrap_or(Decimal::ZERO),
                approved: threshold.is_met_by(power, total),
                cork,
                voters,
                power,
            }
        })
        .collect()
}
