use std::str::FromStr;

use somm_proto::transaction::{Signature, action};

use super::*;
use crate::ParseError;

impl TryFrom<proto::Transaction> for Transaction {
    type Error = ParseError;

    fn try_from(tx: proto::Transaction) -> Result<Self, Self::Error> {
        let proto::Transaction { chain_id, actions } = tx;

        let chain_id = ChainId::try_from(chain_id)?;

        let actions = actions
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<_, _>>()?;

        Ok(Transaction { chain_id, actions })
    }
}

impl From<Transaction> for proto::Transaction {
    fn from(tx: Transaction) -> Self {
        let Transaction { chain_id, actions } = tx;
        proto::Transaction {
            chain_id: chain_id.0,
            actions: actions.into_iter().map(Into::into).collect(),
        }
    }
}

impl TryFrom<String> for ChainId {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Err(ParseError::new::<ChainId>("empty chain ID"))
        } else {
            Ok(ChainId(value))
        }
    }
}

impl From<ChainId> for String {
    fn from(value: ChainId) -> Self {
        value.0
    }
}

domain_type!(ChainId => String);

fn identity(signature: Option<Signature>) -> Result<Bytes, ParseError> {
    let Signature { public_key, .. } =
        signature.ok_or_else(|| ParseError::new::<Action>("missing signature"))?;
    if public_key.is_empty() {
        return Err(ParseError::new::<Action>("empty public key"));
    }
    Ok(public_key)
}

fn cellar_ids(ids: Vec<String>) -> Result<Vec<Address>, ParseError> {
    if ids.is_empty() {
        return Err(ParseError::new::<ManageCellars>("no cellar IDs given"));
    }
    ids.iter()
        .map(|id| Address::from_str(id).map_err(ParseError::new::<Address>))
        .collect()
}

impl TryFrom<proto::Action> for Action {
    type Error = ParseError;

    fn try_from(action: proto::Action) -> Result<Self, Self::Error> {
        let action = action
            .action
            .ok_or_else(|| ParseError::new::<Action>("empty action"))?;

        Ok(match action {
            action::Action::ScheduleCork(action::ScheduleCork {
                signature,
                cork,
                block_height,
                sequence,
            }) => Action::ScheduleCork(ScheduleCork {
                orchestrator: Orchestrator {
                    identity: identity(signature)?,
                },
                cork: cork
                    .ok_or_else(|| ParseError::new::<ScheduleCork>("missing cork"))?
                    .try_into()?,
                block_height,
                sequence,
            }),
            action::Action::AddManagedCellars(action::AddManagedCellars {
                signature,
                cellar_ids: ids,
                sequence,
            }) => Action::AddManagedCellars(ManageCellars {
                authority: Authority {
                    identity: identity(signature)?,
                },
                cellar_ids: cellar_ids(ids)?,
                sequence,
            }),
            action::Action::RemoveManagedCellars(action::RemoveManagedCellars {
                signature,
                cellar_ids: ids,
                sequence,
            }) => Action::RemoveManagedCellars(ManageCellars {
                authority: Authority {
                    identity: identity(signature)?,
                },
                cellar_ids: cellar_ids(ids)?,
                sequence,
            }),
            action::Action::UpdateParams(action::UpdateParams {
                signature,
                params,
                sequence,
            }) => {
                Action::UpdateParams(UpdateParams {
                    authority: Authority {
                        identity: identity(signature)?,
                    },
                    params: params
                        .ok_or_else(|| ParseError::new::<UpdateParams>("missing params"))?
                        .try_into()?,
                    sequence,
                })
            }
        })
    }
}

impl From<Action> for proto::Action {
    fn from(action: Action) -> Self {
        let action = match action {
            Action::ScheduleCork(ScheduleCork {
                orchestrator,
                cork,
                block_height,
                sequence,
            }) => action::Action::ScheduleCork(action::ScheduleCork {
                signature: Some(Signature::unsigned(orchestrator.identity)),
                cork: Some(cork.into()),
                block_height,
                sequence,
            }),
            Action::AddManagedCellars(ManageCellars {
                authority,
                cellar_ids,
                sequence,
            }) => action::Action::AddManagedCellars(action::AddManagedCellars {
                signature: Some(Signature::unsigned(authority.identity)),
                cellar_ids: cellar_ids.iter().map(ToString::to_string).collect(),
                sequence,
            }),
            Action::RemoveManagedCellars(ManageCellars {
                authority,
                cellar_ids,
                sequence,
            }) => action::Action::RemoveManagedCellars(action::RemoveManagedCellars {
                signature: Some(Signature::unsigned(authority.identity)),
                cellar_ids: cellar_ids.iter().map(ToString::to_string).collect(),
                sequence,
            }),
            Action::UpdateParams(UpdateParams {
                authority,
                params,
                sequence,
            }) => action::Action::UpdateParams(action::UpdateParams {
                signature: Some(Signature::unsigned(authority.identity)),
                params: Some(params.into()),
                sequence,
            }),
        };
        proto::Action {
            action: Some(action),
        }
    }
}
