use super::*;

impl<S: StateReadExt + StateWriteExt> State<S> {
    /// Deliver transaction bytes to the state.
    ///
    /// The transaction runs against a fork of the state and its writes are only kept if every
    /// action in it succeeds. Failures are reported through the result code, never as an error:
    /// a bad transaction cannot halt the block.
    #[instrument(skip_all)]
    pub async fn deliver_tx(&mut self, tx_bytes: &[u8]) -> response::DeliverTx {
        let mut fork = State::new(StateDelta::new(&mut self.store));

        match fork.execute_tx(tx_bytes).await {
            Ok(cork_ids) => {
                let (_, events) = fork.into_inner().apply();
                response::DeliverTx {
                    data: cork_ids.join(",").into(),
                    events,
                    ..Default::default()
                }
            }
            Err(e) => {
                warn!(%e, "rejected transaction");
                response::DeliverTx {
                    code: Code::from(result_code(&e)),
                    log: e.to_string(),
                    ..Default::default()
                }
            }
        }
    }

    /// Execute a transaction, returning the hex ids of any corks it scheduled.
    async fn execute_tx(&mut self, tx_bytes: &[u8]) -> Result<Vec<String>, Report> {
        let tx = AuthenticatedTx::from_proto(tx_bytes)?;
        let Transaction { chain_id, actions } = &*tx;

        // First, check the chain ID to see if it matches the current chain ID.
        let current_chain_id = self.chain_id().await?;
        if *chain_id != current_chain_id {
            bail!("transaction chain ID {chain_id} does not match current chain ID {current_chain_id}");
        }

        // Ensure the transaction is non-empty:
        if actions.is_empty() {
            bail!("transaction must contain at least one action");
        }

        // Then, apply each action in order, each one advancing its signer's sequence:
        let mut cork_ids = Vec::new();
        for action in actions {
            self.advance_sequence(action.signer(), action.sequence())
                .await?;
            match action {
                Action::ScheduleCork(schedule) => {
                    cork_ids.push(self.schedule_cork(schedule).await?)
                }
                Action::AddManagedCellars(manage) => self.add_managed_cellars(manage).await?,
                Action::RemoveManagedCellars(manage) => {
                    self.remove_managed_cellars(manage).await?
                }
                Action::UpdateParams(update) => self.update_params(update).await?,
            }
        }

        Ok(cork_ids)
    }
}

impl<S: StateReadExt> State<S> {
    /// Check whether a transaction would be accepted in the next block, without changing any
    /// state.
    ///
    /// The transaction is run as if the next block had begun, so a cork for that height is
    /// already in the past here just as it will be when delivered.
    #[instrument(skip_all)]
    pub async fn check_tx(&self, tx_bytes: &[u8]) -> response::CheckTx {
        let mut fork = State::new(StateDelta::new(&self.store));

        let result = async {
            let next_height = fork
                .block_height()
                .await?
                .checked_add(1)
                .ok_or_eyre("block height overflow")?;
            fork.set_block_height(next_height)?;
            fork.execute_tx(tx_bytes).await
        }
        .await;

        match result {
            Ok(cork_ids) => response::CheckTx {
                data: cork_ids.join(",").into(),
                ..Default::default()
            },
            Err(e) => {
                debug!(%e, "transaction failed check");
                response::CheckTx {
                    code: Code::from(result_code(&e)),
                    log: e.to_string(),
                    ..Default::default()
                }
            }
        }
    }
}

/// Map a rejection to the code reported to the submitter.
fn result_code(e: &Report) -> u32 {
    if let Some(e) = e.downcast_ref::<ScheduleError>() {
        e.code()
    } else if let Some(e) = e.downcast_ref::<AuthorityError>() {
        e.code()
    } else {
        CODE_REJECTED
    }
}
