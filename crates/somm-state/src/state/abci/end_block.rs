use super::*;

impl<S: StateReadExt + StateWriteExt> State<S> {
    /// End a block, without committing yet.
    ///
    /// This is where the corks scheduled for this height are tallied and the approved ones are
    /// queued for relay.
    pub async fn end_block(
        &mut self,
        request::EndBlock { height }: request::EndBlock,
    ) -> Result<response::EndBlock, Report> {
        // Ensure the height matches the current height:
        let height = u64::try_from(height)?;
        let current_height = self.block_height().await?;
        if height != current_height {
            bail!("end-block height {height} does not match current height {current_height}");
        }

        let threshold = self.params().await?.vote_threshold;
        let cork::EndBlockOutcome {
            results: _,
            submitted: _,
            dropped,
            events,
        } = cork::end_block(self, height, threshold).await?;

        if !dropped.is_empty() {
            warn!(dropped = dropped.len(), "approved contract calls were refused by the bridge");
        }

        Ok(response::EndBlock {
            // Cork voting power is tracked here, apart from the consensus validator set:
            validator_updates: vec![],
            consensus_param_updates: None,
            events: events.into_iter().map(abci_event).collect(),
        })
    }
}
