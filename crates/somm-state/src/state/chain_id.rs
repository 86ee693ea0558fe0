use super::*;

impl<S: StateReadExt> State<S> {
    /// Get the current chain ID from the state.
    pub async fn chain_id(&self) -> Result<ChainId, Report> {
        self.store
            .get::<ChainId>(Internal, keys::CHAIN_ID)
            .await?
            .ok_or_eyre("chain ID not found in state; is the state initialized?")
    }
}

impl<S: StateReadExt + StateWriteExt> State<S> {
    /// Set the current chain ID in the state.
    ///
    /// This should only be called once, during initial setup.
    pub(crate) async fn set_chain_id(&mut self, chain_id: ChainId) -> Result<(), Report> {
        if self.chain_id().await.is_ok() {
            bail!("chain ID is already set; cannot set it again");
        }

        self.store.put(Internal, keys::CHAIN_ID, chain_id);
        Ok(())
    }
}
