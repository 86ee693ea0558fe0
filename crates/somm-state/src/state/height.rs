use super::*;

impl<S: StateReadExt> State<S> {
    /// Get the current block height from the state, else default to 0.
    pub async fn block_height(&self) -> Result<u64, Report> {
        Ok(self
            .store
            .get::<u64>(Internal, keys::BLOCK_HEIGHT)
            .await?
            .unwrap_or(0))
    }
}

impl<S: StateReadExt + StateWriteExt> State<S> {
    /// Set the current block height in the state.
    pub(crate) fn set_block_height(&mut self, height: u64) -> Result<(), Report> {
        if height == 0 {
            bail!("block height must be positive");
        }
        self.store.put(Internal, keys::BLOCK_HEIGHT, height);
        Ok(())
    }
}
