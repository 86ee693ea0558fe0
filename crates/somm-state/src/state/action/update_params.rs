use super::*;

impl<S: StateReadExt + StateWriteExt> State<S> {
    /// Replace the cork module parameters.
    #[instrument(skip(self, update), fields(vote_threshold = %update.params.vote_threshold))]
    pub(crate) async fn update_params(&mut self, update: &UpdateParams) -> Result<(), Report> {
        let UpdateParams {
            authority,
            sequence: _,
            params,
        } = update;
        self.check_authority(authority).await?;
        self.set_params(params.clone())?;
        info!("updated cork parameters");
        Ok(())
    }
}
