use super::*;

impl<S: StateReadExt> State<S> {
    /// Get the cork module parameters, falling back to the defaults if none have been set.
    pub async fn params(&self) -> Result<Params, Report> {
        Ok(self
            .store
            .get::<Params>(Internal, keys::CORK_PARAMS)
            .await?
            .unwrap_or_default())
    }
}

impl<S: StateReadExt + StateWriteExt> State<S> {
    /// Replace the cork module parameters, after checking that they are valid.
    pub(crate) fn set_params(&mut self, params: Params) -> Result<(), Report> {
        params.validate()?;
        self.store.put(Internal, keys::CORK_PARAMS, params);
        Ok(())
    }
}
