use super::*;

impl<S: StateReadExt> State<S> {
    /// All managed cellars, in address order.
    pub async fn cellar_ids(&self) -> Result<Vec<Address>, Report> {
        self.store
            .keys(Substore::Cork, keys::CELLARS_PREFIX)
            .and_then(|key| async move { keys::parse_cellar(&key) })
            .try_collect()
            .await
    }
}

impl<S: StateReadExt + StateWriteExt> State<S> {
    pub(crate) fn add_cellar(&mut self, cellar: Address) {
        self.store
            .put(Substore::Cork, &keys::cellar(cellar), cellar.to_vec());
    }

    pub(crate) fn remove_cellar(&mut self, cellar: Address) {
        self.store.delete_key(Substore::Cork, &keys::cellar(cellar));
    }
}

impl<S: StateReadExt> ManagedTargetRegistry for State<S> {
    async fn is_managed(&self, target: Address) -> Result<bool, Report> {
        Ok(self
            .store
            .get::<Vec<u8>>(Substore::Cork, &keys::cellar(target))
            .await?
            .is_some())
    }
}
