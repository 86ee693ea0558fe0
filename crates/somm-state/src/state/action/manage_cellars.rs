use super::*;

impl<S: StateReadExt + StateWriteExt> State<S> {
    /// Add cellars to the managed set. Cellars that are already managed are left alone.
    #[instrument(skip(self, manage))]
    pub(crate) async fn add_managed_cellars(
        &mut self,
        manage: &ManageCellars,
    ) -> Result<(), Report> {
        let ManageCellars {
            authority,
            sequence: _,
            cellar_ids,
        } = manage;
        self.check_authority(authority).await?;

        for cellar in cellar_ids {
            if self.is_managed(*cellar).await? {
                debug!(%cellar, "cellar is already managed");
                continue;
            }
            info!(%cellar, "adding managed cellar");
            self.add_cellar(*cellar);
        }

        Ok(())
    }

    /// Remove cellars from the managed set.
    ///
    /// Votes already scheduled for a removed cellar stay scheduled and are still tallied: the
    /// managed set only gates new submissions.
    #[instrument(skip(self, manage))]
    pub(crate) async fn remove_managed_cellars(
        &mut self,
        manage: &ManageCellars,
    ) -> Result<(), Report> {
        let ManageCellars {
            authority,
            sequence: _,
            cellar_ids,
        } = manage;
        self.check_authority(authority).await?;

        for cellar in cellar_ids {
            if !self.is_managed(*cellar).await? {
                debug!(%cellar, "cellar is not managed");
                continue;
            }
            info!(%cellar, "removing managed cellar");
            self.remove_cellar(*cellar);
        }

        Ok(())
    }
}
