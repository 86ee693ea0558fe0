use super::*;

impl<S: StateReadExt + StateWriteExt> State<S> {
    /// Handle a cork submission, returning the hex id of the scheduled cork.
    #[instrument(skip(self, schedule), fields(block_height = schedule.block_height))]
    pub(crate) async fn schedule_cork(
        &mut self,
        schedule: &ScheduleCork,
    ) -> Result<String, Report> {
        let ScheduleCork {
            orchestrator,
            sequence: _,
            cork,
            block_height,
        } = schedule;

        let current_height = self.block_height().await?;
        let scheduled = crate::cork::schedule_cork(
            self,
            current_height,
            orchestrator.address(),
            cork.clone(),
            *block_height,
        )
        .await?;

        self.store.record_event(scheduled.event);
        Ok(hex::encode(scheduled.id))
    }
}
