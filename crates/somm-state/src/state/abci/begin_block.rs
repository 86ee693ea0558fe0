use super::*;

impl<S: StateReadExt + StateWriteExt> State<S> {
    /// Begin a block, without committing yet.
    pub async fn begin_block(
        &mut self,
        request::BeginBlock {
            header: Header {
                chain_id, height, ..
            },
            byzantine_validators,
            last_commit_info: _,
            hash: _,
        }: request::BeginBlock,
    ) -> Result<response::BeginBlock, Report> {
        // Ensure chain ID matches the current chain ID:
        let current_chain_id = self.chain_id().await?;
        if chain_id.as_str() != current_chain_id.0 {
            bail!(
                "begin-block chain ID {} does not match current chain ID {}",
                chain_id.as_str(),
                current_chain_id.0,
            );
        }

        // Blocks must arrive one after another:
        let height = height.value();
        let current_height = self.block_height().await?;
        if Some(height) != current_height.checked_add(1) {
            bail!("begin-block height {height} does not follow current height {current_height}");
        }

        // Tombstone byzantine validators
        for Misbehavior {
            validator: bad_validator,
            kind: _,
            height: _,
            time: _,
            total_voting_power: _,
        } in byzantine_validators
        {
            self.tombstone_validator(ValidatorAddress(bad_validator.address))
                .await?;
        }

        self.set_block_height(height)?;

        Ok(response::BeginBlock { events: vec![] })
    }
}
