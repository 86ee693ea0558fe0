use super::*;

impl<S: StateReadExt> State<S> {
    /// Export the current state in the same form `init_chain` accepts as app state.
    pub async fn export_genesis(&self) -> Result<GenesisState, Report> {
        Ok(GenesisState {
            chain_id: self.chain_id().await?,
            authority: self.authority().await?.map(|key| key.to_vec().into()),
            params: self.params().await?,
            cellar_ids: self.cellar_ids().await?,
            validators: self.validators().await?,
            invalidation_nonce: self.invalidation_nonce().await?,
            scheduled_corks: self.scheduled_corks().await?,
            cork_results: self
                .cork_results()
                .await?
                .into_iter()
                .map(|(_, result)| result)
                .collect(),
        })
    }
}

impl<S: StateReadExt + StateWriteExt> State<S> {
    /// Load a genesis state into empty chain state.
    pub(crate) async fn load_genesis(&mut self, genesis: GenesisState) -> Result<(), Report> {
        let GenesisState {
            chain_id,
            authority,
            params,
            cellar_ids,
            validators,
            invalidation_nonce,
            scheduled_corks,
            cork_results,
        } = genesis;

        if chain_id.0.is_empty() {
            bail!("genesis chain ID must not be empty");
        }
        self.set_chain_id(chain_id).await?;
        self.set_authority(authority.as_ref().map(|key| &key[..]))?;
        self.set_params(params)?;

        for cellar in cellar_ids {
            self.add_cellar(cellar);
        }

        // Declaration rejects duplicate validators and shared orchestrators:
        for validator in validators {
            self.declare_validator(validator).await?;
        }

        self.set_invalidation_nonce(invalidation_nonce);

        let mut seen = BTreeSet::new();
        for ScheduledCork {
            cork,
            block_height,
            validator,
            id,
        } in scheduled_corks
        {
            if id != cork.id(block_height) {
                bail!("genesis cork {id} does not match its contents");
            }
            if block_height == 0 {
                bail!("genesis cork {id} is scheduled for height 0");
            }
            if !self.is_managed(cork.target_contract_address).await? {
                bail!(
                    "genesis cork {id} targets unmanaged cellar {}",
                    cork.target_contract_address
                );
            }
            if self.validator(validator).await?.is_none() {
                bail!("genesis cork {id} was submitted by unknown validator {validator}");
            }
            if !seen.insert((block_height, validator)) {
                bail!("validator {validator} has more than one genesis cork for height {block_height}");
            }
            ScheduledCorkStore::put(self, block_height, validator, cork).await?;
        }

        for result in cork_results {
            let id = result.cork.id(result.block_height);
            self.set_cork_result(id, result).await?;
        }

        Ok(())
    }
}
