use super::*;

impl<S: StateReadExt + StateWriteExt> State<S> {
    /// Initialize the chain state from the genesis app state.
    #[instrument(skip(self, request), fields(chain_id = %request.chain_id))]
    pub async fn init_chain(
        &mut self,
        request: request::InitChain,
    ) -> Result<response::InitChain, Report> {
        let request::InitChain {
            time: _,
            chain_id,
            consensus_params,
            validators,
            app_state_bytes,
            initial_height,
        } = request;

        // Ensure that the initial height is 1:
        if initial_height.value() != 1 {
            bail!("initial height must be 1");
        }

        // Genesis can only be loaded before the first block:
        let height = self.block_height().await?;
        if height != 0 {
            bail!("cannot initialize chain at height {height}");
        }

        // An empty app state starts a chain with no authority, cellars, or validators:
        let genesis = if app_state_bytes.is_empty() {
            GenesisState::new(ChainId(chain_id.clone()))
        } else {
            serde_json::from_slice::<GenesisState>(&app_state_bytes)
                .map_err(|e| eyre!("failed to parse app state as genesis JSON: {e}"))?
        };
        if genesis.chain_id.0 != chain_id {
            bail!(
                "genesis chain ID {} does not match chain ID {chain_id}",
                genesis.chain_id
            );
        }

        self.load_genesis(genesis).await?;
        info!("initialized chain state from genesis");

        // The initial app hash is the hash of the app state it was built from:
        let app_hash = AppHash::try_from(Sha256::digest(&app_state_bytes).to_vec())?;

        Ok(response::InitChain {
            consensus_params: Some(consensus_params),
            validators,
            app_hash,
        })
    }
}
