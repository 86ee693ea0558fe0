use super::*;

impl<S: StateReadExt> State<S> {
    /// Every validator ever declared, including tombstoned ones, in address order.
    pub async fn validators(&self) -> Result<Vec<Validator>, Report> {
        self.store
            .prefix::<Validator>(Staking, keys::VALIDATORS_PREFIX)
            .map_ok(|(_, validator)| validator)
            .try_collect()
            .await
    }

    pub async fn validator(&self, address: ValidatorAddress) -> Result<Option<Validator>, Report> {
        self.store.get(Staking, &keys::validator(address)).await
    }

    /// The bonded validator an orchestrator signs for, if any.
    pub async fn validator_for_orchestrator(
        &self,
        orchestrator: OrchestratorAddress,
    ) -> Result<Option<Validator>, Report> {
        let Some(address) = self
            .store
            .get::<ValidatorAddress>(Staking, &keys::orchestrator(orchestrator))
            .await?
        else {
            return Ok(None);
        };
        Ok(self
            .validator(address)
            .await?
            .filter(|validator| validator.power.value() > 0))
    }
}

impl<S: StateReadExt + StateWriteExt> State<S> {
    /// Declare a new validator along with its orchestrator key.
    pub(crate) async fn declare_validator(&mut self, validator: Validator) -> Result<(), Report> {
        // Redeclaring would let a tombstoned validator get its power back:
        if let Some(existing) = self.validator(validator.address).await? {
            bail!(
                "validator {} already exists with power {}",
                existing.address,
                existing.power,
            );
        }

        if let Some(delegator) = self
            .store
            .get::<ValidatorAddress>(Staking, &keys::orchestrator(validator.orchestrator))
            .await?
        {
            bail!(
                "orchestrator {} is already delegated to by validator {}",
                validator.orchestrator,
                delegator,
            );
        }

        info!(
            validator = %validator.address,
            orchestrator = %validator.orchestrator,
            power = validator.power.value(),
            "declaring validator"
        );
        self.store.put(
            Staking,
            &keys::orchestrator(validator.orchestrator),
            validator.address,
        );
        self.store
            .put(Staking, &keys::validator(validator.address), validator);

        Ok(())
    }

    /// Tombstone a misbehaving validator: its power drops to zero and its orchestrator can no
    /// longer sign for it.
    pub(crate) async fn tombstone_validator(
        &mut self,
        address: ValidatorAddress,
    ) -> Result<(), Report> {
        let Some(mut validator) = self.validator(address).await? else {
            warn!(%address, "could not find validator to tombstone");
            return Ok(());
        };

        if validator.power.value() == 0 {
            debug!(%address, "validator is already tombstoned");
            return Ok(());
        }

        info!(%address, power = validator.power.value(), "tombstoning validator");
        self.store
            .delete_key(Staking, &keys::orchestrator(validator.orchestrator));
        validator.power = Power(0);
        self.store.put(Staking, &keys::validator(address), validator);

        Ok(())
    }
}

impl<S: StateReadExt> VotingPowerProvider for State<S> {
    async fn bonded_validators_and_power(
        &self,
        _height: u64,
    ) -> Result<Vec<(ValidatorAddress, Power)>, Report> {
        // Power only changes in begin-block, so the current set is the set for this height.
        Ok(self
            .validators()
            .await?
            .into_iter()
            .filter(|validator| validator.power.value() > 0)
            .map(|validator| (validator.address, validator.power))
            .collect())
    }

    async fn resolve_signer(
        &self,
        signer: OrchestratorAddress,
    ) -> Result<Option<ValidatorAddress>, Report> {
        Ok(self
            .validator_for_orchestrator(signer)
            .await?
            .map(|validator| validator.address))
    }
}
