use super::*;

impl<S: StateReadExt> State<S> {
    /// Every pending vote, in height then validator order.
    pub async fn scheduled_corks(&self) -> Result<Vec<ScheduledCork>, Report> {
        self.store
            .prefix::<ScheduledCork>(Substore::Cork, keys::SCHEDULED_PREFIX)
            .map_ok(|(_, scheduled)| scheduled)
            .try_collect()
            .await
    }

    /// The pending votes for one height, in validator order.
    pub async fn scheduled_corks_by_height(
        &self,
        height: u64,
    ) -> Result<Vec<ScheduledCork>, Report> {
        self.store
            .prefix::<ScheduledCork>(Substore::Cork, &keys::scheduled_at_height(height))
            .map_ok(|(_, scheduled)| scheduled)
            .try_collect()
            .await
    }

    /// The pending votes for one cork id; each is from a different validator.
    pub async fn scheduled_corks_by_id(&self, id: B256) -> Result<Vec<ScheduledCork>, Report> {
        self.store
            .prefix::<ScheduledCork>(Substore::Cork, keys::SCHEDULED_PREFIX)
            .try_filter_map(|(_, scheduled)| async move {
                Ok::<_, Report>((scheduled.id == id).then_some(scheduled))
            })
            .try_collect()
            .await
    }

    /// Every height with at least one pending vote, ascending.
    pub async fn scheduled_block_heights(&self) -> Result<Vec<u64>, Report> {
        let scheduled: Vec<String> = self
            .store
            .keys(Substore::Cork, keys::SCHEDULED_PREFIX)
            .try_collect()
            .await?;
        let mut heights = BTreeSet::new();
        for key in scheduled {
            let (height, _) = keys::parse_scheduled_cork(&key)?;
            heights.insert(height);
        }
        Ok(heights.into_iter().collect())
    }

    pub async fn cork_result(&self, id: B256) -> Result<Option<CorkResult>, Report> {
        self.store.get(Substore::Cork, &keys::cork_result(id)).await
    }

    /// Every recorded tally outcome, keyed by cork id.
    pub async fn cork_results(&self) -> Result<Vec<(B256, CorkResult)>, Report> {
        self.store
            .prefix::<CorkResult>(Substore::Cork, keys::RESULTS_PREFIX)
            .and_then(|(key, result)| async move {
                let id: B256 = key
                    .strip_prefix(keys::RESULTS_PREFIX)
                    .ok_or_else(|| eyre!("invalid cork result key: {key}"))?
                    .parse()?;
                Ok::<_, Report>((id, result))
            })
            .try_collect()
            .await
    }

    /// How many corks a validator has submitted over its lifetime.
    pub async fn validator_cork_count(&self, validator: ValidatorAddress) -> Result<u64, Report> {
        Ok(self
            .store
            .get::<u64>(Substore::Cork, &keys::validator_count(validator))
            .await?
            .unwrap_or(0))
    }

    /// The most recent height whose votes have been tallied.
    pub async fn last_tallied(&self) -> Result<Option<u64>, Report> {
        self.store
            .get(Substore::Cork, keys::LAST_TALLIED_HEIGHT)
            .await
    }
}

impl<S: StateReadExt + StateWriteExt> ScheduledCorkStore for State<S> {
    async fn put(
        &mut self,
        height: u64,
        validator: ValidatorAddress,
        cork: Cork,
    ) -> Result<B256, Report> {
        let scheduled = ScheduledCork::new(cork, height, validator);
        let id = scheduled.id;
        self.store
            .put(Substore::Cork, &keys::scheduled_cork(height, validator), scheduled);
        Ok(id)
    }

    async fn list_by_height(&self, height: u64) -> Result<Vec<(ValidatorAddress, Cork)>, Report> {
        Ok(self
            .scheduled_corks_by_height(height)
            .await?
            .into_iter()
            .map(|scheduled| (scheduled.validator, scheduled.cork))
            .collect())
    }

    async fn clear_height(&mut self, height: u64) -> Result<(), Report> {
        let keys: Vec<String> = self
            .store
            .keys(Substore::Cork, &keys::scheduled_at_height(height))
            .try_collect()
            .await?;
        for key in keys {
            self.store.delete_key(Substore::Cork, &key);
        }
        Ok(())
    }

    async fn count_for_validator(&self, validator: ValidatorAddress) -> Result<u64, Report> {
        self.validator_cork_count(validator).await
    }

    async fn increment_count_for_validator(
        &mut self,
        validator: ValidatorAddress,
    ) -> Result<(), Report> {
        let count = self
            .validator_cork_count(validator)
            .await?
            .saturating_add(1);
        self.store
            .put(Substore::Cork, &keys::validator_count(validator), count);
        Ok(())
    }

    async fn set_cork_result(&mut self, id: B256, result: CorkResult) -> Result<(), Report> {
        self.store.put(Substore::Cork, &keys::cork_result(id), result);
        Ok(())
    }

    async fn last_tallied_height(&self) -> Result<Option<u64>, Report> {
        self.last_tallied().await
    }

    async fn set_last_tallied_height(&mut self, height: u64) -> Result<(), Report> {
        self.store
            .put(Substore::Cork, keys::LAST_TALLIED_HEIGHT, height);
        Ok(())
    }
}
