use super::*;

impl<S: StateReadExt> State<S> {
    /// The last invalidation nonce handed out; zero if nothing has been queued yet.
    pub async fn invalidation_nonce(&self) -> Result<u64, Report> {
        Ok(self
            .store
            .get::<u64>(Bridge, keys::INVALIDATION_NONCE)
            .await?
            .unwrap_or(0))
    }

    /// Every contract call queued for relay, in nonce order.
    pub async fn outgoing_contract_calls(&self) -> Result<Vec<OutgoingContractCall>, Report> {
        self.store
            .prefix::<OutgoingContractCall>(Bridge, keys::OUTGOING_PREFIX)
            .map_ok(|(_, call)| call)
            .try_collect()
            .await
    }
}

impl<S: StateReadExt + StateWriteExt> State<S> {
    pub(crate) fn set_invalidation_nonce(&mut self, nonce: u64) {
        // Zero is the implicit starting point, and stored values are never empty:
        if nonce > 0 {
            self.store.put(Bridge, keys::INVALIDATION_NONCE, nonce);
        }
    }
}

impl<S: StateReadExt + StateWriteExt> InstructionSink for State<S> {
    async fn submit(&mut self, call: ContractCall) -> Result<u64, SinkError> {
        if call.payload.is_empty() {
            return Err(SinkError::Invalid("empty contract call payload".into()));
        }
        if call.target == Address::ZERO {
            return Err(SinkError::Invalid("zero target contract address".into()));
        }

        let previous = self
            .invalidation_nonce()
            .await
            .map_err(SinkError::Storage)?;
        let invalidation_nonce = previous
            .checked_add(1)
            .ok_or_else(|| SinkError::Storage(eyre!("invalidation nonce overflow")))?;
        let block_height = self.block_height().await.map_err(SinkError::Storage)?;

        self.set_invalidation_nonce(invalidation_nonce);
        self.store.put(
            Bridge,
            &keys::outgoing(invalidation_nonce),
            OutgoingContractCall {
                invalidation_nonce,
                invalidation_scope: call.invalidation_scope,
                target: call.target,
                payload: call.payload,
                block_height,
            },
        );

        Ok(invalidation_nonce)
    }
}
