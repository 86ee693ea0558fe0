use std::cell::Cell;

use somm_types::{Decimal, KeyPair, transaction::Builder};
use tempfile::TempDir;
use tendermint::{
    Hash, Time,
    abci::types::{CommitInfo, MisbehaviorKind},
    account,
    block::{Height, header::Version},
    chain,
};

use super::*;

pub(crate) const CHAIN_ID: &str = "sommelier-test";

/// A node with one managed cellar, an authority key, and one orchestrator key per validator.
pub(crate) struct TestChain {
    _dir: TempDir,
    pub(crate) store: Store,
    authority: KeyPair,
    orchestrators: Vec<KeyPair>,
    sequence: Cell<u64>,
}

pub(crate) fn cellar() -> Address {
    Address::with_last_byte(0xfe)
}

pub(crate) fn cork(call: &[u8]) -> Cork {
    Cork {
        target_contract_address: cellar(),
        encoded_contract_call: alloy_primitives::Bytes::copy_from_slice(call),
        scope: Some("rebalance".into()),
    }
}

fn validator_address(index: usize) -> ValidatorAddress {
    ValidatorAddress([index as u8 + 1; 20])
}

fn genesis(authority: &KeyPair, orchestrators: &[KeyPair], powers: &[u64]) -> GenesisState {
    let mut genesis = GenesisState::new(ChainId(CHAIN_ID.into()));
    genesis.authority = Some(authority.public_key().to_vec().into());
    genesis.cellar_ids.push(cellar());
    for (index, (keypair, power)) in orchestrators.iter().zip(powers).enumerate() {
        genesis.validators.push(Validator {
            address: validator_address(index),
            orchestrator: OrchestratorAddress::from_public_key(keypair.public_key()),
            power: Power(*power),
        });
    }
    genesis
}

/// A begin-block request for the test chain at the given height.
pub(crate) fn begin_block(
    height: u64,
    byzantine_validators: Vec<ValidatorAddress>,
) -> request::BeginBlock {
    let height = Height::try_from(height).expect("valid height");
    request::BeginBlock {
        hash: Hash::default(),
        header: Header {
            version: Version { block: 11, app: 1 },
            chain_id: chain::Id::try_from(CHAIN_ID.to_string()).expect("valid chain id"),
            height,
            time: Time::unix_epoch(),
            last_block_id: None,
            last_commit_hash: None,
            data_hash: None,
            validators_hash: Hash::default(),
            next_validators_hash: Hash::default(),
            consensus_hash: Hash::default(),
            app_hash: AppHash::default(),
            last_results_hash: None,
            evidence_hash: None,
            proposer_address: account::Id::new([0; 20]),
        },
        last_commit_info: CommitInfo {
            round: 0u8.into(),
            votes: vec![],
        },
        byzantine_validators: byzantine_validators
            .into_iter()
            .map(|address| Misbehavior {
                kind: MisbehaviorKind::DuplicateVote,
                validator: tendermint::abci::types::Validator {
                    address: address.0,
                    power: 0u32.into(),
                },
                height,
                time: Time::unix_epoch(),
                total_voting_power: 0u32.into(),
            })
            .collect(),
    }
}

impl TestChain {
    pub(crate) async fn new(powers: &[u64]) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = Store::init(dir.path().to_path_buf())
            .await
            .expect("failed to create store");
        let authority = KeyPair::generate().unwrap();
        let orchestrators: Vec<KeyPair> = powers
            .iter()
            .map(|_| KeyPair::generate().unwrap())
            .collect();

        store
            .state
            .write()
            .await
            .load_genesis(genesis(&authority, &orchestrators, powers))
            .await
            .unwrap();

        Self {
            _dir: dir,
            store,
            authority,
            orchestrators,
            sequence: Cell::new(0),
        }
    }

    pub(crate) async fn height(&self) -> u64 {
        self.store.latest().block_height().await.unwrap()
    }

    /// A fresh sequence, higher than any handed out before.
    fn next_sequence(&self) -> u64 {
        let sequence = self.sequence.get() + 1;
        self.sequence.set(sequence);
        sequence
    }

    /// Run and commit one block containing the given transactions.
    pub(crate) async fn block(
        &self,
        txs: &[Vec<u8>],
    ) -> (Vec<response::DeliverTx>, response::EndBlock) {
        self.block_with_byzantine(txs, Vec::new()).await
    }

    async fn block_with_byzantine(
        &self,
        txs: &[Vec<u8>],
        byzantine_validators: Vec<ValidatorAddress>,
    ) -> (Vec<response::DeliverTx>, response::EndBlock) {
        let height = self.height().await + 1;
        let mut state = self.store.state.write().await;
        state
            .begin_block(begin_block(height, byzantine_validators))
            .await
            .unwrap();
        let mut results = Vec::new();
        for tx in txs {
            results.push(state.deliver_tx(tx).await);
        }
        let end = state
            .end_block(request::EndBlock {
                height: height as i64,
            })
            .await
            .unwrap();
        drop(state);
        self.store.commit().await.unwrap();
        (results, end)
    }

    pub(crate) fn schedule(&self, validator: usize, cork: Cork, block_height: u64) -> Vec<u8> {
        let sequence = self.next_sequence();
        sign_as(&self.orchestrators[validator], |b, key| {
            b.schedule_cork(key, sequence, cork, block_height)
        })
    }

    fn authority_tx(&self, build: impl FnOnce(Builder, Bytes, u64) -> Builder) -> Vec<u8> {
        let sequence = self.next_sequence();
        sign_as(&self.authority, |b, key| build(b, key, sequence))
    }
}

fn sign_as(keypair: &KeyPair, build: impl FnOnce(Builder, Bytes) -> Builder) -> Vec<u8> {
    let builder = Builder::new(ChainId(CHAIN_ID.into()));
    build(builder, Bytes::copy_from_slice(keypair.public_key()))
        .build()
        .sign_to_proto(keypair)
        .unwrap()
}

fn codes(results: &[response::DeliverTx]) -> Vec<u32> {
    results.iter().map(|result| result.code.value()).collect()
}

#[tokio::test]
async fn approved_cork_is_queued_at_its_height() {
    let chain = TestChain::new(&[70, 30]).await;

    let (results, end) = chain
        .block(&[
            chain.schedule(0, cork(&[0xbe, 0xef]), 3),
            chain.schedule(1, cork(&[0xbe, 0xef]), 3),
        ])
        .await;
    assert_eq!(codes(&results), vec![0, 0], "{results:?}");
    assert!(end.events.is_empty());

    let id = cork(&[0xbe, 0xef]).id(3);
    assert_eq!(results[0].data, Bytes::from(hex::encode(id)));
    assert_eq!(results[0].events[0].kind, cork::event::CORK);
    let state = chain.store.latest();
    assert_eq!(state.scheduled_block_heights().await.unwrap(), vec![3]);
    assert_eq!(state.scheduled_corks_by_id(id).await.unwrap().len(), 2);

    let (_, end) = chain.block(&[]).await;
    let kinds: Vec<&str> = end.events.iter().map(|e| e.kind.as_str()).collect();
    assert_eq!(
        kinds,
        vec![cork::event::CORK_RESULT, cork::event::OUTGOING_CONTRACT_CALL]
    );

    let state = chain.store.latest();
    let outgoing = state.outgoing_contract_calls().await.unwrap();
    assert_eq!(outgoing.len(), 1);
    assert_eq!(outgoing[0].invalidation_nonce, 1);
    assert_eq!(outgoing[0].block_height, 3);
    assert_eq!(outgoing[0].payload, cork(&[0xbe, 0xef]).encoded_contract_call);

    assert!(state.scheduled_corks().await.unwrap().is_empty());
    assert_eq!(state.invalidation_nonce().await.unwrap(), 1);
    assert_eq!(state.last_tallied().await.unwrap(), Some(3));

    let result = state.cork_result(id).await.unwrap().unwrap();
    assert!(result.approved);
    assert_eq!(result.approval_percentage, Decimal::ONE);
    assert_eq!(state.cork_results().await.unwrap(), vec![(id, result)]);

    assert_eq!(
        state.validator_cork_count(validator_address(0)).await.unwrap(),
        1
    );
    assert_eq!(
        state.validator_cork_count(validator_address(1)).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn minority_cork_is_recorded_but_not_queued() {
    let chain = TestChain::new(&[70, 30]).await;
    chain.block(&[chain.schedule(1, cork(&[0x01]), 2)]).await;
    chain.block(&[]).await;

    let state = chain.store.latest();
    assert!(state.outgoing_contract_calls().await.unwrap().is_empty());
    let result = state
        .cork_result(cork(&[0x01]).id(2))
        .await
        .unwrap()
        .unwrap();
    assert!(!result.approved);
    assert_eq!(result.approval_percentage.to_string(), "0.300000000000000000");
    assert!(state.scheduled_corks().await.unwrap().is_empty());
}

#[tokio::test]
async fn rejections_carry_result_codes() {
    let chain = TestChain::new(&[70, 30]).await;
    let stranger = KeyPair::generate().unwrap();
    let mut unmanaged = cork(&[0x01]);
    unmanaged.target_contract_address = Address::with_last_byte(0x01);

    let (results, _) = chain
        .block(&[
            sign_as(&stranger, |b, key| b.schedule_cork(key, 1, cork(&[0x01]), 5)),
            chain.schedule(0, unmanaged, 5),
            chain.schedule(0, cork(&[0x01]), 1),
            vec![0xde, 0xad],
        ])
        .await;

    assert_eq!(codes(&results), vec![2, 3, 4, CODE_REJECTED]);
    assert!(results.iter().all(|r| r.data.is_empty()));

    let state = chain.store.latest();
    assert!(state.scheduled_corks().await.unwrap().is_empty());
    assert_eq!(
        state.validator_cork_count(validator_address(0)).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn wrong_chain_id_is_rejected() {
    let chain = TestChain::new(&[100]).await;
    let keypair = &chain.orchestrators[0];
    let tx = Builder::new(ChainId("other-chain".into()))
        .schedule_cork(Bytes::copy_from_slice(keypair.public_key()), 1, cork(&[1]), 5)
        .build()
        .sign_to_proto(keypair)
        .unwrap();

    let (results, _) = chain.block(&[tx]).await;
    assert_eq!(codes(&results), vec![CODE_REJECTED]);
    assert!(results[0].log.contains("chain ID"));
}

#[tokio::test]
async fn failed_action_discards_the_whole_transaction() {
    let chain = TestChain::new(&[100]).await;
    let mut unmanaged = cork(&[0x02]);
    unmanaged.target_contract_address = Address::with_last_byte(0x01);

    let tx = sign_as(&chain.orchestrators[0], |b, key| {
        b.schedule_cork(key.clone(), 1, cork(&[0x01]), 5)
            .schedule_cork(key, 2, unmanaged, 6)
    });
    let (results, _) = chain.block(&[tx]).await;

    assert_eq!(codes(&results), vec![3]);
    let state = chain.store.latest();
    assert!(state.scheduled_corks().await.unwrap().is_empty());
    // The discarded transaction did not advance the sequence either:
    let orchestrator = chain.orchestrators[0].public_key();
    assert_eq!(state.sequence(orchestrator).await.unwrap(), 0);
}

#[tokio::test]
async fn later_vote_in_the_same_height_wins() {
    let chain = TestChain::new(&[100]).await;
    chain
        .block(&[
            chain.schedule(0, cork(&[0x01]), 5),
            chain.schedule(0, cork(&[0x02]), 5),
        ])
        .await;

    let state = chain.store.latest();
    let scheduled = state.scheduled_corks_by_height(5).await.unwrap();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].cork, cork(&[0x02]));
    assert_eq!(
        state.validator_cork_count(validator_address(0)).await.unwrap(),
        2
    );
}

#[tokio::test]
async fn replayed_vote_is_rejected() {
    let chain = TestChain::new(&[100]).await;
    let first = chain.schedule(0, cork(&[0x01]), 5);
    let second = chain.schedule(0, cork(&[0x02]), 5);

    let (results, _) = chain.block(&[first.clone(), second]).await;
    assert_eq!(codes(&results), vec![0, 0], "{results:?}");

    // Resubmitting the first vote cannot bring it back:
    let (results, _) = chain.block(&[first]).await;
    assert_eq!(codes(&results), vec![CODE_REJECTED]);
    assert!(results[0].log.contains("sequence"));

    let state = chain.store.latest();
    let scheduled = state.scheduled_corks_by_height(5).await.unwrap();
    assert_eq!(scheduled[0].cork, cork(&[0x02]));
    assert_eq!(
        state.validator_cork_count(validator_address(0)).await.unwrap(),
        2
    );
}

#[tokio::test]
async fn replayed_params_update_is_rejected() {
    let chain = TestChain::new(&[100]).await;
    let loose = Params {
        vote_threshold: "0.5".parse().unwrap(),
    };
    let strict = Params {
        vote_threshold: "0.9".parse().unwrap(),
    };

    let loosen = chain.authority_tx(|b, key, sequence| b.update_params(key, sequence, loose));
    let tighten =
        chain.authority_tx(|b, key, sequence| b.update_params(key, sequence, strict.clone()));
    let (results, _) = chain.block(&[loosen.clone(), tighten]).await;
    assert_eq!(codes(&results), vec![0, 0], "{results:?}");

    let (results, _) = chain.block(&[loosen]).await;
    assert_eq!(codes(&results), vec![CODE_REJECTED]);
    assert_eq!(chain.store.latest().params().await.unwrap(), strict);
}

#[tokio::test]
async fn authority_manages_cellars() {
    let chain = TestChain::new(&[100]).await;
    let new_cellar = Address::with_last_byte(0x42);

    let (results, _) = chain
        .block(&[chain.authority_tx(|b, key, sequence| {
            b.add_managed_cellars(key, sequence, [new_cellar, new_cellar, cellar()])
        })])
        .await;
    assert_eq!(codes(&results), vec![0], "{results:?}");
    assert_eq!(
        chain.store.latest().cellar_ids().await.unwrap(),
        vec![new_cellar, cellar()]
    );

    let (results, _) = chain
        .block(&[chain.authority_tx(|b, key, sequence| {
            b.remove_managed_cellars(key, sequence, [cellar()])
        })])
        .await;
    assert_eq!(codes(&results), vec![0], "{results:?}");
    assert_eq!(
        chain.store.latest().cellar_ids().await.unwrap(),
        vec![new_cellar]
    );

    // Only the authority may do this:
    let (results, _) = chain
        .block(&[sign_as(&chain.orchestrators[0], |b, key| {
            b.add_managed_cellars(key, 1, [cellar()])
        })])
        .await;
    assert_eq!(codes(&results), vec![2]);
    assert_eq!(
        chain.store.latest().cellar_ids().await.unwrap(),
        vec![new_cellar]
    );
}

#[tokio::test]
async fn removing_a_cellar_keeps_pending_votes() {
    let chain = TestChain::new(&[100]).await;
    chain.block(&[chain.schedule(0, cork(&[0x01]), 3)]).await;
    chain
        .block(&[chain.authority_tx(|b, key, sequence| {
            b.remove_managed_cellars(key, sequence, [cellar()])
        })])
        .await;

    let (results, _) = chain.block(&[chain.schedule(0, cork(&[0x01]), 10)]).await;
    assert_eq!(codes(&results), vec![3]);
    assert_eq!(
        chain
            .store
            .latest()
            .outgoing_contract_calls()
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn authority_updates_params() {
    let chain = TestChain::new(&[60, 40]).await;
    let params = Params {
        vote_threshold: "0.5".parse().unwrap(),
    };
    let (results, _) = chain
        .block(&[chain.authority_tx(|b, key, sequence| {
            b.update_params(key, sequence, params.clone())
        })])
        .await;
    assert_eq!(codes(&results), vec![0], "{results:?}");
    assert_eq!(chain.store.latest().params().await.unwrap(), params);

    // 60% now clears the threshold:
    chain.block(&[chain.schedule(0, cork(&[0x01]), 3)]).await;
    chain.block(&[]).await;
    assert_eq!(
        chain
            .store
            .latest()
            .outgoing_contract_calls()
            .await
            .unwrap()
            .len(),
        1
    );

    let too_high = Params {
        vote_threshold: "1.5".parse().unwrap(),
    };
    let (results, _) = chain
        .block(&[chain.authority_tx(|b, key, sequence| b.update_params(key, sequence, too_high))])
        .await;
    assert_eq!(codes(&results), vec![CODE_REJECTED]);
    assert_eq!(chain.store.latest().params().await.unwrap(), params);
}

#[tokio::test]
async fn chain_without_authority_refuses_authority_actions() {
    let dir = TempDir::new().unwrap();
    let store = Store::init(dir.path().to_path_buf()).await.unwrap();
    let keypair = KeyPair::generate().unwrap();
    let mut state = store.state.write().await;
    state
        .load_genesis(GenesisState::new(ChainId(CHAIN_ID.into())))
        .await
        .unwrap();
    state.begin_block(begin_block(1, Vec::new())).await.unwrap();

    let result = state
        .deliver_tx(&sign_as(&keypair, |b, key| {
            b.add_managed_cellars(key, 1, [cellar()])
        }))
        .await;
    assert_eq!(result.code.value(), 2);
}

#[tokio::test]
async fn tombstoned_validator_loses_its_vote() {
    let chain = TestChain::new(&[70, 30]).await;
    chain.block(&[chain.schedule(0, cork(&[0x01]), 4)]).await;

    chain
        .block_with_byzantine(&[], vec![validator_address(0)])
        .await;
    let validator = chain
        .store
        .latest()
        .validator(validator_address(0))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(validator.power, Power(0));

    let (results, _) = chain.block(&[chain.schedule(0, cork(&[0x01]), 10)]).await;
    assert_eq!(codes(&results), vec![2]);

    chain.block(&[]).await;
    let state = chain.store.latest();
    assert!(state.outgoing_contract_calls().await.unwrap().is_empty());
    let result = state
        .cork_result(cork(&[0x01]).id(4))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(result.approval_percentage, Decimal::ZERO);
}

#[tokio::test]
async fn blocks_must_be_consecutive() {
    let chain = TestChain::new(&[100]).await;
    let mut state = chain.store.state.write().await;
    assert!(state.begin_block(begin_block(2, Vec::new())).await.is_err());

    state.begin_block(begin_block(1, Vec::new())).await.unwrap();
    assert!(
        state
            .end_block(request::EndBlock { height: 2 })
            .await
            .is_err()
    );
}

#[tokio::test]
async fn check_tx_leaves_state_untouched() {
    let chain = TestChain::new(&[100]).await;
    chain.block(&[]).await;

    let state = chain.store.latest();
    let result = state.check_tx(&chain.schedule(0, cork(&[0x01]), 5)).await;
    assert!(result.code.is_ok(), "{result:?}");
    assert_eq!(result.data, Bytes::from(hex::encode(cork(&[0x01]).id(5))));
    assert!(state.scheduled_corks().await.unwrap().is_empty());
    assert_eq!(
        state
            .sequence(chain.orchestrators[0].public_key())
            .await
            .unwrap(),
        0
    );

    let result = state.check_tx(&chain.schedule(0, cork(&[0x01]), 1)).await;
    assert_eq!(result.code.value(), 4);
}

#[tokio::test]
async fn check_tx_judges_heights_as_the_next_block_will() {
    let chain = TestChain::new(&[100]).await;
    chain.block(&[]).await;
    chain.block(&[]).await;
    assert_eq!(chain.height().await, 2);

    // The next block is height 3, so a vote for 3 is already in the past:
    let state = chain.store.latest();
    let result = state.check_tx(&chain.schedule(0, cork(&[0x01]), 3)).await;
    assert_eq!(result.code.value(), 4, "{result:?}");

    let result = state.check_tx(&chain.schedule(0, cork(&[0x01]), 4)).await;
    assert!(result.code.is_ok(), "{result:?}");

    // And delivery agrees with check:
    let (results, _) = chain.block(&[chain.schedule(0, cork(&[0x01]), 3)]).await;
    assert_eq!(codes(&results), vec![4]);
}

#[tokio::test]
async fn check_tx_rejects_replays_of_committed_transactions() {
    let chain = TestChain::new(&[100]).await;
    let tx = chain.schedule(0, cork(&[0x01]), 5);

    assert!(chain.store.latest().check_tx(&tx).await.code.is_ok());
    chain.block(std::slice::from_ref(&tx)).await;

    let result = chain.store.latest().check_tx(&tx).await;
    assert_eq!(result.code.value(), CODE_REJECTED);
}

#[tokio::test]
async fn exported_genesis_reimports() {
    let chain = TestChain::new(&[70, 30]).await;
    chain
        .block(&[
            chain.schedule(0, cork(&[0x01]), 2),
            chain.schedule(1, cork(&[0x01]), 2),
            chain.schedule(1, cork(&[0x02]), 9),
        ])
        .await;
    chain.block(&[]).await;

    let exported = chain.store.latest().export_genesis().await.unwrap();
    assert_eq!(exported.invalidation_nonce, 1);
    assert_eq!(exported.scheduled_corks.len(), 1);
    assert_eq!(exported.cork_results.len(), 1);
    assert_eq!(exported.validators.len(), 2);

    let json = serde_json::to_string(&exported).unwrap();
    let reparsed: GenesisState = serde_json::from_str(&json).unwrap();

    let dir = TempDir::new().unwrap();
    let store = Store::init(dir.path().to_path_buf()).await.unwrap();
    let mut state = store.state.write().await;
    state.load_genesis(reparsed).await.unwrap();
    assert_eq!(state.export_genesis().await.unwrap(), exported);
}

#[tokio::test]
async fn invalid_genesis_is_refused() {
    let authority = KeyPair::generate().unwrap();
    let orchestrators = vec![KeyPair::generate().unwrap(), KeyPair::generate().unwrap()];
    let base = genesis(&authority, &orchestrators, &[70, 30]);

    async fn init(genesis: GenesisState) -> Result<(), Report> {
        let dir = TempDir::new().unwrap();
        let store = Store::init(dir.path().to_path_buf()).await.unwrap();
        let mut state = store.state.write().await;
        state.load_genesis(genesis).await
    }

    assert!(init(base.clone()).await.is_ok());

    let mut duplicate_validator = base.clone();
    duplicate_validator.validators[1].address = duplicate_validator.validators[0].address;
    assert!(init(duplicate_validator).await.is_err());

    let mut shared_orchestrator = base.clone();
    shared_orchestrator.validators[1].orchestrator = shared_orchestrator.validators[0].orchestrator;
    assert!(init(shared_orchestrator).await.is_err());

    let mut bad_threshold = base.clone();
    bad_threshold.params.vote_threshold = "1.1".parse().unwrap();
    assert!(init(bad_threshold).await.is_err());

    let mut at_zero = base.clone();
    at_zero
        .scheduled_corks
        .push(ScheduledCork::new(cork(&[1]), 0, validator_address(0)));
    assert!(init(at_zero).await.is_err());

    let mut unmanaged = base.clone();
    let mut stray = cork(&[1]);
    stray.target_contract_address = Address::with_last_byte(0x01);
    unmanaged
        .scheduled_corks
        .push(ScheduledCork::new(stray, 5, validator_address(0)));
    assert!(init(unmanaged).await.is_err());

    let mut forged_id = base.clone();
    let mut scheduled = ScheduledCork::new(cork(&[1]), 5, validator_address(0));
    scheduled.id = B256::ZERO;
    forged_id.scheduled_corks.push(scheduled);
    assert!(init(forged_id).await.is_err());
}

#[tokio::test]
async fn init_chain_loads_genesis_from_app_state() {
    let dir = TempDir::new().unwrap();
    let store = Store::init(dir.path().to_path_buf()).await.unwrap();
    let authority = KeyPair::generate().unwrap();
    let orchestrators = vec![KeyPair::generate().unwrap()];
    let app_state = serde_json::to_vec(&genesis(&authority, &orchestrators, &[100])).unwrap();

    let response = store
        .state
        .write()
        .await
        .init_chain(init_chain(CHAIN_ID, app_state.clone()))
        .await
        .unwrap();
    assert_eq!(
        response.app_hash,
        AppHash::try_from(Sha256::digest(&app_state).to_vec()).unwrap()
    );

    let state = store.state.read().await;
    assert_eq!(state.chain_id().await.unwrap(), ChainId(CHAIN_ID.into()));
    assert_eq!(state.cellar_ids().await.unwrap(), vec![cellar()]);
    assert_eq!(state.validators().await.unwrap().len(), 1);
}

#[tokio::test]
async fn init_chain_refuses_mismatched_chain_id() {
    let dir = TempDir::new().unwrap();
    let store = Store::init(dir.path().to_path_buf()).await.unwrap();
    let app_state =
        serde_json::to_vec(&GenesisState::new(ChainId("other-chain".into()))).unwrap();

    let result = store
        .state
        .write()
        .await
        .init_chain(init_chain(CHAIN_ID, app_state))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn init_chain_with_empty_app_state_starts_bare() {
    let dir = TempDir::new().unwrap();
    let store = Store::init(dir.path().to_path_buf()).await.unwrap();
    store
        .state
        .write()
        .await
        .init_chain(init_chain(CHAIN_ID, Vec::new()))
        .await
        .unwrap();

    let state = store.state.read().await;
    assert_eq!(state.chain_id().await.unwrap(), ChainId(CHAIN_ID.into()));
    assert_eq!(state.authority().await.unwrap(), None);
    assert!(state.cellar_ids().await.unwrap().is_empty());
}

/// An init-chain request carrying the consensus parameters CometBFT writes into a new genesis.
fn init_chain(chain_id: &str, app_state_bytes: Vec<u8>) -> request::InitChain {
    let consensus_params = serde_json::from_value(serde_json::json!({
        "block": {
            "max_bytes": "22020096",
            "max_gas": "-1",
            "time_iota_ms": "1000"
        },
        "evidence": {
            "max_age_num_blocks": "100000",
            "max_age_duration": "172800000000000",
            "max_bytes": "1048576"
        },
        "validator": {
            "pub_key_types": ["ed25519"]
        }
    }))
    .expect("valid consensus params");

    request::InitChain {
        time: Time::unix_epoch(),
        chain_id: chain_id.to_string(),
        consensus_params,
        validators: vec![],
        app_state_bytes: app_state_bytes.into(),
        initial_height: Height::from(1u32),
    }
}
