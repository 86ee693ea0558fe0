use alloy_primitives::Bytes as CallBytes;

use super::*;
use crate::KeyPair;

fn cork() -> Cork {
    Cork {
        target_contract_address: Address::with_last_byte(0xfe),
        encoded_contract_call: CallBytes::from_static(&[0xbe, 0xef]),
        scope: Some("S1".into()),
    }
}

#[test]
fn signed_transaction_authenticates() {
    let keypair = KeyPair::generate().unwrap();
    let tx = Builder::new(ChainId("sommelier-test".into()))
        .schedule_cork(Bytes::copy_from_slice(keypair.public_key()), 1, cork(), 100)
        .build();

    let bytes = tx.clone().sign_to_proto(&keypair).unwrap();
    let authenticated = AuthenticatedTx::from_proto(&bytes).unwrap();
    assert_eq!(*authenticated, tx);

    let Action::ScheduleCork(schedule) = &authenticated.actions[0] else {
        panic!("expected schedule cork action");
    };
    assert_eq!(
        schedule.orchestrator.address(),
        OrchestratorAddress::from_public_key(keypair.public_key())
    );
}

#[test]
fn unsigned_transaction_is_rejected() {
    let keypair = KeyPair::generate().unwrap();
    let tx = Builder::new(ChainId("sommelier-test".into()))
        .schedule_cork(Bytes::copy_from_slice(keypair.public_key()), 1, cork(), 100)
        .build();
    let unsigned = prost::Message::encode_to_vec(&proto::Transaction::from(tx));
    assert!(AuthenticatedTx::from_proto(unsigned).is_err());
}

#[test]
fn empty_chain_id_is_rejected() {
    let keypair = KeyPair::generate().unwrap();
    let bytes = Builder::new(ChainId(String::new()))
        .add_managed_cellars(
            Bytes::copy_from_slice(keypair.public_key()),
            1,
            [Address::with_last_byte(1)],
        )
        .build()
        .sign_to_proto(&keypair)
        .unwrap();
    assert!(AuthenticatedTx::from_proto(bytes).is_err());
}

#[test]
fn manage_cellars_needs_at_least_one_cellar() {
    let keypair = KeyPair::generate().unwrap();
    let bytes = Builder::new(ChainId("sommelier-test".into()))
        .remove_managed_cellars(Bytes::copy_from_slice(keypair.public_key()), 1, Vec::new())
        .build()
        .sign_to_proto(&keypair)
        .unwrap();
    assert!(AuthenticatedTx::from_proto(bytes).is_err());
}

#[test]
fn all_actions_convert_both_ways() {
    let key = Bytes::from_static(&[9; 32]);
    let tx = Builder::new(ChainId("sommelier-test".into()))
        .schedule_cork(key.clone(), 1, cork(), 5)
        .add_managed_cellars(key.clone(), 2, [Address::with_last_byte(1)])
        .remove_managed_cellars(key.clone(), 3, [Address::with_last_byte(2)])
        .update_params(key.clone(), 4, Params::default())
        .build();
    let converted = Transaction::try_from(proto::Transaction::from(tx.clone())).unwrap();
    assert_eq!(converted, tx);

    let sequences: Vec<u64> = converted.actions.iter().map(Action::sequence).collect();
    assert_eq!(sequences, vec![1, 2, 3, 4]);
    assert!(converted.actions.iter().all(|action| *action.signer() == key));
}

#[test]
fn sequence_is_covered_by_the_signature() {
    use prost::Message as _;

    let keypair = KeyPair::generate().unwrap();
    let bytes = Builder::new(ChainId("sommelier-test".into()))
        .schedule_cork(Bytes::copy_from_slice(keypair.public_key()), 7, cork(), 100)
        .build()
        .sign_to_proto(&keypair)
        .unwrap();

    let mut tampered = proto::Transaction::decode(&bytes[..]).unwrap();
    let Some(somm_proto::transaction::action::Action::ScheduleCork(schedule)) =
        tampered.actions[0].action.as_mut()
    else {
        panic!("expected schedule cork action");
    };
    schedule.sequence = 8;

    assert!(AuthenticatedTx::from_proto(tampered.encode_to_vec()).is_err());
    assert!(AuthenticatedTx::from_proto(bytes).is_ok());
}
