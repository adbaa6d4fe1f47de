use cosmwasm_std::{to_json_binary, HexBinary};
use cw_multi_test::{App, Executor};
use dk_multitest::{deploy, first_attr, key_address, sign_proof};
use dk_oracle_proxy::error::ContractError;
use dkdao::RngExecuteMsg;
use k256::ecdsa::SigningKey;

fn commit_msg(byte: u8) -> RngExecuteMsg {
    RngExecuteMsg::Commit {
        digest: HexBinary::from([byte; 32]),
    }
}

#[test]
fn proofs_can_be_relayed_once() {
    let mut app = App::default();
    let dk = deploy(&mut app);
    let relayer = app.api().addr_make("relayer");

    // Register the signing key as controller
    let key = SigningKey::from_slice(&[0x42; 32]).unwrap();
    let signer = key_address(app.api(), &key);
    let msg = dk_oracle_proxy::msg::ExecuteMsg::AddController {
        address: signer.to_string(),
    };
    app.execute_contract(dk.manager.clone(), dk.proxy.clone(), &msg, &[])
        .unwrap();

    // The signed message is built by the contract
    let resp: dk_oracle_proxy::msg::ProofMessageResponse = app
        .wrap()
        .query_wasm_smart(
            &dk.proxy,
            &dk_oracle_proxy::msg::QueryMsg::ProofMessage {
                nonce: HexBinary::from([7u8; 24]),
            },
        )
        .unwrap();
    let proof = sign_proof(&key, [7u8; 24], resp.expiry);
    assert_eq!(proof.as_slice()[65..], resp.message.as_slice()[..]);

    let msg = dk_oracle_proxy::msg::ExecuteMsg::SafeCallWithProof {
        proof: proof.clone(),
        target: dk.rng.to_string(),
        msg: to_json_binary(&commit_msg(1)).unwrap(),
    };
    let resp = app
        .execute_contract(relayer.clone(), dk.proxy.clone(), &msg, &[])
        .unwrap();
    let wasm = resp.events.iter().find(|ev| ev.ty == "wasm").unwrap();
    assert_eq!(
        first_attr(&wasm.attributes, "controller").unwrap(),
        signer.to_string()
    );

    let progress: dk_rng::msg::ProgressResponse = app
        .wrap()
        .query_wasm_smart(&dk.rng, &dk_rng::msg::QueryMsg::Progress {})
        .unwrap();
    assert_eq!(progress.committed, 1);

    let used: dk_oracle_proxy::msg::IsNonceUsedResponse = app
        .wrap()
        .query_wasm_smart(
            &dk.proxy,
            &dk_oracle_proxy::msg::QueryMsg::IsNonceUsed {
                message: HexBinary::from(&proof.as_slice()[65..]),
            },
        )
        .unwrap();
    assert!(used.used);

    // Replay
    let err = app
        .execute_contract(relayer, dk.proxy.clone(), &msg, &[])
        .unwrap_err();
    assert_eq!(ContractError::NonceAlreadyUsed, err.downcast().unwrap());
}

#[test]
fn proofs_expire() {
    let mut app = App::default();
    let dk = deploy(&mut app);
    let relayer = app.api().addr_make("relayer");

    let key = SigningKey::from_slice(&[0x42; 32]).unwrap();
    let msg = dk_oracle_proxy::msg::ExecuteMsg::AddController {
        address: key_address(app.api(), &key).to_string(),
    };
    app.execute_contract(dk.manager.clone(), dk.proxy.clone(), &msg, &[])
        .unwrap();

    let now = app.block_info().time.seconds();
    let proof = sign_proof(&key, [1u8; 24], now + 30);
    app.update_block(|block| block.time = block.time.plus_seconds(31));

    let msg = dk_oracle_proxy::msg::ExecuteMsg::SafeCallWithProof {
        proof,
        target: dk.rng.to_string(),
        msg: to_json_binary(&commit_msg(1)).unwrap(),
    };
    let err = app
        .execute_contract(relayer.clone(), dk.proxy.clone(), &msg, &[])
        .unwrap_err();
    assert_eq!(
        ContractError::ProofExpired {
            expiry: now + 30,
            now: now + 31
        },
        err.downcast().unwrap()
    );

    // Too far in the future
    let now = app.block_info().time.seconds();
    let proof = sign_proof(&key, [2u8; 24], now + 3600);
    let msg = dk_oracle_proxy::msg::ExecuteMsg::SafeCallWithProof {
        proof,
        target: dk.rng.to_string(),
        msg: to_json_binary(&commit_msg(1)).unwrap(),
    };
    let err = app
        .execute_contract(relayer, dk.proxy.clone(), &msg, &[])
        .unwrap_err();
    assert_eq!(
        ContractError::ProofLifetimeTooLong {
            expiry: now + 3600,
            lifetime: 60
        },
        err.downcast().unwrap()
    );
}

#[test]
fn proofs_of_unknown_keys_are_rejected() {
    let mut app = App::default();
    let dk = deploy(&mut app);
    let relayer = app.api().addr_make("relayer");

    let key = SigningKey::from_slice(&[0x43; 32]).unwrap();
    let now = app.block_info().time.seconds();
    let msg = dk_oracle_proxy::msg::ExecuteMsg::SafeCallWithProof {
        proof: sign_proof(&key, [1u8; 24], now + 10),
        target: dk.rng.to_string(),
        msg: to_json_binary(&commit_msg(1)).unwrap(),
    };
    let err = app
        .execute_contract(relayer, dk.proxy.clone(), &msg, &[])
        .unwrap_err();
    assert_eq!(ContractError::Unauthorized, err.downcast().unwrap());
}

#[test]
fn only_the_proxy_can_drive_the_rng() {
    let mut app = App::default();
    let dk = deploy(&mut app);

    // The operator is a controller but not the registered oracle
    let err = app
        .execute_contract(dk.operator.clone(), dk.rng.clone(), &commit_msg(1), &[])
        .unwrap_err();
    assert_eq!(dk_rng::error::ContractError::Unauthorized, err.downcast().unwrap());

    // Removed controllers lose access
    let msg = dk_oracle_proxy::msg::ExecuteMsg::RemoveController {
        address: dk.operator.to_string(),
    };
    app.execute_contract(dk.manager.clone(), dk.proxy.clone(), &msg, &[])
        .unwrap();
    let err = dk.safe_call(&mut app, &dk.rng, &commit_msg(1)).unwrap_err();
    assert_eq!(ContractError::Unauthorized, err.downcast().unwrap());
}

#[test]
fn proofs_do_not_bind_target_or_msg() {
    let mut app = App::default();
    let dk = deploy(&mut app);
    let relayer = app.api().addr_make("relayer");

    let key = SigningKey::from_slice(&[0x44; 32]).unwrap();
    let msg = dk_oracle_proxy::msg::ExecuteMsg::AddController {
        address: key_address(app.api(), &key).to_string(),
    };
    app.execute_contract(dk.manager.clone(), dk.proxy.clone(), &msg, &[])
        .unwrap();

    // Signed with a commit in mind, relayed to the distributor instead
    let now = app.block_info().time.seconds();
    let proof = sign_proof(&key, [3u8; 24], now + 30);
    let campaign = dk_distributor::msg::ExecuteMsg::NewCampaign {
        phase: 7,
        soft_cap: 10,
        deadline: None,
        generation: 0,
        distribution: vec![HexBinary::from_hex(
            "00000000000000000000000000000001000000000000000100000000000003e8",
        )
        .unwrap()],
    };
    let msg = dk_oracle_proxy::msg::ExecuteMsg::SafeCallWithProof {
        proof,
        target: dk.distributor.to_string(),
        msg: to_json_binary(&campaign).unwrap(),
    };
    app.execute_contract(relayer, dk.proxy.clone(), &msg, &[])
        .unwrap();

    let resp: dk_distributor::msg::CampaignResponse = app
        .wrap()
        .query_wasm_smart(
            &dk.distributor,
            &dk_distributor::msg::QueryMsg::Campaign { phase: 7 },
        )
        .unwrap();
    assert!(resp.campaign.is_some());

    let progress: dk_rng::msg::ProgressResponse = app
        .wrap()
        .query_wasm_smart(&dk.rng, &dk_rng::msg::QueryMsg::Progress {})
        .unwrap();
    assert_eq!(progress.committed, 0);
}
