use cosmwasm_std::{Decimal, HexBinary};
use cw_multi_test::{App, Executor};
use dk_digest::build_digest_batch_with;
use dk_distributor::jobs::DistributorJob;
use dk_multitest::{deploy, first_attr};
use rand::{rngs::StdRng, SeedableRng};

const STANDARD_ROWS: [&str; 6] = [
    "00000000000000000000000000000001000000000000000600000000000009c4",
    "000000000000000000000000000000020000000100000005000009c400006b6c",
    "00000000000000000000000000000003000000030000000400006b6c00043bfc",
    "00000000000000000000000000000004000000060000000300043bfc000fadac",
    "000000000000000000000000000000050000000a00000002000fadac0026910c",
    "000000000000000000000000000000050000000f000000010026910c004c4b40",
];

#[test]
fn boxes_are_opened_with_revealed_randomness() {
    let mut app = App::default();
    let dk = deploy(&mut app);
    let alice = app.api().addr_make("alice");

    // Operator commits a batch of digests through the proxy
    let mut rng = StdRng::seed_from_u64(1);
    let batch = build_digest_batch_with(&mut rng, 3, 1_700_000_000_000);
    let resp = dk.safe_call(&mut app, &dk.rng, &batch.commit_msg()).unwrap();
    let wasm = resp
        .events
        .iter()
        .find(|ev| ev.ty == "wasm" && ev.attributes.iter().any(|a| a.value == "batch_commit"))
        .unwrap();
    assert_eq!(first_attr(&wasm.attributes, "count").unwrap(), "3");

    let progress: dk_rng::msg::ProgressResponse = app
        .wrap()
        .query_wasm_smart(&dk.rng, &dk_rng::msg::QueryMsg::Progress {})
        .unwrap();
    assert_eq!(progress.committed, 3);
    assert_eq!(progress.revealed, 0);

    // Campaign and boxes
    let msg = dk_distributor::msg::ExecuteMsg::NewCampaign {
        phase: 1,
        soft_cap: 20,
        deadline: None,
        generation: 0,
        distribution: STANDARD_ROWS
            .iter()
            .map(|row| HexBinary::from_hex(row).unwrap())
            .collect(),
    };
    dk.safe_call(&mut app, &dk.distributor, &msg).unwrap();
    let msg = dk_distributor::msg::ExecuteMsg::MintBoxes {
        owner: alice.to_string(),
        number: 10,
        phase: 1,
    };
    dk.safe_call(&mut app, &dk.distributor, &msg).unwrap();

    // Alice asks to open two of them
    let msg = dk_distributor::msg::ExecuteMsg::OpenBoxes { boxes: vec![2, 5] };
    app.execute_contract(alice.clone(), dk.distributor.clone(), &msg, &[])
        .unwrap();

    // Oracle reveals the first secret for that request
    let job = DistributorJob::OpenBoxes { request_id: 1 };
    let reveal = batch
        .get(0)
        .unwrap()
        .reveal_msg(dk.distributor.to_string(), Some(job.to_context().unwrap()));
    let resp = dk.safe_call(&mut app, &dk.rng, &reveal).unwrap();

    let callback = resp
        .events
        .iter()
        .find(|ev| ev.ty == "wasm-rng-callback");
    assert!(callback.is_none(), "callback must not report an error");
    let issued = resp
        .events
        .iter()
        .filter(|ev| ev.ty == "wasm-card_issued")
        .count();
    assert_eq!(issued, 10);

    let cards: dk_distributor::msg::IdsResponse = app
        .wrap()
        .query_wasm_smart(
            &dk.distributor,
            &dk_distributor::msg::QueryMsg::CardsOf {
                owner: alice.to_string(),
                start_after: None,
                limit: None,
            },
        )
        .unwrap();
    assert_eq!(cards.ids.len(), 10);

    let card_box: dk_distributor::msg::BoxResponse = app
        .wrap()
        .query_wasm_smart(
            &dk.distributor,
            &dk_distributor::msg::QueryMsg::Box { id: 5 },
        )
        .unwrap();
    assert_eq!(
        card_box.card_box.unwrap().status,
        dk_distributor::state::BoxStatus::Opened
    );

    let commitment: dk_rng::msg::CommitmentResponse = app
        .wrap()
        .query_wasm_smart(&dk.rng, &dk_rng::msg::QueryMsg::Commitment { index: 0 })
        .unwrap();
    let commitment = commitment.commitment.unwrap();
    assert_eq!(
        commitment.secret,
        Some(HexBinary::from(batch.get(0).unwrap().secret))
    );
    assert_eq!(commitment.consumer, Some(dk.distributor.clone()));

    // Second secret upgrades one of the new cards with certainty
    let job = DistributorJob::UpgradeCard {
        card_id: cards.ids[0],
        success_rate: Decimal::one(),
    };
    let reveal = batch
        .get(1)
        .unwrap()
        .reveal_msg(dk.distributor.to_string(), Some(job.to_context().unwrap()));
    let resp = dk.safe_call(&mut app, &dk.rng, &reveal).unwrap();
    assert!(resp.events.iter().any(|ev| ev.ty == "wasm-card_upgraded"));

    let card: dk_distributor::msg::CardResponse = app
        .wrap()
        .query_wasm_smart(
            &dk.distributor,
            &dk_distributor::msg::QueryMsg::Card { id: cards.ids[0] },
        )
        .unwrap();
    assert_eq!(card.card.unwrap().level, 1);

    let progress: dk_rng::msg::ProgressResponse = app
        .wrap()
        .query_wasm_smart(&dk.rng, &dk_rng::msg::QueryMsg::Progress {})
        .unwrap();
    assert_eq!(progress.committed, 3);
    assert_eq!(progress.revealed, 2);
}

#[test]
fn distributor_only_trusts_registered_rng() {
    let mut app = App::default();
    let dk = deploy(&mut app);
    let mallory = app.api().addr_make("mallory");

    let msg = dk_distributor::msg::ExecuteMsg::RngReceive {
        callback: dk_distributor::msg::RngCallback {
            index: 0,
            secret: HexBinary::from([0xff; 32]),
            context: DistributorJob::OpenBoxes { request_id: 1 }
                .to_context()
                .unwrap(),
        },
    };
    let err = app
        .execute_contract(mallory, dk.distributor.clone(), &msg, &[])
        .unwrap_err();
    assert_eq!(
        dk_distributor::error::ContractError::UnauthorizedReceive,
        err.downcast().unwrap()
    );

    // Not even the oracle can skip the RNG
    let err = dk.safe_call(&mut app, &dk.distributor, &msg).unwrap_err();
    match err.downcast().unwrap() {
        dk_oracle_proxy::error::ContractError::ForwardedCallReverted { reason } => {
            assert!(
                reason.contains("Sender is not the registered RNG contract"),
                "{reason}"
            )
        }
        err => panic!("Unexpected error: {err:?}"),
    }
}
