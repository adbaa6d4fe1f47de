// Testing utils. See tests folder for actual tests.

use cosmwasm_std::{to_json_binary, Addr, Api, Attribute, CanonicalAddr, HexBinary};
use cw_multi_test::error::AnyResult;
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};
use dkdao::{
    eth_address, Proof, ProofMessage, DOMAIN_DUELIST_KING, DOMAIN_INFRASTRUCTURE, NAME_DISTRIBUTOR,
    NAME_ORACLE, NAME_RNG, NONCE_LEN, SIGNATURE_LEN,
};
use k256::ecdsa::SigningKey;

pub const CALLBACK_GAS_LIMIT: u64 = 500_000;

/// Gets the value of the first attribute with the given key
pub fn first_attr(data: impl AsRef<[Attribute]>, search_key: &str) -> Option<String> {
    data.as_ref().iter().find_map(|a| {
        if a.key == search_key {
            Some(a.value.clone())
        } else {
            None
        }
    })
}

/// The chain address of a secp256k1 key, i.e. the last 20 bytes of the
/// keccak256 of the uncompressed public key
pub fn key_address(api: &dyn Api, key: &SigningKey) -> Addr {
    let pubkey = key.verifying_key().to_encoded_point(false);
    let account = eth_address(pubkey.as_bytes()).unwrap();
    api.addr_humanize(&CanonicalAddr::from(account.as_slice()))
        .unwrap()
}

/// Signs a proof as a controller would do off chain
pub fn sign_proof(key: &SigningKey, nonce: [u8; NONCE_LEN], expiry: u64) -> HexBinary {
    let message = ProofMessage::new(nonce, expiry);
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(&message.signing_hash())
        .unwrap();
    let mut sig = [0u8; SIGNATURE_LEN];
    sig[..64].copy_from_slice(&signature.to_bytes());
    sig[64] = recovery_id.to_byte() + 27;
    HexBinary::from(Proof::new(sig, message).to_vec())
}

/// Addresses of a full deployment
pub struct Deployment {
    pub owner: Addr,
    pub manager: Addr,
    /// Controller of the proxy that signs transactions directly
    pub operator: Addr,
    pub registry: Addr,
    pub proxy: Addr,
    pub rng: Addr,
    pub distributor: Addr,
}

impl Deployment {
    /// Executes `msg` on `target` through the proxy, sent by the operator
    pub fn safe_call<T: serde::Serialize>(
        &self,
        app: &mut App,
        target: &Addr,
        msg: &T,
    ) -> AnyResult<AppResponse> {
        let msg = dk_oracle_proxy::msg::ExecuteMsg::SafeCall {
            target: target.to_string(),
            msg: to_json_binary(msg).unwrap(),
        };
        app.execute_contract(self.operator.clone(), self.proxy.clone(), &msg, &[])
    }
}

/// Stores and instantiates registry, proxy, RNG and distributor and
/// wires them up in the registry.
pub fn deploy(app: &mut App) -> Deployment {
    let owner = app.api().addr_make("owner");
    let manager = app.api().addr_make("manager");
    let operator = app.api().addr_make("operator");

    let code_registry = ContractWrapper::new(
        dk_registry::contract::execute,
        dk_registry::contract::instantiate,
        dk_registry::contract::query,
    );
    let code_id_registry = app.store_code(Box::new(code_registry));
    let registry = app
        .instantiate_contract(
            code_id_registry,
            owner.clone(),
            &dk_registry::msg::InstantiateMsg { owner: None },
            &[],
            "Registry",
            None,
        )
        .unwrap();

    let code_proxy = ContractWrapper::new(
        dk_oracle_proxy::contract::execute,
        dk_oracle_proxy::contract::instantiate,
        dk_oracle_proxy::contract::query,
    )
    .with_reply(dk_oracle_proxy::contract::reply);
    let code_id_proxy = app.store_code(Box::new(code_proxy));
    let proxy = app
        .instantiate_contract(
            code_id_proxy,
            owner.clone(),
            &dk_oracle_proxy::msg::InstantiateMsg {
                manager: manager.to_string(),
                controllers: Some(vec![operator.to_string()]),
                proof_lifetime: None,
            },
            &[],
            "Oracle-Proxy",
            None,
        )
        .unwrap();

    let code_rng = ContractWrapper::new(
        dk_rng::contract::execute,
        dk_rng::contract::instantiate,
        dk_rng::contract::query,
    )
    .with_reply(dk_rng::contract::reply);
    let code_id_rng = app.store_code(Box::new(code_rng));
    let rng = app
        .instantiate_contract(
            code_id_rng,
            owner.clone(),
            &dk_rng::msg::InstantiateMsg {
                registry: registry.to_string(),
                domain: DOMAIN_INFRASTRUCTURE.to_string(),
                callback_gas_limit: CALLBACK_GAS_LIMIT,
            },
            &[],
            "RNG",
            None,
        )
        .unwrap();

    let code_distributor = ContractWrapper::new(
        dk_distributor::contract::execute,
        dk_distributor::contract::instantiate,
        dk_distributor::contract::query,
    );
    let code_id_distributor = app.store_code(Box::new(code_distributor));
    let distributor = app
        .instantiate_contract(
            code_id_distributor,
            owner.clone(),
            &dk_distributor::msg::InstantiateMsg {
                registry: registry.to_string(),
                domain: DOMAIN_DUELIST_KING.to_string(),
            },
            &[],
            "Distributor",
            None,
        )
        .unwrap();

    let records = [
        (DOMAIN_INFRASTRUCTURE, NAME_ORACLE, &proxy),
        (DOMAIN_INFRASTRUCTURE, NAME_RNG, &rng),
        (DOMAIN_DUELIST_KING, NAME_ORACLE, &proxy),
        (DOMAIN_DUELIST_KING, NAME_DISTRIBUTOR, &distributor),
    ];
    let msg = dk_registry::msg::ExecuteMsg::BatchSet {
        domains: records.iter().map(|r| r.0.to_string()).collect(),
        names: records.iter().map(|r| r.1.to_string()).collect(),
        addresses: records.iter().map(|r| r.2.to_string()).collect(),
    };
    app.execute_contract(owner.clone(), registry.clone(), &msg, &[])
        .unwrap();

    Deployment {
        owner,
        manager,
        operator,
        registry,
        proxy,
        rng,
        distributor,
    }
}
