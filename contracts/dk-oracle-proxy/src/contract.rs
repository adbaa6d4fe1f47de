use cosmwasm_std::{
    ensure, ensure_eq, to_json_binary, Addr, Binary, Coin, Deps, DepsMut, Empty, Env, HexBinary,
    MessageInfo, Order, QueryResponse, Reply, Response, StdError, StdResult, SubMsg, SubMsgResult,
    WasmMsg,
};
#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cw_storage_plus::Bound;
use dkdao::{Proof, ProofMessage, NONCE_LEN};

use crate::attributes::{
    ATTR_ACTION, ATTR_CONTROLLER, ATTR_PROOF_MESSAGE, ATTR_PRUNED_NONCES, ATTR_TARGET,
};
use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, ControllersResponse, ExecuteMsg, InstantiateMsg, IsControllerResponse,
    IsNonceUsedResponse, ProofMessageResponse, QueryMsg,
};
use crate::proof::{check_expiry, recover_signer};
use crate::state::{
    is_nonce_used, mark_nonce_used, prune_expired_nonces, Config, CONFIG, CONTROLLERS,
};

const CONTRACT_NAME: &str = "crates.io:dk-oracle-proxy";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const FORWARD_ID: u64 = 457;

pub const DEFAULT_PROOF_LIFETIME: u64 = 60;

/// Upper bound of expired nonces removed per proof call to keep gas usage flat
const MAX_PRUNE_PER_CALL: usize = 10;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    let InstantiateMsg {
        manager,
        controllers,
        proof_lifetime,
    } = msg;
    let proof_lifetime = proof_lifetime.unwrap_or(DEFAULT_PROOF_LIFETIME);
    ensure!(proof_lifetime > 0, ContractError::ZeroProofLifetime);

    let config = Config {
        manager: deps.api.addr_validate(&manager)?,
        proof_lifetime,
    };
    CONFIG.save(deps.storage, &config)?;

    for controller in controllers.unwrap_or_default() {
        let addr = deps.api.addr_validate(&controller)?;
        CONTROLLERS.save(deps.storage, &addr, &())?;
    }

    Ok(Response::new()
        .add_attribute(ATTR_ACTION, "instantiate")
        .add_attribute("manager", config.manager))
}

// No state changes expected
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: Empty) -> StdResult<Response> {
    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::AddController { address } => execute_add_controller(deps, info, address),
        ExecuteMsg::RemoveController { address } => {
            execute_remove_controller(deps, info, address)
        }
        ExecuteMsg::SafeCall { target, msg } => execute_safe_call(deps, info, target, msg),
        ExecuteMsg::SafeCallWithProof { proof, target, msg } => {
            execute_safe_call_with_proof(deps, env, info, proof, target, msg)
        }
        ExecuteMsg::SetConfig {
            manager,
            proof_lifetime,
        } => execute_set_config(deps, info, manager, proof_lifetime),
    }
}

fn execute_add_controller(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_eq!(info.sender, config.manager, ContractError::Unauthorized);

    let addr = deps.api.addr_validate(&address)?;
    if !CONTROLLERS.has(deps.storage, &addr) {
        CONTROLLERS.save(deps.storage, &addr, &())?;
    }

    Ok(Response::new()
        .add_attribute(ATTR_ACTION, "add_controller")
        .add_attribute(ATTR_CONTROLLER, addr))
}

fn execute_remove_controller(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_eq!(info.sender, config.manager, ContractError::Unauthorized);

    let addr = deps.api.addr_validate(&address)?;
    if CONTROLLERS.has(deps.storage, &addr) {
        CONTROLLERS.remove(deps.storage, &addr);
    }

    Ok(Response::new()
        .add_attribute(ATTR_ACTION, "remove_controller")
        .add_attribute(ATTR_CONTROLLER, addr))
}

fn execute_safe_call(
    deps: DepsMut,
    info: MessageInfo,
    target: String,
    msg: Binary,
) -> Result<Response, ContractError> {
    ensure!(
        CONTROLLERS.has(deps.storage, &info.sender),
        ContractError::Unauthorized
    );
    let target = deps.api.addr_validate(&target)?;

    Ok(forward(target, msg, info.funds)
        .add_attribute(ATTR_ACTION, "safe_call")
        .add_attribute(ATTR_CONTROLLER, info.sender))
}

fn execute_safe_call_with_proof(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    proof: HexBinary,
    target: String,
    msg: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let proof = Proof::from_slice(proof.as_slice()).map_err(|_| ContractError::InvalidProof)?;
    let now = env.block.time.seconds();
    check_expiry(&proof, now, config.proof_lifetime)?;

    let controller = recover_signer(deps.api, &proof)?;
    ensure!(
        CONTROLLERS.has(deps.storage, &controller),
        ContractError::Unauthorized
    );

    let message = proof.message.to_bytes();
    ensure!(
        !is_nonce_used(deps.storage, &message),
        ContractError::NonceAlreadyUsed
    );
    let pruned = prune_expired_nonces(deps.storage, now, MAX_PRUNE_PER_CALL)?;
    mark_nonce_used(deps.storage, &message, proof.message.expiry)?;

    let target = deps.api.addr_validate(&target)?;
    Ok(forward(target, msg, info.funds)
        .add_attribute(ATTR_ACTION, "safe_call_with_proof")
        .add_attribute(ATTR_CONTROLLER, controller)
        .add_attribute(ATTR_PROOF_MESSAGE, HexBinary::from(message).to_hex())
        .add_attribute(ATTR_PRUNED_NONCES, pruned.to_string()))
}

/// Executes `msg` on `target` with this contract as the sender.
/// A failure of the target is turned into [`ContractError::ForwardedCallReverted`] in `reply`.
fn forward(target: Addr, msg: Binary, funds: Vec<Coin>) -> Response {
    let sub_msg = SubMsg::reply_on_error(
        WasmMsg::Execute {
            contract_addr: target.to_string(),
            msg,
            funds,
        },
        FORWARD_ID,
    );
    Response::new()
        .add_submessage(sub_msg)
        .add_attribute(ATTR_TARGET, target)
}

fn execute_set_config(
    deps: DepsMut,
    info: MessageInfo,
    manager: Option<String>,
    proof_lifetime: Option<u64>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_eq!(info.sender, config.manager, ContractError::Unauthorized);

    if let Some(manager) = manager {
        config.manager = deps.api.addr_validate(&manager)?;
    }
    if let Some(proof_lifetime) = proof_lifetime {
        ensure!(proof_lifetime > 0, ContractError::ZeroProofLifetime);
        config.proof_lifetime = proof_lifetime;
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute(ATTR_ACTION, "set_config"))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, reply: Reply) -> Result<Response, ContractError> {
    match reply.id {
        FORWARD_ID => match reply.result {
            // Not reached for reply_on_error
            SubMsgResult::Ok(_) => Ok(Response::new()),
            SubMsgResult::Err(reason) => Err(ContractError::ForwardedCallReverted { reason }),
        },
        _ => Err(StdError::generic_err("invalid reply id or result").into()),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<QueryResponse> {
    let response = match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?)?,
        QueryMsg::IsController { address } => {
            to_json_binary(&query_is_controller(deps, address)?)?
        }
        QueryMsg::Controllers { start_after, limit } => {
            to_json_binary(&query_controllers(deps, start_after, limit)?)?
        }
        QueryMsg::IsNonceUsed { message } => to_json_binary(&IsNonceUsedResponse {
            used: is_nonce_used(deps.storage, message.as_slice()),
        })?,
        QueryMsg::ProofMessage { nonce } => {
            to_json_binary(&query_proof_message(deps, env, nonce)?)?
        }
    };
    Ok(response)
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    CONFIG.load(deps.storage)
}

fn query_is_controller(deps: Deps, address: String) -> StdResult<IsControllerResponse> {
    let addr = deps.api.addr_validate(&address)?;
    Ok(IsControllerResponse {
        is_controller: CONTROLLERS.has(deps.storage, &addr),
    })
}

fn query_controllers(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<ControllersResponse> {
    let limit: usize = limit.unwrap_or(100) as usize;
    let start_after = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let controllers = CONTROLLERS
        .keys(
            deps.storage,
            start_after.as_ref().map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .take(limit)
        .collect::<StdResult<Vec<Addr>>>()?;
    Ok(ControllersResponse { controllers })
}

fn query_proof_message(deps: Deps, env: Env, nonce: HexBinary) -> StdResult<ProofMessageResponse> {
    let nonce: [u8; NONCE_LEN] = nonce
        .to_array()
        .map_err(|_| StdError::generic_err(ContractError::InvalidNonceLength.to_string()))?;
    let config = CONFIG.load(deps.storage)?;
    let expiry = env.block.time.seconds() + config.proof_lifetime;
    let message = ProofMessage::new(nonce, expiry);
    Ok(ProofMessageResponse {
        message: HexBinary::from(message.to_bytes()),
        expiry,
    })
}
