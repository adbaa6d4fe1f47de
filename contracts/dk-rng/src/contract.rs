use cosmwasm_std::{
    ensure, to_json_binary, Attribute, Binary, Deps, DepsMut, Empty, Env, Event, HexBinary,
    MessageInfo, Order, QueryResponse, Reply, Response, StdError, StdResult, SubMsg, SubMsgResult,
    WasmMsg,
};
#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use dkdao::{
    keccak256, query_registered_address, to_bytes32_array, RngCallback, RngReceiverExecuteMsg,
    DIGEST_LEN, NAME_ORACLE,
};

use crate::attributes::{
    ATTR_ACTION, ATTR_CALLBACK_ERROR_MSG, ATTR_CALLBACK_SUCCESS, ATTR_CONSUMER, ATTR_COUNT,
    ATTR_DIGEST, ATTR_INDEX, ATTR_SECRET, EVENT_TYPE_CALLBACK,
};
use crate::error::ContractError;
use crate::msg::{
    CommitmentResponse, CommitmentsResponse, ConfigResponse, ExecuteMsg, InstantiateMsg,
    ProgressResponse, QueriedCommitment, QueryMsg,
};
use crate::state::{
    commitments, load_progress, push_commitment, Config, RevealInfo, COMMITMENTS, CONFIG,
    PROGRESS,
};

const CONTRACT_NAME: &str = "crates.io:dk-rng";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CALLBACK_ID: u64 = 456;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    let InstantiateMsg {
        registry,
        domain,
        callback_gas_limit,
    } = msg;
    ensure!(callback_gas_limit > 0, ContractError::ZeroCallbackGasLimit);
    let config = Config {
        registry: deps.api.addr_validate(&registry)?,
        domain,
        callback_gas_limit,
    };
    CONFIG.save(deps.storage, &config)?;
    PROGRESS.save(deps.storage, &Default::default())?;

    Ok(Response::new()
        .add_attribute(ATTR_ACTION, "instantiate")
        .add_attribute("registry", config.registry)
        .add_attribute("domain", config.domain))
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
    let config = CONFIG.load(deps.storage)?;
    only_oracle(deps.as_ref(), &config, &info)?;

    match msg {
        ExecuteMsg::Commit { digest } => execute_commit(deps, env, digest),
        ExecuteMsg::BatchCommit { digests } => execute_batch_commit(deps, env, digests),
        ExecuteMsg::Reveal {
            secret,
            consumer,
            context,
        } => execute_reveal(deps, env, config, secret, consumer, context),
    }
}

/// The sender must be the address registered as oracle in the configured domain
fn only_oracle(deps: Deps, config: &Config, info: &MessageInfo) -> Result<(), ContractError> {
    let oracle =
        query_registered_address(&deps.querier, &config.registry, &config.domain, NAME_ORACLE)?
            .ok_or(ContractError::OracleNotRegistered)?;
    ensure!(info.sender == oracle, ContractError::Unauthorized);
    Ok(())
}

fn execute_commit(deps: DepsMut, env: Env, digest: HexBinary) -> Result<Response, ContractError> {
    let digest: [u8; DIGEST_LEN] = digest
        .to_array()
        .map_err(|_| ContractError::InvalidDigest)?;
    let index = push_commitment(deps.storage, digest, env.block.time, env.block.height)?;

    Ok(Response::new()
        .add_attribute(ATTR_ACTION, "commit")
        .add_attribute(ATTR_INDEX, index.to_string())
        .add_attribute(ATTR_DIGEST, HexBinary::from(digest).to_hex()))
}

fn execute_batch_commit(
    deps: DepsMut,
    env: Env,
    digests: HexBinary,
) -> Result<Response, ContractError> {
    let digests = to_bytes32_array(digests.as_slice()).map_err(|_| ContractError::InvalidDigest)?;
    ensure!(!digests.is_empty(), ContractError::EmptyBatch);

    let mut first_index = None;
    for digest in &digests {
        let index = push_commitment(deps.storage, *digest, env.block.time, env.block.height)?;
        first_index.get_or_insert(index);
    }

    Ok(Response::new()
        .add_attribute(ATTR_ACTION, "batch_commit")
        .add_attribute(ATTR_INDEX, first_index.unwrap_or_default().to_string())
        .add_attribute(ATTR_COUNT, digests.len().to_string()))
}

fn execute_reveal(
    deps: DepsMut,
    env: Env,
    config: Config,
    secret: HexBinary,
    consumer: String,
    context: Option<Binary>,
) -> Result<Response, ContractError> {
    let mut progress = load_progress(deps.storage)?;
    ensure!(progress.remaining() > 0, ContractError::NothingToReveal);
    let secret: [u8; 32] = secret
        .to_array()
        .map_err(|_| ContractError::InvalidSecret)?;
    let consumer = deps.api.addr_validate(&consumer)?;

    // Commitments are consumed strictly in commit order
    let index = progress.revealed;
    let mut commitment = COMMITMENTS.load(deps.storage, index)?;
    ensure!(
        keccak256(&secret) == commitment.digest.as_slice(),
        ContractError::DigestMismatch { index }
    );

    commitment.reveal = Some(RevealInfo {
        secret: HexBinary::from(secret),
        revealed: env.block.time,
        consumer: consumer.clone(),
    });
    COMMITMENTS.save(deps.storage, index, &commitment)?;
    progress.revealed += 1;
    PROGRESS.save(deps.storage, &progress)?;

    let callback = RngCallback {
        index,
        secret: HexBinary::from(secret),
        context: context.unwrap_or_default(),
    };
    // A failing consumer must not undo the reveal. The randomness is spent either way.
    let msg = SubMsg::reply_on_error(
        WasmMsg::Execute {
            contract_addr: consumer.to_string(),
            msg: to_json_binary(&RngReceiverExecuteMsg::RngReceive { callback })?,
            funds: vec![],
        },
        CALLBACK_ID,
    )
    .with_gas_limit(config.callback_gas_limit);

    Ok(Response::new()
        .add_submessage(msg)
        .add_attribute(ATTR_ACTION, "reveal")
        .add_attribute(ATTR_INDEX, index.to_string())
        .add_attribute(ATTR_SECRET, HexBinary::from(secret).to_hex())
        .add_attribute(ATTR_CONSUMER, consumer))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, reply: Reply) -> StdResult<Response> {
    match reply.id {
        CALLBACK_ID => {
            let mut attributes = vec![];
            match reply.result {
                SubMsgResult::Ok(_) => {
                    attributes.push(Attribute::new(ATTR_CALLBACK_SUCCESS, "true"))
                }
                SubMsgResult::Err(err) => {
                    attributes.push(Attribute::new(ATTR_CALLBACK_SUCCESS, "false"));
                    attributes.push(Attribute::new(ATTR_CALLBACK_ERROR_MSG, err));
                }
            };
            let callback_event = Event::new(EVENT_TYPE_CALLBACK).add_attributes(attributes);
            Ok(Response::new().add_event(callback_event))
        }
        _ => Err(StdError::generic_err("invalid reply id or result")),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<QueryResponse> {
    let response = match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?)?,
        QueryMsg::Progress {} => to_json_binary(&query_progress(deps)?)?,
        QueryMsg::Commitment { index } => to_json_binary(&query_commitment(deps, index)?)?,
        QueryMsg::CommitmentsAsc { start_after, limit } => to_json_binary(&query_commitments(
            deps,
            start_after,
            limit,
            Order::Ascending,
        )?)?,
        QueryMsg::CommitmentsDesc { start_after, limit } => to_json_binary(&query_commitments(
            deps,
            start_after,
            limit,
            Order::Descending,
        )?)?,
    };
    Ok(response)
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    CONFIG.load(deps.storage)
}

fn query_progress(deps: Deps) -> StdResult<ProgressResponse> {
    load_progress(deps.storage)
}

fn query_commitment(deps: Deps, index: u64) -> StdResult<CommitmentResponse> {
    let commitment = COMMITMENTS
        .may_load(deps.storage, index)?
        .map(|stored| QueriedCommitment::make(index, stored));
    Ok(CommitmentResponse { commitment })
}

fn query_commitments(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
    order: Order,
) -> StdResult<CommitmentsResponse> {
    let limit: usize = limit.unwrap_or(100) as usize;
    let commitments = commitments(deps.storage, start_after, limit, order)?
        .into_iter()
        .map(|(index, stored)| QueriedCommitment::make(index, stored))
        .collect();
    Ok(CommitmentsResponse { commitments })
}
