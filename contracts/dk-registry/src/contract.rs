use cosmwasm_std::{
    ensure_eq, to_json_binary, Addr, Deps, DepsMut, Empty, Env, MessageInfo, QueryResponse,
    Response, StdResult, Storage,
};
#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use dkdao::validate_record_part;

use crate::error::ContractError;
use crate::msg::{
    AddressResponse, ExecuteMsg, InstantiateMsg, IsExistRecordResponse, OwnerResponse, QueryMsg,
    RecordResponse,
};
use crate::state::{OWNER, RECORDS, REVERSE_RECORDS};

const CONTRACT_NAME: &str = "crates.io:dk-registry";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender,
    };
    OWNER.save(deps.storage, &owner)?;
    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", owner))
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
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Set {
            domain,
            name,
            address,
        } => execute_set(deps, info, domain, name, address),
        ExecuteMsg::BatchSet {
            domains,
            names,
            addresses,
        } => execute_batch_set(deps, info, domains, names, addresses),
        ExecuteMsg::TransferOwnership { owner } => execute_transfer_ownership(deps, info, owner),
    }
}

fn execute_set(
    deps: DepsMut,
    info: MessageInfo,
    domain: String,
    name: String,
    address: String,
) -> Result<Response, ContractError> {
    ensure_eq!(
        info.sender,
        OWNER.load(deps.storage)?,
        ContractError::Unauthorized
    );
    let address = deps.api.addr_validate(&address)?;
    set_record(deps.storage, &domain, &name, &address)?;

    Ok(Response::new()
        .add_attribute("action", "set")
        .add_attribute("domain", domain)
        .add_attribute("name", name)
        .add_attribute("address", address))
}

fn execute_batch_set(
    deps: DepsMut,
    info: MessageInfo,
    domains: Vec<String>,
    names: Vec<String>,
    addresses: Vec<String>,
) -> Result<Response, ContractError> {
    ensure_eq!(
        info.sender,
        OWNER.load(deps.storage)?,
        ContractError::Unauthorized
    );
    if domains.len() != names.len() || names.len() != addresses.len() {
        return Err(ContractError::LengthMismatch);
    }

    for ((domain, name), address) in domains.iter().zip(names.iter()).zip(addresses.iter()) {
        let address = deps.api.addr_validate(address)?;
        set_record(deps.storage, domain, name, &address)?;
    }

    Ok(Response::new()
        .add_attribute("action", "batch_set")
        .add_attribute("count", domains.len().to_string()))
}

fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
) -> Result<Response, ContractError> {
    ensure_eq!(
        info.sender,
        OWNER.load(deps.storage)?,
        ContractError::Unauthorized
    );
    let owner = deps.api.addr_validate(&owner)?;
    OWNER.save(deps.storage, &owner)?;
    Ok(Response::new()
        .add_attribute("action", "transfer_ownership")
        .add_attribute("owner", owner))
}

fn set_record(
    storage: &mut dyn Storage,
    domain: &str,
    name: &str,
    address: &Addr,
) -> Result<(), ContractError> {
    validate_record_part(domain)?;
    validate_record_part(name)?;

    // Drop the reverse entry of a replaced address if it still points here
    if let Some(previous) = RECORDS.may_load(storage, (domain, name))? {
        if let Some((d, n)) = REVERSE_RECORDS.may_load(storage, &previous)? {
            if d == domain && n == name {
                REVERSE_RECORDS.remove(storage, &previous);
            }
        }
    }

    RECORDS.save(storage, (domain, name), address)?;
    REVERSE_RECORDS.save(storage, address, &(domain.to_string(), name.to_string()))?;
    Ok(())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<QueryResponse> {
    let response = match msg {
        QueryMsg::GetAddress { domain, name } => {
            to_json_binary(&query_get_address(deps, domain, name)?)?
        }
        QueryMsg::IsExistRecord { domain, name } => {
            to_json_binary(&query_is_exist_record(deps, domain, name)?)?
        }
        QueryMsg::GetDomainAndName { address } => {
            to_json_binary(&query_get_domain_and_name(deps, address)?)?
        }
        QueryMsg::Owner {} => to_json_binary(&OwnerResponse {
            owner: OWNER.load(deps.storage)?,
        })?,
    };
    Ok(response)
}

fn query_get_address(deps: Deps, domain: String, name: String) -> StdResult<AddressResponse> {
    let address = RECORDS.may_load(deps.storage, (domain.as_str(), name.as_str()))?;
    Ok(AddressResponse { address })
}

fn query_is_exist_record(
    deps: Deps,
    domain: String,
    name: String,
) -> StdResult<IsExistRecordResponse> {
    let exists = RECORDS.has(deps.storage, (domain.as_str(), name.as_str()));
    Ok(IsExistRecordResponse { exists })
}

fn query_get_domain_and_name(deps: Deps, address: String) -> StdResult<RecordResponse> {
    let address = deps.api.addr_validate(&address)?;
    let record = REVERSE_RECORDS.may_load(deps.storage, &address)?;
    Ok(RecordResponse { record })
}
