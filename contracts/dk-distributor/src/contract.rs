use cosmwasm_std::{
    ensure, ensure_eq, from_json, to_json_binary, Addr, Decimal, Deps, DepsMut, Empty, Env, Event,
    HexBinary, MessageInfo, QueryResponse, Response, StdError, StdResult, Storage, Timestamp,
};
#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use dkdao::{query_registered_address, RngCallback, DOMAIN_INFRASTRUCTURE, NAME_ORACLE, NAME_RNG};
use nois::{random_decimal, sub_randomness};

use crate::attributes::{
    ATTR_ACTION, ATTR_BOX_ID, ATTR_CARD_ID, ATTR_DESIGN, ATTR_FIRST_BOX, ATTR_LAST_BOX,
    ATTR_LEVEL, ATTR_OPEN_REQUEST, ATTR_OWNER, ATTR_PHASE, ATTR_RARENESS, ATTR_RNG_INDEX,
    ATTR_ROLL, EVENT_TYPE_CARD_ISSUED, EVENT_TYPE_CARD_UPGRADED, EVENT_TYPE_CARD_UPGRADE_FAILED,
};
use crate::distribution::{draw_card, validate_distribution, RarityTier};
use crate::error::ContractError;
use crate::jobs::DistributorJob;
use crate::msg::{
    BoxResponse, CampaignResponse, CardResponse, ConfigResponse, ExecuteMsg, IdsResponse,
    InstantiateMsg, OpenRequestResponse, QueryMsg,
};
use crate::state::{
    boxes_of, cards_of, create_open_request, issue_card, mint_boxes, take_open_request,
    BoxStatus, Campaign, Card, Config, OpenRequest, BOXES, CAMPAIGNS, CARDS, CONFIG,
    OPEN_REQUESTS,
};

const CONTRACT_NAME: &str = "crates.io:dk-distributor";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CARDS_PER_BOX: usize = 5;
pub const MAX_BOXES_PER_MINT: u32 = 100;
/// Bounds the work of a single RNG callback
pub const MAX_BOXES_PER_OPEN: u32 = 20;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    let config = Config {
        registry: deps.api.addr_validate(&msg.registry)?,
        domain: msg.domain,
    };
    CONFIG.save(deps.storage, &config)?;

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
    match msg {
        ExecuteMsg::NewCampaign {
            phase,
            soft_cap,
            deadline,
            generation,
            distribution,
        } => execute_new_campaign(
            deps,
            info,
            phase,
            soft_cap,
            deadline,
            generation,
            distribution,
        ),
        ExecuteMsg::MintBoxes {
            owner,
            number,
            phase,
        } => execute_mint_boxes(deps, env, info, owner, number, phase),
        ExecuteMsg::OpenBoxes { boxes } => execute_open_boxes(deps, env, info, boxes),
        ExecuteMsg::RngReceive { callback } => execute_rng_receive(deps, info, callback),
    }
}

/// Looks up a registry record that must be set
fn registered(
    deps: Deps,
    config: &Config,
    domain: &str,
    name: &str,
) -> Result<Addr, ContractError> {
    query_registered_address(&deps.querier, &config.registry, domain, name)?.ok_or_else(|| {
        ContractError::RecordNotSet {
            domain: domain.to_string(),
            name: name.to_string(),
        }
    })
}

fn only_oracle(deps: Deps, info: &MessageInfo) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let oracle = registered(deps, &config, &config.domain, NAME_ORACLE)?;
    ensure_eq!(info.sender, oracle, ContractError::Unauthorized);
    Ok(())
}

fn execute_new_campaign(
    deps: DepsMut,
    info: MessageInfo,
    phase: u64,
    soft_cap: u64,
    deadline: Option<Timestamp>,
    generation: u32,
    distribution: Vec<HexBinary>,
) -> Result<Response, ContractError> {
    only_oracle(deps.as_ref(), &info)?;
    ensure!(
        !CAMPAIGNS.has(deps.storage, phase),
        ContractError::CampaignExists { phase }
    );

    let tiers = distribution
        .iter()
        .map(|word| RarityTier::from_word(word.as_slice()))
        .collect::<Result<Vec<_>, _>>()?;
    let total_weight = validate_distribution(&tiers)?;

    let campaign = Campaign {
        soft_cap,
        issued: 0,
        deadline,
        generation,
        distribution: tiers,
        total_weight,
    };
    CAMPAIGNS.save(deps.storage, phase, &campaign)?;

    Ok(Response::new()
        .add_attribute(ATTR_ACTION, "new_campaign")
        .add_attribute(ATTR_PHASE, phase.to_string())
        .add_attribute("total_weight", total_weight.to_string()))
}

fn execute_mint_boxes(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    owner: String,
    number: u32,
    phase: u64,
) -> Result<Response, ContractError> {
    only_oracle(deps.as_ref(), &info)?;
    ensure!(
        number > 0 && number <= MAX_BOXES_PER_MINT,
        ContractError::InvalidBoxNumber {
            max: MAX_BOXES_PER_MINT
        }
    );
    let owner = deps.api.addr_validate(&owner)?;

    let mut campaign = CAMPAIGNS
        .may_load(deps.storage, phase)?
        .ok_or(ContractError::CampaignNotFound { phase })?;
    if let Some(deadline) = campaign.deadline {
        ensure!(
            env.block.time <= deadline,
            ContractError::CampaignEnded { phase }
        );
    }
    ensure!(
        campaign.issued + u64::from(number) <= campaign.soft_cap,
        ContractError::CampaignSoldOut { phase }
    );
    campaign.issued += u64::from(number);
    CAMPAIGNS.save(deps.storage, phase, &campaign)?;

    let (first, last) = mint_boxes(deps.storage, &owner, phase, number)?;

    Ok(Response::new()
        .add_attribute(ATTR_ACTION, "mint_boxes")
        .add_attribute(ATTR_PHASE, phase.to_string())
        .add_attribute(ATTR_OWNER, owner)
        .add_attribute(ATTR_FIRST_BOX, first.to_string())
        .add_attribute(ATTR_LAST_BOX, last.to_string()))
}

fn execute_open_boxes(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    boxes: Vec<u64>,
) -> Result<Response, ContractError> {
    ensure!(
        !boxes.is_empty() && boxes.len() <= MAX_BOXES_PER_OPEN as usize,
        ContractError::InvalidBoxNumber {
            max: MAX_BOXES_PER_OPEN
        }
    );

    let request_id = create_open_request(
        deps.storage,
        &OpenRequest {
            owner: info.sender.clone(),
            boxes: boxes.clone(),
            created: env.block.time,
        },
    )?;

    for id in boxes {
        let mut card_box = BOXES
            .may_load(deps.storage, id)?
            .ok_or(ContractError::BoxNotFound { id })?;
        ensure_eq!(
            card_box.owner,
            info.sender,
            ContractError::NotBoxOwner { id }
        );
        // Also catches duplicates within this request
        ensure_eq!(
            card_box.status,
            BoxStatus::Sealed,
            ContractError::BoxNotSealed { id }
        );
        card_box.status = BoxStatus::Opening { request_id };
        BOXES.save(deps.storage, id, &card_box)?;
    }

    Ok(Response::new()
        .add_attribute(ATTR_ACTION, "open_boxes")
        .add_attribute(ATTR_OWNER, info.sender)
        .add_attribute(ATTR_OPEN_REQUEST, request_id.to_string()))
}

fn execute_rng_receive(
    deps: DepsMut,
    info: MessageInfo,
    callback: RngCallback,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    // Only the RNG may deliver randomness. Anyone else could pick favorable outcomes.
    let rng = registered(deps.as_ref(), &config, DOMAIN_INFRASTRUCTURE, NAME_RNG)?;
    ensure_eq!(info.sender, rng, ContractError::UnauthorizedReceive);

    let RngCallback {
        index,
        secret,
        context,
    } = callback;
    let randomness: [u8; 32] = secret
        .to_array()
        .map_err(|_| ContractError::InvalidRandomness)?;
    let job: DistributorJob = from_json(&context).map_err(|_| ContractError::InvalidContext)?;

    let response = match job {
        DistributorJob::OpenBoxes { request_id } => {
            fulfill_open_request(deps.storage, request_id, randomness)?
        }
        DistributorJob::UpgradeCard {
            card_id,
            success_rate,
        } => roll_upgrade(deps.storage, card_id, success_rate, randomness)?,
    };
    Ok(response
        .add_attribute(ATTR_ACTION, "rng_receive")
        .add_attribute(ATTR_RNG_INDEX, index.to_string()))
}

fn fulfill_open_request(
    storage: &mut dyn Storage,
    request_id: u64,
    randomness: [u8; 32],
) -> Result<Response, ContractError> {
    let request = take_open_request(storage, request_id)?
        .ok_or(ContractError::OpenRequestNotFound { id: request_id })?;

    let mut box_randomness = sub_randomness(randomness);
    let mut events = Vec::with_capacity(request.boxes.len() * CARDS_PER_BOX);
    for box_id in request.boxes {
        let mut card_box = BOXES.load(storage, box_id)?;
        let campaign = CAMPAIGNS.load(storage, card_box.phase)?;

        let mut card_randomness = sub_randomness(box_randomness.provide());
        for _ in 0..CARDS_PER_BOX {
            let draw = draw_card(
                &campaign.distribution,
                campaign.total_weight,
                card_randomness.provide(),
            )
            .ok_or_else(|| StdError::generic_err("Roll outside of distribution"))?;
            let card_id = issue_card(
                storage,
                &Card {
                    owner: request.owner.clone(),
                    phase: card_box.phase,
                    generation: campaign.generation,
                    rareness: draw.rareness,
                    design: draw.design,
                    level: 0,
                    box_id,
                },
            )?;
            events.push(
                Event::new(EVENT_TYPE_CARD_ISSUED)
                    .add_attribute(ATTR_BOX_ID, box_id.to_string())
                    .add_attribute(ATTR_CARD_ID, card_id.to_string())
                    .add_attribute(ATTR_RARENESS, draw.rareness.to_string())
                    .add_attribute(ATTR_DESIGN, draw.design.to_string()),
            );
        }

        card_box.status = BoxStatus::Opened;
        BOXES.save(storage, box_id, &card_box)?;
    }

    Ok(Response::new()
        .add_events(events)
        .add_attribute(ATTR_OPEN_REQUEST, request_id.to_string())
        .add_attribute(ATTR_OWNER, request.owner))
}

/// An unlucky roll is a regular outcome, not an error
fn roll_upgrade(
    storage: &mut dyn Storage,
    card_id: u64,
    success_rate: Decimal,
    randomness: [u8; 32],
) -> Result<Response, ContractError> {
    ensure!(
        !success_rate.is_zero() && success_rate <= Decimal::one(),
        ContractError::InvalidSuccessRate
    );
    let mut card = CARDS
        .may_load(storage, card_id)?
        .ok_or(ContractError::CardNotFound { id: card_id })?;

    let roll = random_decimal(randomness);
    let event = if roll < success_rate {
        card.level += 1;
        CARDS.save(storage, card_id, &card)?;
        Event::new(EVENT_TYPE_CARD_UPGRADED)
    } else {
        Event::new(EVENT_TYPE_CARD_UPGRADE_FAILED)
    };

    Ok(Response::new().add_event(
        event
            .add_attribute(ATTR_CARD_ID, card_id.to_string())
            .add_attribute(ATTR_LEVEL, card.level.to_string())
            .add_attribute(ATTR_ROLL, roll.to_string()),
    ))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<QueryResponse> {
    let response = match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?)?,
        QueryMsg::Campaign { phase } => to_json_binary(&CampaignResponse {
            campaign: CAMPAIGNS.may_load(deps.storage, phase)?,
        })?,
        QueryMsg::Box { id } => to_json_binary(&BoxResponse {
            card_box: BOXES.may_load(deps.storage, id)?,
        })?,
        QueryMsg::Card { id } => to_json_binary(&CardResponse {
            card: CARDS.may_load(deps.storage, id)?,
        })?,
        QueryMsg::OpenRequest { id } => to_json_binary(&OpenRequestResponse {
            request: OPEN_REQUESTS.may_load(deps.storage, id)?,
        })?,
        QueryMsg::BoxesOf {
            owner,
            start_after,
            limit,
        } => to_json_binary(&query_boxes_of(deps, owner, start_after, limit)?)?,
        QueryMsg::CardsOf {
            owner,
            start_after,
            limit,
        } => to_json_binary(&query_cards_of(deps, owner, start_after, limit)?)?,
    };
    Ok(response)
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    CONFIG.load(deps.storage)
}

fn query_boxes_of(
    deps: Deps,
    owner: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<IdsResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let limit: usize = limit.unwrap_or(100) as usize;
    let ids = boxes_of(deps.storage, &owner, start_after, limit)?;
    Ok(IdsResponse { ids })
}

fn query_cards_of(
    deps: Deps,
    owner: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<IdsResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let limit: usize = limit.unwrap_or(100) as usize;
    let ids = cards_of(deps.storage, &owner, start_after, limit)?;
    Ok(IdsResponse { ids })
}
