use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Item, Map};

use super::TopKey;

#[cw_serde]
pub enum BoxStatus {
    Sealed,
    /// Waiting for randomness of the given open request
    Opening { request_id: u64 },
    Opened,
}

#[cw_serde]
pub struct CardBox {
    pub owner: Addr,
    pub phase: u64,
    pub status: BoxStatus,
}

/// A map from box ID to box
pub const BOXES: Map<u64, CardBox> = Map::new(TopKey::Boxes.as_str());
const BOXES_BY_OWNER: Map<(&Addr, u64), ()> = Map::new(TopKey::BoxesByOwner.as_str());
const BOXES_LAST_ID: Item<u64> = Item::new(TopKey::BoxesLastId.as_str());

/// Creates `number` sealed boxes with sequential IDs starting at 1.
/// Returns the first and last ID.
pub fn mint_boxes(
    storage: &mut dyn Storage,
    owner: &Addr,
    phase: u64,
    number: u32,
) -> StdResult<(u64, u64)> {
    let last_id = BOXES_LAST_ID.may_load(storage)?.unwrap_or_default();
    let first = last_id + 1;
    let last = last_id + u64::from(number);
    for id in first..=last {
        BOXES.save(
            storage,
            id,
            &CardBox {
                owner: owner.clone(),
                phase,
                status: BoxStatus::Sealed,
            },
        )?;
        BOXES_BY_OWNER.save(storage, (owner, id), &())?;
    }
    BOXES_LAST_ID.save(storage, &last)?;
    Ok((first, last))
}

/// Box IDs of an owner in ascending order
pub fn boxes_of(
    storage: &dyn Storage,
    owner: &Addr,
    start_after: Option<u64>,
    limit: usize,
) -> StdResult<Vec<u64>> {
    BOXES_BY_OWNER
        .prefix(owner)
        .keys(
            storage,
            start_after.map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .take(limit)
        .collect()
}
