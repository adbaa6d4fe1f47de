use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Timestamp};
use cw_storage_plus::{Item, Map};

use super::TopKey;

/// Boxes an owner wants opened with the next suitable reveal
#[cw_serde]
pub struct OpenRequest {
    pub owner: Addr,
    pub boxes: Vec<u64>,
    pub created: Timestamp,
}

pub const OPEN_REQUESTS: Map<u64, OpenRequest> = Map::new(TopKey::OpenRequests.as_str());
const OPEN_REQUESTS_LAST_ID: Item<u64> = Item::new(TopKey::OpenRequestsLastId.as_str());

pub fn create_open_request(storage: &mut dyn Storage, request: &OpenRequest) -> StdResult<u64> {
    let id = OPEN_REQUESTS_LAST_ID.may_load(storage)?.unwrap_or_default() + 1;
    OPEN_REQUESTS.save(storage, id, request)?;
    OPEN_REQUESTS_LAST_ID.save(storage, &id)?;
    Ok(id)
}

/// Removes and returns a pending request
pub fn take_open_request(storage: &mut dyn Storage, id: u64) -> StdResult<Option<OpenRequest>> {
    let request = OPEN_REQUESTS.may_load(storage, id)?;
    if request.is_some() {
        OPEN_REQUESTS.remove(storage, id);
    }
    Ok(request)
}
