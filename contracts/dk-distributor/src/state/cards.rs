use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Item, Map};

use super::TopKey;

#[cw_serde]
pub struct Card {
    pub owner: Addr,
    pub phase: u64,
    pub generation: u32,
    pub rareness: u32,
    /// Global design index within the campaign's tiers
    pub design: u32,
    /// Upgrade level, starting at 0
    pub level: u32,
    /// The box this card came from
    pub box_id: u64,
}

/// A map from card ID to card
pub const CARDS: Map<u64, Card> = Map::new(TopKey::Cards.as_str());
const CARDS_BY_OWNER: Map<(&Addr, u64), ()> = Map::new(TopKey::CardsByOwner.as_str());
const CARDS_LAST_ID: Item<u64> = Item::new(TopKey::CardsLastId.as_str());

/// Stores a new card and returns its ID. IDs start at 1.
pub fn issue_card(storage: &mut dyn Storage, card: &Card) -> StdResult<u64> {
    let id = CARDS_LAST_ID.may_load(storage)?.unwrap_or_default() + 1;
    CARDS.save(storage, id, card)?;
    CARDS_BY_OWNER.save(storage, (&card.owner, id), &())?;
    CARDS_LAST_ID.save(storage, &id)?;
    Ok(id)
}

/// Card IDs of an owner in ascending order
pub fn cards_of(
    storage: &dyn Storage,
    owner: &Addr,
    start_after: Option<u64>,
    limit: usize,
) -> StdResult<Vec<u64>> {
    CARDS_BY_OWNER
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
