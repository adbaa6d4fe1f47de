use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

pub const OWNER: Item<Addr> = Item::new("owner");

/// (domain, name) => address
pub const RECORDS: Map<(&str, &str), Addr> = Map::new("records");

/// address => (domain, name) of the latest record pointing to it
pub const REVERSE_RECORDS: Map<&Addr, (String, String)> = Map::new("reverse");
