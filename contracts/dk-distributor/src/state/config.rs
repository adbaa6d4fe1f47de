use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;

use super::TopKey;

#[cw_serde]
pub struct Config {
    /// The registry used to look up the oracle and the RNG
    pub registry: Addr,
    /// Registry domain of the oracle that manages campaigns and mints boxes
    pub domain: String,
}

pub const CONFIG: Item<Config> = Item::new(TopKey::Config.as_str());
