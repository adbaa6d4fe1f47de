use cosmwasm_schema::cw_serde;
use cosmwasm_std::Timestamp;
use cw_storage_plus::Map;

use super::TopKey;
use crate::distribution::RarityTier;

/// A sale phase. Immutable once created except for the `issued` counter.
#[cw_serde]
pub struct Campaign {
    /// Maximum number of boxes
    pub soft_cap: u64,
    /// Number of boxes minted so far
    pub issued: u64,
    /// No boxes can be minted after this point in time
    pub deadline: Option<Timestamp>,
    /// Card generation issued in this phase
    pub generation: u32,
    pub distribution: Vec<RarityTier>,
    /// Exclusive end of the last tier's range
    pub total_weight: u32,
}

/// A map from phase to campaign
pub const CAMPAIGNS: Map<u64, Campaign> = Map::new(TopKey::Campaigns.as_str());
