use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{HexBinary, Timestamp};

pub use dkdao::RngCallback;

use crate::state::{Campaign, Card, CardBox, OpenRequest};

#[cw_serde]
pub struct InstantiateMsg {
    /// Address of the registry contract
    pub registry: String,
    /// Registry domain of the oracle, e.g. "Duelist King"
    pub domain: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Creates the campaign of a phase. Only the oracle can do this.
    ///
    /// `distribution` is a list of packed 32 byte tier words whose weight ranges
    /// must be contiguous from 0.
    NewCampaign {
        phase: u64,
        soft_cap: u64,
        deadline: Option<Timestamp>,
        generation: u32,
        distribution: Vec<HexBinary>,
    },
    /// Mints sealed boxes of a phase to `owner`. Only the oracle can do this.
    MintBoxes {
        owner: String,
        number: u32,
        phase: u64,
    },
    /// Requests opening of boxes owned by the sender.
    /// Cards are issued once the oracle reveals a secret for this request.
    OpenBoxes { boxes: Vec<u64> },
    /// Randomness delivered by the RNG contract
    RngReceive { callback: RngCallback },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Get the config state
    #[returns(ConfigResponse)]
    Config {},
    #[returns(CampaignResponse)]
    Campaign { phase: u64 },
    #[returns(BoxResponse)]
    Box { id: u64 },
    #[returns(CardResponse)]
    Card { id: u64 },
    #[returns(OpenRequestResponse)]
    OpenRequest { id: u64 },
    /// Box IDs of an owner in ascending order
    #[returns(IdsResponse)]
    BoxesOf {
        owner: String,
        start_after: Option<u64>,
        /// The max number of entries returned. If you set this too high, your query runs out of gas.
        /// When unset, an implementation defined default will be used.
        limit: Option<u32>,
    },
    /// Card IDs of an owner in ascending order
    #[returns(IdsResponse)]
    CardsOf {
        owner: String,
        start_after: Option<u64>,
        /// The max number of entries returned. If you set this too high, your query runs out of gas.
        /// When unset, an implementation defined default will be used.
        limit: Option<u32>,
    },
}

// We define a custom struct for each query response
pub type ConfigResponse = crate::state::Config;

#[cw_serde]
pub struct CampaignResponse {
    pub campaign: Option<Campaign>,
}

#[cw_serde]
pub struct BoxResponse {
    #[serde(rename = "box")]
    pub card_box: Option<CardBox>,
}

#[cw_serde]
pub struct CardResponse {
    pub card: Option<Card>,
}

#[cw_serde]
pub struct OpenRequestResponse {
    pub request: Option<OpenRequest>,
}

#[cw_serde]
pub struct IdsResponse {
    pub ids: Vec<u64>,
}
