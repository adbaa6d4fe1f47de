use thiserror::Error;

use cosmwasm_std::StdError;

use crate::distribution::DistributionError;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Distribution(#[from] DistributionError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Sender is not the registered RNG contract")]
    UnauthorizedReceive,

    #[error("Registry record {domain}/{name} is not set")]
    RecordNotSet { domain: String, name: String },

    // Campaigns
    #[error("Campaign of phase {phase} already exists")]
    CampaignExists { phase: u64 },

    #[error("Campaign of phase {phase} does not exist")]
    CampaignNotFound { phase: u64 },

    #[error("Campaign of phase {phase} ended")]
    CampaignEnded { phase: u64 },

    #[error("Campaign of phase {phase} is sold out")]
    CampaignSoldOut { phase: u64 },

    #[error("Number of boxes must be between 1 and {max}")]
    InvalidBoxNumber { max: u32 },

    // Boxes
    #[error("Box {id} does not exist")]
    BoxNotFound { id: u64 },

    #[error("Box {id} is not owned by the sender")]
    NotBoxOwner { id: u64 },

    #[error("Box {id} is already opened or being opened")]
    BoxNotSealed { id: u64 },

    #[error("Open request {id} does not exist")]
    OpenRequestNotFound { id: u64 },

    // Cards
    #[error("Card {id} does not exist")]
    CardNotFound { id: u64 },

    #[error("Success rate must be in the range (0, 1]")]
    InvalidSuccessRate,

    // Callback
    #[error("Randomness must be 32 bytes")]
    InvalidRandomness,

    #[error("Unsupported callback context")]
    InvalidContext,
}
