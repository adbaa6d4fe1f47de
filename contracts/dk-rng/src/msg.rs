use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, HexBinary, Timestamp};

pub use dkdao::RngExecuteMsg as ExecuteMsg;

use crate::state::{Progress, StoredCommitment};

#[cw_serde]
pub struct InstantiateMsg {
    /// Address of the registry contract
    pub registry: String,
    /// Registry domain of the oracle, e.g. "DKDAO Infrastructure"
    pub domain: String,
    pub callback_gas_limit: u64,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Get the config state
    #[returns(ConfigResponse)]
    Config {},
    /// Number of committed and revealed digests
    #[returns(ProgressResponse)]
    Progress {},
    #[returns(CommitmentResponse)]
    Commitment { index: u64 },
    /// Gets commitments in ascending order (old to new)
    #[returns(CommitmentsResponse)]
    CommitmentsAsc {
        // If set only indices greater than this value are returned
        start_after: Option<u64>,
        /// The max number of entries returned. If you set this too high, your query runs out of gas.
        /// When unset, an implementation defined default will be used.
        limit: Option<u32>,
    },
    /// Gets commitments in descending order (new to old)
    #[returns(CommitmentsResponse)]
    CommitmentsDesc {
        // If set only indices smaller than this value are returned
        start_after: Option<u64>,
        /// The max number of entries returned. If you set this too high, your query runs out of gas.
        /// When unset, an implementation defined default will be used.
        limit: Option<u32>,
    },
}

// We define a custom struct for each query response
pub type ConfigResponse = crate::state::Config;

pub type ProgressResponse = Progress;

#[cw_serde]
pub struct QueriedCommitment {
    pub index: u64,
    pub digest: HexBinary,
    pub committed: Timestamp,
    pub height: u64,
    /// `None` until revealed
    pub secret: Option<HexBinary>,
    pub revealed: Option<Timestamp>,
    pub consumer: Option<Addr>,
}

impl QueriedCommitment {
    pub fn make(index: u64, stored: StoredCommitment) -> Self {
        let (secret, revealed, consumer) = match stored.reveal {
            Some(reveal) => (
                Some(reveal.secret),
                Some(reveal.revealed),
                Some(reveal.consumer),
            ),
            None => (None, None, None),
        };
        Self {
            index,
            digest: stored.digest,
            committed: stored.committed,
            height: stored.height,
            secret,
            revealed,
            consumer,
        }
    }
}

#[cw_serde]
pub struct CommitmentResponse {
    pub commitment: Option<QueriedCommitment>,
}

#[cw_serde]
pub struct CommitmentsResponse {
    pub commitments: Vec<QueriedCommitment>,
}
