use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, HexBinary};

pub const DIGEST_LEN: usize = 32;
pub const SECRET_LEN: usize = 32;

/// Messages the oracle sends to the RNG contract, usually relayed through the oracle proxy
#[cw_serde]
pub enum RngExecuteMsg {
    /// Appends one keccak256 digest to the commitment list
    Commit { digest: HexBinary },
    /// Appends a packed list of 32 byte digests in order
    BatchCommit { digests: HexBinary },
    /// Reveals the secret of the oldest outstanding commitment and delivers it to `consumer`
    Reveal {
        secret: HexBinary,
        consumer: String,
        /// Opaque data passed back to the consumer unchanged
        context: Option<Binary>,
    },
}

/// The revealed randomness delivered to a consumer
#[cw_serde]
pub struct RngCallback {
    /// Index of the commitment that was revealed
    pub index: u64,
    /// The 32 byte secret. Its keccak256 hash is the committed digest.
    pub secret: HexBinary,
    pub context: Binary,
}

/// This must be accepted in an `RngReceive {}` variant in the ExecuteMsg of a consumer contract.
#[cw_serde]
pub enum RngReceiverExecuteMsg {
    RngReceive { callback: RngCallback },
}
