use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, HexBinary};

#[cw_serde]
pub struct InstantiateMsg {
    pub manager: String,
    /// Initial controllers
    pub controllers: Option<Vec<String>>,
    /// Maximum validity of a proof in seconds. Defaults to 60.
    pub proof_lifetime: Option<u64>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Adds a controller. Only the manager can do this.
    /// Adding an existing controller is a no-op.
    AddController { address: String },
    /// Removes a controller. Only the manager can do this.
    RemoveController { address: String },
    /// Forwards `msg` to `target` with the proxy as sender.
    /// The sender must be a controller. Funds sent along are passed on.
    SafeCall { target: String, msg: Binary },
    /// Like `SafeCall` but authorized by a controller signature that anyone can relay.
    ///
    /// `proof` is a 65 byte signature (r, s, v) followed by the signed
    /// 32 byte message (24 byte nonce, 8 byte big-endian expiry in seconds).
    ///
    /// The signature covers nonce and expiry only. Whoever holds an unused proof
    /// chooses `target` and `msg`, so proofs must only be handed to trusted
    /// relayers until they expire.
    SafeCallWithProof {
        proof: HexBinary,
        target: String,
        msg: Binary,
    },
    SetConfig {
        manager: Option<String>,
        proof_lifetime: Option<u64>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Get the config state
    #[returns(ConfigResponse)]
    Config {},
    #[returns(IsControllerResponse)]
    IsController { address: String },
    /// Lists controllers in ascending order
    #[returns(ControllersResponse)]
    Controllers {
        start_after: Option<String>,
        /// The max number of entries returned. If you set this too high, your query runs out of gas.
        /// When unset, an implementation defined default will be used.
        limit: Option<u32>,
    },
    /// Checks if the 32 byte proof message was already consumed
    #[returns(IsNonceUsedResponse)]
    IsNonceUsed { message: HexBinary },
    /// Builds the message a controller has to sign for the given 24 byte nonce.
    /// The expiry is set to the current block time plus the proof lifetime.
    #[returns(ProofMessageResponse)]
    ProofMessage { nonce: HexBinary },
}

// We define a custom struct for each query response
pub type ConfigResponse = crate::state::Config;

#[cw_serde]
pub struct IsControllerResponse {
    pub is_controller: bool,
}

#[cw_serde]
pub struct ControllersResponse {
    pub controllers: Vec<Addr>,
}

#[cw_serde]
pub struct IsNonceUsedResponse {
    pub used: bool,
}

#[cw_serde]
pub struct ProofMessageResponse {
    pub message: HexBinary,
    pub expiry: u64,
}
