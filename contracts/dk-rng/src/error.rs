use thiserror::Error;

use cosmwasm_std::StdError;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("No oracle is registered for this domain")]
    OracleNotRegistered,

    #[error("Digests must be 32 bytes long")]
    InvalidDigest,

    #[error("Batch must contain at least one digest")]
    EmptyBatch,

    #[error("Secret must be 32 bytes long")]
    InvalidSecret,

    #[error("All commitments have been revealed")]
    NothingToReveal,

    #[error("Digest of secret does not match commitment {index}")]
    DigestMismatch { index: u64 },

    #[error("Callback gas limit must not be zero")]
    ZeroCallbackGasLimit,
}
