use thiserror::Error;

use cosmwasm_std::StdError;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid proof")]
    InvalidProof,

    #[error("Proof expired at {expiry}, current time is {now}")]
    ProofExpired { expiry: u64, now: u64 },

    #[error("Proof expiry {expiry} is more than {lifetime} seconds in the future")]
    ProofLifetimeTooLong { expiry: u64, lifetime: u64 },

    #[error("Nonce was already used")]
    NonceAlreadyUsed,

    #[error("Nonce must be 24 bytes long")]
    InvalidNonceLength,

    #[error("Proof lifetime must not be zero")]
    ZeroProofLifetime,

    #[error("Forwarded call reverted: {reason}")]
    ForwardedCallReverted { reason: String },
}
