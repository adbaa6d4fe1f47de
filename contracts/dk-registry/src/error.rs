use thiserror::Error;

use cosmwasm_std::StdError;
use dkdao::RecordError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Record(#[from] RecordError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Domains, names and addresses must have the same length")]
    LengthMismatch,
}
