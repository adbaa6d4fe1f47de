//! Well known registry records

use thiserror::Error;

pub const DOMAIN_INFRASTRUCTURE: &str = "DKDAO Infrastructure";
pub const DOMAIN_DUELIST_KING: &str = "Duelist King";

pub const NAME_DAO: &str = "DAO";
pub const NAME_ORACLE: &str = "Oracle";
pub const NAME_RNG: &str = "RNG";
pub const NAME_OPERATOR: &str = "Operator";
pub const NAME_DISTRIBUTOR: &str = "Distributor";

/// Domains and names must fit into a bytes32 word
pub const MAX_RECORD_PART_LEN: usize = 32;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    #[error("Record domain or name must not be empty")]
    Empty,
    #[error("Record domain or name exceeds 32 bytes")]
    TooLong,
}

pub fn validate_record_part(part: &str) -> Result<(), RecordError> {
    if part.is_empty() {
        Err(RecordError::Empty)
    } else if part.len() > MAX_RECORD_PART_LEN {
        Err(RecordError::TooLong)
    } else {
        Ok(())
    }
}
