mod bytes;
mod keccak;
mod proof;
mod records;
mod registry;
mod rng;

pub use bytes::{read_bytes, read_u32, read_u64, to_bytes32_array, BytesBuffer, BytesError};
pub use keccak::keccak256;
pub use proof::{
    eth_address, eth_signed_message_hash, recovery_param, Proof, ProofError, ProofMessage,
    NONCE_LEN, PROOF_LEN, PROOF_MESSAGE_LEN, SIGNATURE_LEN,
};
pub use records::{
    validate_record_part, RecordError, DOMAIN_DUELIST_KING, DOMAIN_INFRASTRUCTURE,
    MAX_RECORD_PART_LEN, NAME_DAO, NAME_DISTRIBUTOR, NAME_OPERATOR, NAME_ORACLE, NAME_RNG,
};
pub use registry::{
    query_registered_address, AddressResponse, IsExistRecordResponse, OwnerResponse,
    RecordResponse, RegistryQueryMsg,
};
pub use rng::{RngCallback, RngExecuteMsg, RngReceiverExecuteMsg, DIGEST_LEN, SECRET_LEN};
