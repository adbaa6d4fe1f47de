use thiserror::Error;

use crate::bytes::{read_u64, BytesBuffer};
use crate::keccak::keccak256;

pub const SIGNATURE_LEN: usize = 65;
pub const NONCE_LEN: usize = 24;
/// Nonce plus big-endian expiry
pub const PROOF_MESSAGE_LEN: usize = NONCE_LEN + 8;
pub const PROOF_LEN: usize = SIGNATURE_LEN + PROOF_MESSAGE_LEN;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProofError {
    #[error("Proof must be {expected} bytes long, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("Invalid recovery id: {0}")]
    InvalidRecoveryId(u8),
    #[error("Public key must be 65 bytes uncompressed")]
    InvalidPublicKey,
}

/// The signed part of a proof
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofMessage {
    pub nonce: [u8; NONCE_LEN],
    /// Expiry in seconds since the Unix epoch
    pub expiry: u64,
}

impl ProofMessage {
    pub fn new(nonce: [u8; NONCE_LEN], expiry: u64) -> Self {
        Self { nonce, expiry }
    }

    pub fn from_slice(data: &[u8]) -> Result<Self, ProofError> {
        if data.len() != PROOF_MESSAGE_LEN {
            return Err(ProofError::InvalidLength {
                expected: PROOF_MESSAGE_LEN,
                actual: data.len(),
            });
        }
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&data[..NONCE_LEN]);
        let expiry = read_u64(data, NONCE_LEN).map_err(|_| ProofError::InvalidLength {
            expected: PROOF_MESSAGE_LEN,
            actual: data.len(),
        })?;
        Ok(Self { nonce, expiry })
    }

    pub fn to_bytes(&self) -> [u8; PROOF_MESSAGE_LEN] {
        let mut out = [0u8; PROOF_MESSAGE_LEN];
        out[..NONCE_LEN].copy_from_slice(&self.nonce);
        out[NONCE_LEN..].copy_from_slice(&self.expiry.to_be_bytes());
        out
    }

    /// The digest a controller signs for this message
    pub fn signing_hash(&self) -> [u8; 32] {
        eth_signed_message_hash(&self.to_bytes())
    }
}

/// A controller authorization that any account can relay.
///
/// Layout: `r (32) ‖ s (32) ‖ v (1) ‖ nonce (24) ‖ expiry (8, big-endian)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    pub signature: [u8; SIGNATURE_LEN],
    pub message: ProofMessage,
}

impl Proof {
    pub fn new(signature: [u8; SIGNATURE_LEN], message: ProofMessage) -> Self {
        Self { signature, message }
    }

    pub fn from_slice(data: &[u8]) -> Result<Self, ProofError> {
        if data.len() != PROOF_LEN {
            return Err(ProofError::InvalidLength {
                expected: PROOF_LEN,
                actual: data.len(),
            });
        }
        let mut signature = [0u8; SIGNATURE_LEN];
        signature.copy_from_slice(&data[..SIGNATURE_LEN]);
        let message = ProofMessage::from_slice(&data[SIGNATURE_LEN..])?;
        Ok(Self { signature, message })
    }

    pub fn to_vec(&self) -> Vec<u8> {
        BytesBuffer::new()
            .write_bytes(&self.signature)
            .write_bytes(&self.message.to_bytes())
            .invoke()
    }

    /// The 64 byte compact signature `r ‖ s`
    pub fn compact_signature(&self) -> &[u8] {
        &self.signature[..64]
    }

    pub fn recovery_param(&self) -> Result<u8, ProofError> {
        recovery_param(self.signature[64])
    }
}

/// Normalizes Ethereum's `v` (27/28) and raw recovery ids (0/1)
pub fn recovery_param(v: u8) -> Result<u8, ProofError> {
    match v {
        0 | 1 => Ok(v),
        27 | 28 => Ok(v - 27),
        other => Err(ProofError::InvalidRecoveryId(other)),
    }
}

/// EIP-191 personal message hash:
/// `keccak256("\x19Ethereum Signed Message:\n" ‖ len(message) ‖ message)`
pub fn eth_signed_message_hash(message: &[u8]) -> [u8; 32] {
    let mut data = format!("\x19Ethereum Signed Message:\n{}", message.len()).into_bytes();
    data.extend_from_slice(message);
    keccak256(&data)
}

/// The 20 byte account of an uncompressed secp256k1 public key
pub fn eth_address(pubkey: &[u8]) -> Result<[u8; 20], ProofError> {
    if pubkey.len() != 65 || pubkey[0] != 0x04 {
        return Err(ProofError::InvalidPublicKey);
    }
    let hash = keccak256(&pubkey[1..]);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    Ok(out)
}
