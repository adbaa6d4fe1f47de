use tiny_keccak::{Hasher, Keccak};

/// Legacy Keccak-256 as used by Ethereum (not NIST SHA3-256).
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}
