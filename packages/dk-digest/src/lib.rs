//! Builds the secrets the oracle commits to and later reveals.
//!
//! A secret is 32 random bytes whose last 8 bytes are replaced by the creation
//! time in Unix milliseconds (big-endian). The digest committed on chain is
//! `keccak256(secret)`.

use std::time::{SystemTime, UNIX_EPOCH};

use cosmwasm_std::{Binary, HexBinary};
use dkdao::{keccak256, BytesBuffer, RngExecuteMsg, SECRET_LEN};
use rand::{rngs::OsRng, CryptoRng, RngCore};

const TIMESTAMP_OFFSET: usize = SECRET_LEN - 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub secret: [u8; 32],
    pub hash: [u8; 32],
}

impl Digest {
    pub fn commit_msg(&self) -> RngExecuteMsg {
        RngExecuteMsg::Commit {
            digest: HexBinary::from(self.hash),
        }
    }

    pub fn reveal_msg(
        &self,
        consumer: impl Into<String>,
        context: Option<Binary>,
    ) -> RngExecuteMsg {
        RngExecuteMsg::Reveal {
            secret: HexBinary::from(self.secret),
            consumer: consumer.into(),
            context,
        }
    }

    /// Creation time in Unix milliseconds
    pub fn timestamp(&self) -> u64 {
        secret_timestamp(&self.secret)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestBatch {
    pub secrets: Vec<[u8; 32]>,
    pub hashes: Vec<[u8; 32]>,
    /// All hashes concatenated, in order
    pub packed: Vec<u8>,
}

impl DigestBatch {
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Digest> {
        Some(Digest {
            secret: *self.secrets.get(index)?,
            hash: *self.hashes.get(index)?,
        })
    }

    pub fn commit_msg(&self) -> RngExecuteMsg {
        RngExecuteMsg::BatchCommit {
            digests: HexBinary::from(self.packed.clone()),
        }
    }
}

/// Milliseconds since the Unix epoch, 0 if the clock is before it
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

pub fn build_digest() -> Digest {
    build_digest_with(&mut OsRng, now_millis())
}

pub fn build_digest_with<R: RngCore + CryptoRng>(rng: &mut R, now_ms: u64) -> Digest {
    let mut secret = [0u8; 32];
    rng.fill_bytes(&mut secret);
    secret[TIMESTAMP_OFFSET..].copy_from_slice(&now_ms.to_be_bytes());
    let hash = keccak256(&secret);
    Digest { secret, hash }
}

pub fn build_digest_batch(n: usize) -> DigestBatch {
    build_digest_batch_with(&mut OsRng, n, now_millis())
}

pub fn build_digest_batch_with<R: RngCore + CryptoRng>(
    rng: &mut R,
    n: usize,
    now_ms: u64,
) -> DigestBatch {
    let mut secrets = Vec::with_capacity(n);
    let mut hashes = Vec::with_capacity(n);
    let mut buffer = BytesBuffer::new();
    for _ in 0..n {
        let Digest { secret, hash } = build_digest_with(rng, now_ms);
        buffer = buffer.write_bytes(&hash);
        secrets.push(secret);
        hashes.push(hash);
    }
    DigestBatch {
        secrets,
        hashes,
        packed: buffer.invoke(),
    }
}

/// Reads the creation time embedded in a secret
pub fn secret_timestamp(secret: &[u8; 32]) -> u64 {
    let mut out = [0u8; 8];
    out.copy_from_slice(&secret[TIMESTAMP_OFFSET..]);
    u64::from_be_bytes(out)
}
