use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, Order, StdResult, Storage, Timestamp};
use cw_storage_plus::{Bound, Item, Map};

/// Top level storage key. Values must not conflict.
/// Each key is only one byte long to ensure we use the smallest possible storage keys.
#[repr(u8)]
pub enum TopKey {
    Config = b'c',
    Progress = b'p',
    Commitments = b'd',
}

impl TopKey {
    const fn as_str(&self) -> &str {
        let array_ref = unsafe { std::mem::transmute::<_, &[u8; 1]>(self) };
        match core::str::from_utf8(array_ref) {
            Ok(a) => a,
            Err(_) => panic!("Non-utf8 enum value found. Use a-z, A-Z and 0-9"),
        }
    }
}

#[cw_serde]
pub struct Config {
    /// The registry used to look up the oracle
    pub registry: Addr,
    /// Registry domain in which the "Oracle" record is looked up
    pub domain: String,
    /// Gas limit for the consumer callback
    pub callback_gas_limit: u64,
}

pub const CONFIG: Item<Config> = Item::new(TopKey::Config.as_str());

#[cw_serde]
#[derive(Default, Copy)]
pub struct Progress {
    /// Number of digests committed
    pub committed: u64,
    /// Number of commitments consumed by a reveal. Always <= committed.
    pub revealed: u64,
}

impl Progress {
    pub fn remaining(&self) -> u64 {
        self.committed - self.revealed
    }
}

pub const PROGRESS: Item<Progress> = Item::new(TopKey::Progress.as_str());

#[cw_serde]
pub struct RevealInfo {
    pub secret: HexBinary,
    pub revealed: Timestamp,
    pub consumer: Addr,
}

#[cw_serde]
pub struct StoredCommitment {
    /// keccak256 of the secret
    pub digest: HexBinary,
    pub committed: Timestamp,
    pub height: u64,
    /// Set once the secret was revealed
    pub reveal: Option<RevealInfo>,
}

/// Commitments by sequential index starting at 0
pub const COMMITMENTS: Map<u64, StoredCommitment> = Map::new(TopKey::Commitments.as_str());

pub fn load_progress(storage: &dyn Storage) -> StdResult<Progress> {
    Ok(PROGRESS.may_load(storage)?.unwrap_or_default())
}

/// Appends a digest and returns its index
pub fn push_commitment(
    storage: &mut dyn Storage,
    digest: [u8; 32],
    committed: Timestamp,
    height: u64,
) -> StdResult<u64> {
    let mut progress = load_progress(storage)?;
    let index = progress.committed;
    COMMITMENTS.save(
        storage,
        index,
        &StoredCommitment {
            digest: HexBinary::from(digest),
            committed,
            height,
            reveal: None,
        },
    )?;
    progress.committed += 1;
    PROGRESS.save(storage, &progress)?;
    Ok(index)
}

pub fn commitments(
    storage: &dyn Storage,
    start_after: Option<u64>,
    limit: usize,
    order: Order,
) -> StdResult<Vec<(u64, StoredCommitment)>> {
    let (low_bound, top_bound) = match order {
        Order::Ascending => (start_after.map(Bound::exclusive), None),
        Order::Descending => (None, start_after.map(Bound::exclusive)),
    };
    COMMITMENTS
        .range(storage, low_bound, top_bound, order)
        .take(limit)
        .collect()
}
