use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Item, Map};

/// Top level storage key. Values must not conflict.
/// Each key is only one byte long to ensure we use the smallest possible storage keys.
#[repr(u8)]
pub enum TopKey {
    Config = b'c',
    Controllers = b'C',
    UsedNonces = b'n',
    NonceExpiries = b'e',
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
    /// The only address that can add or remove controllers
    pub manager: Addr,
    /// Maximum number of seconds a proof may be valid into the future.
    /// Bounds how long a used nonce has to be remembered.
    pub proof_lifetime: u64,
}

pub const CONFIG: Item<Config> = Item::new(TopKey::Config.as_str());

pub const CONTROLLERS: Map<&Addr, ()> = Map::new(TopKey::Controllers.as_str());

/// A map from the 32 byte proof message to its expiry
const USED_NONCES: Map<&[u8], u64> = Map::new(TopKey::UsedNonces.as_str());

/// Index of used nonces by expiry for pruning
const NONCE_EXPIRIES: Map<(u64, &[u8]), ()> = Map::new(TopKey::NonceExpiries.as_str());

pub fn is_nonce_used(storage: &dyn Storage, message: &[u8]) -> bool {
    USED_NONCES.has(storage, message)
}

pub fn mark_nonce_used(storage: &mut dyn Storage, message: &[u8], expiry: u64) -> StdResult<()> {
    USED_NONCES.save(storage, message, &expiry)?;
    NONCE_EXPIRIES.save(storage, (expiry, message), &())?;
    Ok(())
}

/// Removes up to `limit` used nonces that expired before `now`.
///
/// A proof is rejected once `now > expiry`, so forgetting its nonce cannot enable a replay.
pub fn prune_expired_nonces(storage: &mut dyn Storage, now: u64, limit: usize) -> StdResult<u32> {
    let expired = NONCE_EXPIRIES
        .keys(
            storage,
            None,
            Some(Bound::exclusive((now, &[][..]))),
            Order::Ascending,
        )
        .take(limit)
        .collect::<StdResult<Vec<(u64, Vec<u8>)>>>()?;

    for (expiry, message) in &expired {
        NONCE_EXPIRIES.remove(storage, (*expiry, message.as_slice()));
        USED_NONCES.remove(storage, message.as_slice());
    }
    Ok(expired.len() as u32)
}
