//! Rarity tables of card campaigns.
//!
//! A table is a list of tiers whose weight ranges partition `[0, total_weight)`.
//! Every tier is also expressible as one packed 32 byte word with five big-endian
//! u32 fields in the low 20 bytes:
//! `rareness ‖ card_offset ‖ card_count ‖ range_start ‖ range_end`.

use cosmwasm_schema::cw_serde;
use dkdao::{read_u32, BytesBuffer};
use thiserror::Error;

const FIELDS_OFFSET: usize = 12;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DistributionError {
    #[error("Distribution must contain at least one tier")]
    Empty,
    #[error("Tier must be a 32 byte word")]
    InvalidWord,
    #[error("Tier {index} must start at {expected}")]
    NotContiguous { index: usize, expected: u32 },
    #[error("Tier {index} has an empty weight range")]
    EmptyRange { index: usize },
    #[error("Tier {index} has no cards")]
    NoCards { index: usize },
    #[error("Design indices of tier {index} exceed the u32 range")]
    DesignOverflow { index: usize },
}

#[cw_serde]
#[derive(Copy)]
pub struct RarityTier {
    pub rareness: u32,
    /// Design index of the first card in this tier
    pub card_offset: u32,
    /// Number of card designs in this tier
    pub card_count: u32,
    /// Inclusive start of the weight range
    pub range_start: u32,
    /// Exclusive end of the weight range
    pub range_end: u32,
}

impl RarityTier {
    pub fn from_word(word: &[u8]) -> Result<Self, DistributionError> {
        if word.len() != 32 {
            return Err(DistributionError::InvalidWord);
        }
        let field = |n: usize| {
            read_u32(word, FIELDS_OFFSET + 4 * n).map_err(|_| DistributionError::InvalidWord)
        };
        Ok(Self {
            rareness: field(0)?,
            card_offset: field(1)?,
            card_count: field(2)?,
            range_start: field(3)?,
            range_end: field(4)?,
        })
    }

    pub fn to_word(&self) -> Vec<u8> {
        BytesBuffer::new()
            .write_bytes(&[0u8; FIELDS_OFFSET])
            .write_u32(self.rareness)
            .write_u32(self.card_offset)
            .write_u32(self.card_count)
            .write_u32(self.range_start)
            .write_u32(self.range_end)
            .invoke()
    }

    fn contains(&self, roll: u128) -> bool {
        u128::from(self.range_start) <= roll && roll < u128::from(self.range_end)
    }
}

/// The tiers must be contiguous from 0 and non-empty.
/// `card_offset + card_count` must fit into a u32.
pub fn validate_distribution(tiers: &[RarityTier]) -> Result<u32, DistributionError> {
    if tiers.is_empty() {
        return Err(DistributionError::Empty);
    }
    let mut expected = 0u32;
    for (index, tier) in tiers.iter().enumerate() {
        if tier.range_start != expected {
            return Err(DistributionError::NotContiguous { index, expected });
        }
        if tier.range_end <= tier.range_start {
            return Err(DistributionError::EmptyRange { index });
        }
        if tier.card_count == 0 {
            return Err(DistributionError::NoCards { index });
        }
        if tier.card_offset.checked_add(tier.card_count).is_none() {
            return Err(DistributionError::DesignOverflow { index });
        }
        expected = tier.range_end;
    }
    Ok(expected)
}

/// The outcome of one card draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    pub rareness: u32,
    /// Global design index `card_offset + n` with `n < card_count`
    pub design: u32,
}

/// Picks a tier and a design from 32 bytes of randomness.
///
/// The first 16 bytes select the tier by weight, the last 16 the design within it.
/// `total_weight` must be the value returned by [`validate_distribution`].
/// May return `None` for tables that did not pass validation.
pub fn draw_card(
    tiers: &[RarityTier],
    total_weight: u32,
    randomness: [u8; 32],
) -> Option<Draw> {
    let mut weight_bytes = [0u8; 16];
    weight_bytes.copy_from_slice(&randomness[..16]);
    let mut design_bytes = [0u8; 16];
    design_bytes.copy_from_slice(&randomness[16..]);

    if total_weight == 0 {
        return None;
    }
    let roll = u128::from_be_bytes(weight_bytes) % u128::from(total_weight);
    let tier = tiers.iter().find(|tier| tier.contains(roll))?;
    if tier.card_count == 0 {
        return None;
    }
    // n < card_count <= u32::MAX
    let n = (u128::from_be_bytes(design_bytes) % u128::from(tier.card_count)) as u32;
    Some(Draw {
        rareness: tier.rareness,
        design: tier.card_offset.checked_add(n)?,
    })
}
