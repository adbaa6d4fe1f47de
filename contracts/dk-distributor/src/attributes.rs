//! Stable event attributes
//!
//! The attributes here should only be changed very carefully as it is likely that clients rely on them.

/// Which entry point/message type was executed
pub const ATTR_ACTION: &str = "action";

pub const ATTR_PHASE: &str = "phase";
pub const ATTR_OWNER: &str = "owner";

/// First and last box id of a mint
pub const ATTR_FIRST_BOX: &str = "first_box";
pub const ATTR_LAST_BOX: &str = "last_box";

/// The open request to be served by an RNG reveal
pub const ATTR_OPEN_REQUEST: &str = "open_request";

/// Index of the RNG commitment whose secret was used
pub const ATTR_RNG_INDEX: &str = "rng_index";

pub const EVENT_TYPE_CARD_ISSUED: &str = "card_issued";
pub const ATTR_BOX_ID: &str = "box_id";
pub const ATTR_CARD_ID: &str = "card_id";
pub const ATTR_RARENESS: &str = "rareness";
pub const ATTR_DESIGN: &str = "design";

pub const EVENT_TYPE_CARD_UPGRADED: &str = "card_upgraded";
/// Emitted when an upgrade roll misses. The call itself succeeds.
pub const EVENT_TYPE_CARD_UPGRADE_FAILED: &str = "card_upgrade_failed";
pub const ATTR_LEVEL: &str = "level";
pub const ATTR_ROLL: &str = "roll";
