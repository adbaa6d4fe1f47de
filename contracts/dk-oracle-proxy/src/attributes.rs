//! Stable event attributes
//!
//! The attributes here should only be changed very carefully as it is likely that clients rely on them.

/// Which entry point/message type was executed
pub const ATTR_ACTION: &str = "action";

/// The controller on whose behalf a call was forwarded
pub const ATTR_CONTROLLER: &str = "controller";

/// The contract a call was forwarded to
pub const ATTR_TARGET: &str = "target";

/// Hex encoded 32 byte proof message (nonce and expiry) that was consumed
pub const ATTR_PROOF_MESSAGE: &str = "proof_message";

/// Number of expired nonces removed from storage in this call
pub const ATTR_PRUNED_NONCES: &str = "pruned_nonces";
