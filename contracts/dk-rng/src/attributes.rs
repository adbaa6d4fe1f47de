//! Stable event attributes
//!
//! The attributes here should only be changed very carefully as it is likely that clients rely on them.

/// Which entry point/message type was executed
pub const ATTR_ACTION: &str = "action";

/// Index of the commitment that was added or revealed
pub const ATTR_INDEX: &str = "index";

/// Number of digests committed in a batch
pub const ATTR_COUNT: &str = "count";

/// Hex encoded digest or secret
pub const ATTR_DIGEST: &str = "digest";
pub const ATTR_SECRET: &str = "secret";

pub const ATTR_CONSUMER: &str = "consumer";

pub const EVENT_TYPE_CALLBACK: &str = "rng-callback";

/// "true"/"false" if the callback was successful or not
pub const ATTR_CALLBACK_SUCCESS: &str = "success";

/// The error message (used in case "success" is "false")
pub const ATTR_CALLBACK_ERROR_MSG: &str = "error_msg";
