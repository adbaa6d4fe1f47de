pub mod attributes;
pub mod contract;
pub mod distribution;
pub mod error;
pub mod jobs;
pub mod msg;
pub mod state;

pub use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
