pub mod attributes;
pub mod contract;
pub mod error;
pub mod msg;
mod proof;
pub mod state;

pub use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
