use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Binary, Decimal, StdResult};

/// Work the oracle schedules for a revealed secret.
///
/// This is JSON encoded into the `context` of an RNG reveal and handed back
/// unchanged in the callback.
#[cw_serde]
pub enum DistributorJob {
    /// Serves an open request created by `ExecuteMsg::OpenBoxes`
    OpenBoxes { request_id: u64 },
    /// Rolls for a card upgrade which succeeds with probability `success_rate`
    UpgradeCard { card_id: u64, success_rate: Decimal },
}

impl DistributorJob {
    pub fn to_context(&self) -> StdResult<Binary> {
        to_json_binary(self)
    }
}
