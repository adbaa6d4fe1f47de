use cosmwasm_schema::cw_serde;

pub use dkdao::{
    AddressResponse, IsExistRecordResponse, OwnerResponse, RecordResponse,
    RegistryQueryMsg as QueryMsg,
};

#[cw_serde]
pub struct InstantiateMsg {
    /// Defaults to the sender
    pub owner: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Stores `address` under (domain, name). Overrides an existing record.
    Set {
        domain: String,
        name: String,
        address: String,
    },
    /// Like `Set` for many records at once. All lists must have the same length.
    BatchSet {
        domains: Vec<String>,
        names: Vec<String>,
        addresses: Vec<String>,
    },
    TransferOwnership { owner: String },
}
