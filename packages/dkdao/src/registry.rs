use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, QuerierWrapper, StdResult};

/// Queries served by the registry contract
#[cw_serde]
#[derive(QueryResponses)]
pub enum RegistryQueryMsg {
    /// Address stored under (domain, name), if any
    #[returns(AddressResponse)]
    GetAddress { domain: String, name: String },
    #[returns(IsExistRecordResponse)]
    IsExistRecord { domain: String, name: String },
    /// Reverse lookup
    #[returns(RecordResponse)]
    GetDomainAndName { address: String },
    #[returns(OwnerResponse)]
    Owner {},
}

#[cw_serde]
pub struct AddressResponse {
    pub address: Option<Addr>,
}

#[cw_serde]
pub struct IsExistRecordResponse {
    pub exists: bool,
}

#[cw_serde]
pub struct RecordResponse {
    /// `None` if the address is not registered
    pub record: Option<(String, String)>,
}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
}

/// Looks up a record in the registry
pub fn query_registered_address(
    querier: &QuerierWrapper,
    registry: &Addr,
    domain: &str,
    name: &str,
) -> StdResult<Option<Addr>> {
    let response: AddressResponse = querier.query_wasm_smart(
        registry,
        &RegistryQueryMsg::GetAddress {
            domain: domain.to_string(),
            name: name.to_string(),
        },
    )?;
    Ok(response.address)
}
