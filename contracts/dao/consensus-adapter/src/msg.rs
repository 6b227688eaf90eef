use consensus_macros::{consensus_execute, consensus_query};
use cosmwasm_schema::{cw_serde, QueryResponses};

/// The instantiating address becomes the owner.
#[cw_serde]
pub struct InstantiateMsg {}

/// Every governance call is forwarded to the implementation on behalf of
/// the sender, along with the attached funds.
#[consensus_execute]
#[cw_serde]
pub enum ExecuteMsg {
    /// Points the adapter at a new implementation. Owner only.
    Upgrade { new_contract: String },
}

#[consensus_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Option<cosmwasm_std::Addr>)]
    ImplAddress {},
    #[returns(cosmwasm_std::Addr)]
    Owner {},
}

#[cw_serde]
pub struct MigrateMsg {}
