use consensus_common::types::Quorum;
use consensus_macros::{consensus_execute, consensus_query};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    /// Defaults to the instantiating address.
    pub manager: Option<String>,
    /// Native denom quotas are paid and disbursed in.
    pub denom: String,
    /// Defaults to `DEFAULT_MONTHLY_QUOTA`.
    pub monthly_quota: Option<Uint128>,
    /// Defaults to `Quorum::default()`.
    pub quorum: Option<Quorum>,
    /// Contract trusted to call on behalf of other senders, usually the adapter.
    pub forwarder: Option<String>,
}

#[consensus_execute]
#[cw_serde]
pub enum ExecuteMsg {
    /// Runs `msg` as if it was sent by `sender`. Must be called by the forwarder.
    ActAs { sender: String, msg: Binary },
    /// Replaces the trusted forwarder. Must be called by the manager.
    SetForwarder { forwarder: Option<String> },
}

#[consensus_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},
}

#[cw_serde]
pub struct MigrateMsg {}
