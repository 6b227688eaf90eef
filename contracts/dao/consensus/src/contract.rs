#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    from_json, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, Uint128,
};
use cw2::set_contract_version;

use consensus_common::types::{group_exists, DEFAULT_MONTHLY_QUOTA};
use consensus_common::validator;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{Config, CONFIG, MANAGER, MONTHLY_QUOTA};
use crate::{membership, topics, transfer, treasury, voting};

pub(crate) const CONTRACT_NAME: &str = "crates.io:consensus";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if !validator::is_valid_string(&msg.denom) {
        return Err(ContractError::EmptyDenom {});
    }

    let quorum = msg.quorum.unwrap_or_default();
    if !quorum.is_valid() {
        return Err(ContractError::InvalidQuorum {});
    }

    let manager = msg
        .manager
        .map(|manager| deps.api.addr_validate(&manager))
        .transpose()?
        .unwrap_or(info.sender);
    let forwarder = msg
        .forwarder
        .map(|forwarder| deps.api.addr_validate(&forwarder))
        .transpose()?;
    let quota = msg
        .monthly_quota
        .unwrap_or_else(|| Uint128::new(DEFAULT_MONTHLY_QUOTA));

    let config = Config {
        denom: msg.denom,
        quorum,
        forwarder,
    };
    CONFIG.save(deps.storage, &config)?;
    MANAGER.save(deps.storage, &manager)?;
    MONTHLY_QUOTA.save(deps.storage, &quota)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("manager", manager)
        .add_attribute("denom", config.denom)
        .add_attribute("monthly_quota", quota))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::ActAs { sender, msg } => execute_act_as(deps, env, info, sender, msg),
        msg => dispatch(deps, env, info, msg),
    }
}

/// Runs a governance call on behalf of `sender`. Only the configured
/// forwarder may do this; the attached funds travel with the call.
pub fn execute_act_as(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    sender: String,
    msg: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.forwarder.as_ref() != Some(&info.sender) {
        return Err(ContractError::UnauthorizedForwarder {});
    }

    let inner: ExecuteMsg = from_json(&msg)?;
    deps.api
        .debug(&format!("consensus: {} acting as {}", info.sender, sender));
    let acting = MessageInfo {
        sender: deps.api.addr_validate(&sender)?,
        funds: info.funds,
    };

    Ok(dispatch(deps, env, acting, inner)?.add_attribute("forwarder", info.sender))
}

fn dispatch(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::ActAs { .. } => Err(ContractError::NestedForward {}),
        ExecuteMsg::SetForwarder { forwarder } => execute_set_forwarder(deps, info, forwarder),
        ExecuteMsg::AddLeader { wallet, group_id } => {
            membership::execute_add_leader(deps, info, wallet, group_id)
        }
        ExecuteMsg::RemoveLeader { wallet, group_id } => {
            membership::execute_remove_leader(deps, info, wallet, group_id)
        }
        ExecuteMsg::SetManager { new_manager } => {
            membership::execute_set_manager(deps, info, new_manager)
        }
        ExecuteMsg::SetCounselor {
            wallet,
            is_counselor,
        } => membership::execute_set_counselor(deps, info, wallet, is_counselor),
        ExecuteMsg::PayQuota { group_id } => treasury::execute_pay_quota(deps, env, info, group_id),
        ExecuteMsg::AddTopic {
            title,
            description,
            category,
            amount,
            responsible,
        } => topics::execute_add_topic(
            deps,
            env,
            info,
            title,
            description,
            category,
            amount,
            responsible,
        ),
        ExecuteMsg::EditTopic {
            title,
            description,
            amount,
            responsible,
        } => topics::execute_edit_topic(deps, info, title, description, amount, responsible),
        ExecuteMsg::RemoveTopic { title } => topics::execute_remove_topic(deps, info, title),
        ExecuteMsg::OpenVoting { title } => voting::execute_open_voting(deps, info, title),
        ExecuteMsg::Vote { title, option } => voting::execute_vote(deps, env, info, title, option),
        ExecuteMsg::CloseVoting { title } => voting::execute_close_voting(deps, info, title),
        ExecuteMsg::Transfer { title, amount } => {
            transfer::execute_transfer(deps, env, info, title, amount)
        }
    }
}

pub fn execute_set_forwarder(
    deps: DepsMut,
    info: MessageInfo,
    forwarder: Option<String>,
) -> Result<Response, ContractError> {
    membership::assert_manager(deps.as_ref(), &info.sender)?;

    let forwarder = forwarder
        .filter(|forwarder| validator::is_valid_address(forwarder))
        .map(|forwarder| deps.api.addr_validate(&forwarder))
        .transpose()?;

    let mut config = CONFIG.load(deps.storage)?;
    config.forwarder = forwarder;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_forwarder")
        .add_attribute(
            "forwarder",
            config
                .forwarder
                .map(|forwarder| forwarder.to_string())
                .unwrap_or_default(),
        ))
}

/// Rejects the zero page and the zero page size of 1-indexed pagination.
pub(crate) fn validate_page(page: u64, page_size: u64) -> Result<(), ContractError> {
    if page == 0 {
        return Err(ContractError::InvalidPage {});
    }
    if page_size == 0 {
        return Err(ContractError::InvalidPageSize {});
    }
    Ok(())
}

// ----------------------------------------
//  Queries
// ----------------------------------------
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::Config {} => Ok(to_json_binary(&CONFIG.load(deps.storage)?)?),
        QueryMsg::Leader { wallet } => Ok(to_json_binary(&membership::query_leader(
            deps, wallet,
        )?)?),
        QueryMsg::Leaders { page, page_size } => Ok(to_json_binary(
            &membership::query_leaders(deps, page, page_size)?,
        )?),
        QueryMsg::Counselors {} => Ok(to_json_binary(&membership::query_counselors(deps)?)?),
        QueryMsg::Manager {} => Ok(to_json_binary(&MANAGER.load(deps.storage)?)?),
        QueryMsg::IsLeader { wallet } => Ok(to_json_binary(&membership::query_is_leader(
            deps, wallet,
        )?)?),
        QueryMsg::GroupExists { group_id } => Ok(to_json_binary(&group_exists(group_id))?),
        QueryMsg::Quota {} => Ok(to_json_binary(&MONTHLY_QUOTA.load(deps.storage)?)?),
        QueryMsg::Payment { group_id } => Ok(to_json_binary(&treasury::query_payment(
            deps, group_id,
        )?)?),
        QueryMsg::IsDefaulter { leader } => Ok(to_json_binary(&treasury::query_is_defaulter(
            deps, env, leader,
        )?)?),
        QueryMsg::Topic { title } => Ok(to_json_binary(&topics::query_topic(deps, title)?)?),
        QueryMsg::Topics { page, page_size } => Ok(to_json_binary(&topics::query_topics(
            deps, page, page_size,
        )?)?),
        QueryMsg::Votes { title } => Ok(to_json_binary(&topics::query_votes(deps, title)?)?),
        QueryMsg::NumberOfVotes { title } => Ok(to_json_binary(
            &topics::query_number_of_votes(deps, title)?,
        )?),
    }
}

// ----------------------------------------
//  Migration
// ----------------------------------------
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    // Set contract to version to latest
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default())
}
