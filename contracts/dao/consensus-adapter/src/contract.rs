#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, to_json_vec, Addr, Binary, ContractResult, Deps, DepsMut, Empty, Env,
    MessageInfo, QueryRequest, Reply, Response, StdError, SubMsg, SystemResult, Uint128,
    WasmMsg, WasmQuery,
};
use cw2::set_contract_version;
use serde::de::DeserializeOwned;

use consensus_common::msg::ForwardMsg;
use consensus_common::types::{Category, Status, Topic};
use consensus_common::validator;

use crate::error::ContractError;
use crate::events;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{IMPLEMENTATION, OWNER, PENDING_TOPIC};

pub(crate) const CONTRACT_NAME: &str = "crates.io:consensus-adapter";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const CLOSE_VOTING_REPLY_ID: u64 = 0;
const REMOVE_TOPIC_REPLY_ID: u64 = 1;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    _msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    OWNER.save(deps.storage, &info.sender)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Upgrade { new_contract } => execute_upgrade(deps, info, new_contract),
        msg => execute_forward(deps, info, msg),
    }
}

pub fn execute_upgrade(
    deps: DepsMut,
    info: MessageInfo,
    new_contract: String,
) -> Result<Response, ContractError> {
    if OWNER.load(deps.storage)? != info.sender {
        return Err(ContractError::OnlyOwner {});
    }
    if !validator::is_valid_address(&new_contract) {
        return Err(ContractError::ZeroAddress {});
    }

    let implementation = deps.api.addr_validate(&new_contract)?;
    IMPLEMENTATION.save(deps.storage, &implementation)?;

    Ok(Response::new()
        .add_attribute("action", "upgrade")
        .add_attribute("implementation", implementation))
}

fn load_implementation(deps: Deps) -> Result<Addr, ContractError> {
    IMPLEMENTATION
        .may_load(deps.storage)?
        .ok_or(ContractError::NotUpgraded {})
}

/// Sends `msg` to the implementation wrapped so that it runs as the
/// original sender. Calls that settle or delete a topic come back through
/// `reply` to emit the normalized events.
pub fn execute_forward(
    deps: DepsMut,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let implementation = load_implementation(deps.as_ref())?;

    let forward = WasmMsg::Execute {
        contract_addr: implementation.to_string(),
        msg: to_json_binary(&ForwardMsg::ActAs {
            sender: info.sender.to_string(),
            msg: to_json_binary(&msg)?,
        })?,
        funds: info.funds,
    };

    let response = Response::new()
        .add_attribute("action", "forward")
        .add_attribute("sender", info.sender)
        .add_attribute("implementation", implementation);

    match msg {
        ExecuteMsg::CloseVoting { title } => {
            PENDING_TOPIC.save(deps.storage, &title)?;
            Ok(response.add_submessage(SubMsg::reply_on_success(forward, CLOSE_VOTING_REPLY_ID)))
        }
        ExecuteMsg::RemoveTopic { title } => {
            PENDING_TOPIC.save(deps.storage, &title)?;
            Ok(response.add_submessage(SubMsg::reply_on_success(forward, REMOVE_TOPIC_REPLY_ID)))
        }
        _ => Ok(response.add_message(forward)),
    }
}

// ----------------------------------------
//  Queries
// ----------------------------------------
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::ImplAddress {} => Ok(to_json_binary(&IMPLEMENTATION.may_load(deps.storage)?)?),
        QueryMsg::Owner {} => Ok(to_json_binary(&OWNER.load(deps.storage)?)?),
        msg => forward_query(deps, &msg),
    }
}

/// Relays a query to the implementation and hands back its raw answer.
fn forward_query(deps: Deps, msg: &QueryMsg) -> Result<Binary, ContractError> {
    let implementation = load_implementation(deps)?;
    let request: QueryRequest<Empty> = WasmQuery::Smart {
        contract_addr: implementation.to_string(),
        msg: to_json_binary(msg)?,
    }
    .into();

    match deps.querier.raw_query(&to_json_vec(&request)?) {
        SystemResult::Err(system_err) => Err(StdError::generic_err(format!(
            "Querier system error: {system_err}"
        ))
        .into()),
        SystemResult::Ok(ContractResult::Err(msg)) => Err(ContractError::Implementation { msg }),
        SystemResult::Ok(ContractResult::Ok(value)) => Ok(value),
    }
}

fn query_implementation<T: DeserializeOwned>(
    deps: Deps,
    msg: &QueryMsg,
) -> Result<T, ContractError> {
    let implementation = load_implementation(deps)?;
    Ok(deps.querier.query_wasm_smart(implementation, msg)?)
}

// ----------------------------------------
//  Replies
// ----------------------------------------
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    let title = PENDING_TOPIC.load(deps.storage)?;
    PENDING_TOPIC.remove(deps.storage);
    deps.api
        .debug(&format!("consensus-adapter: reply {} for topic {}", msg.id, title));

    match msg.id {
        CLOSE_VOTING_REPLY_ID => reply_close_voting(deps.as_ref(), title),
        REMOVE_TOPIC_REPLY_ID => Ok(Response::new()
            .add_attribute("action", "remove_topic_reply")
            .add_event(events::topic_changed(&title, Status::Deleted))),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

/// Reads the settled topic back and reports the outcome along with the
/// side effect an approved topic had.
fn reply_close_voting(deps: Deps, title: String) -> Result<Response, ContractError> {
    let topic: Topic = query_implementation(
        deps,
        &QueryMsg::Topic {
            title: title.clone(),
        },
    )?;

    let mut response = Response::new()
        .add_attribute("action", "close_voting_reply")
        .add_event(events::topic_changed(&title, topic.status));

    if topic.status == Status::Approved {
        match topic.category {
            Category::ChangeManager => {
                let manager: Addr = query_implementation(deps, &QueryMsg::Manager {})?;
                response = response.add_event(events::manager_changed(&manager));
            }
            Category::ChangeQuota => {
                let quota: Uint128 = query_implementation(deps, &QueryMsg::Quota {})?;
                response = response.add_event(events::quota_changed(quota));
            }
            Category::Decision | Category::Spent => {}
        }
    }

    Ok(response)
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
