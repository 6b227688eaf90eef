use consensus_common::query::LeadersResponse;
use consensus_common::types::{group_exists, Leader};
use consensus_common::validator;
use cosmwasm_std::{Addr, Deps, DepsMut, MessageInfo, Response, StdResult, Storage};

use crate::contract::validate_page;
use crate::error::ContractError;
use crate::state::{load_leader, COUNSELORS, LEADERS, LEADER_LIST, MANAGER};

pub(crate) fn assert_manager(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    if MANAGER.load(deps.storage)? != *sender {
        return Err(ContractError::OnlyManager {});
    }
    Ok(())
}

/// The council is the manager together with every counselor.
pub(crate) fn assert_council(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    if MANAGER.load(deps.storage)? == *sender || COUNSELORS.has(deps.storage, sender.as_str()) {
        return Ok(());
    }
    Err(ContractError::OnlyCouncil {})
}

fn validate_wallet(deps: Deps, wallet: &str) -> Result<Addr, ContractError> {
    if !validator::is_valid_address(wallet) {
        return Err(ContractError::NullAddress {});
    }
    Ok(deps.api.addr_validate(wallet)?)
}

pub fn execute_add_leader(
    deps: DepsMut,
    info: MessageInfo,
    wallet: String,
    group_id: u8,
) -> Result<Response, ContractError> {
    assert_council(deps.as_ref(), &info.sender)?;
    let wallet = validate_wallet(deps.as_ref(), &wallet)?;
    if !group_exists(group_id) {
        return Err(ContractError::GroupDoesNotExist {});
    }

    let manager = MANAGER.load(deps.storage)?;
    let mut leader = load_leader(deps.storage, &wallet)?;
    leader.group = group_id;
    leader.is_manager = leader.is_manager || wallet == manager;

    LEADERS.save(deps.storage, &wallet, &leader)?;
    LEADER_LIST.save(deps.storage, wallet.as_str(), &wallet)?;

    Ok(Response::new()
        .add_attribute("action", "add_leader")
        .add_attribute("sender", info.sender)
        .add_attribute("wallet", wallet)
        .add_attribute("group_id", group_id.to_string()))
}

/// Drops `wallet` from its group. The record is kept so its payment history
/// survives, but the group and both roles are cleared.
pub fn execute_remove_leader(
    deps: DepsMut,
    info: MessageInfo,
    wallet: String,
    group_id: u8,
) -> Result<Response, ContractError> {
    assert_manager(deps.as_ref(), &info.sender)?;
    if !group_exists(group_id) {
        return Err(ContractError::GroupDoesNotExist {});
    }
    let wallet = validate_wallet(deps.as_ref(), &wallet)?;

    let mut leader = load_leader(deps.storage, &wallet)?;
    if leader.group != group_id {
        return Err(ContractError::WrongGroup {});
    }

    leader.group = 0;
    leader.is_counselor = false;
    leader.is_manager = false;
    LEADERS.save(deps.storage, &wallet, &leader)?;
    LEADER_LIST.remove(deps.storage, wallet.as_str())?;
    COUNSELORS.remove(deps.storage, wallet.as_str())?;

    Ok(Response::new()
        .add_attribute("action", "remove_leader")
        .add_attribute("wallet", wallet)
        .add_attribute("group_id", group_id.to_string()))
}

pub fn execute_set_manager(
    deps: DepsMut,
    info: MessageInfo,
    new_manager: String,
) -> Result<Response, ContractError> {
    assert_manager(deps.as_ref(), &info.sender)?;
    let new_manager = validate_wallet(deps.as_ref(), &new_manager)?;
    if new_manager == info.sender {
        return Err(ContractError::SameManager {});
    }

    replace_manager(deps.storage, &info.sender, &new_manager)?;

    Ok(Response::new()
        .add_attribute("action", "set_manager")
        .add_attribute("previous_manager", info.sender)
        .add_attribute("manager", new_manager))
}

/// Installs `incoming` as the manager and moves the manager flag between
/// the two leader records, for whichever of them leads a group.
pub(crate) fn replace_manager(
    store: &mut dyn Storage,
    outgoing: &Addr,
    incoming: &Addr,
) -> StdResult<()> {
    let mut previous = load_leader(store, outgoing)?;
    if previous.is_leader() {
        previous.is_manager = false;
        LEADERS.save(store, outgoing, &previous)?;
    }

    let mut next = load_leader(store, incoming)?;
    if next.is_leader() {
        next.is_manager = true;
        LEADERS.save(store, incoming, &next)?;
    }

    MANAGER.save(store, incoming)
}

pub fn execute_set_counselor(
    deps: DepsMut,
    info: MessageInfo,
    wallet: String,
    is_counselor: bool,
) -> Result<Response, ContractError> {
    assert_manager(deps.as_ref(), &info.sender)?;
    let wallet = validate_wallet(deps.as_ref(), &wallet)?;

    let mut leader = load_leader(deps.storage, &wallet)?;
    if is_counselor {
        if !leader.is_leader() {
            return Err(ContractError::CounselorNotLeader {});
        }
        if leader.is_counselor {
            return Err(ContractError::CounselorAlreadyExists {});
        }
        COUNSELORS.save(deps.storage, wallet.as_str(), &wallet)?;
    } else {
        if !leader.is_counselor {
            return Err(ContractError::CounselorDoesNotExist {});
        }
        COUNSELORS.remove(deps.storage, wallet.as_str())?;
    }

    leader.is_counselor = is_counselor;
    LEADERS.save(deps.storage, &wallet, &leader)?;

    Ok(Response::new()
        .add_attribute("action", "set_counselor")
        .add_attribute("wallet", wallet)
        .add_attribute("is_counselor", is_counselor.to_string()))
}

pub fn query_leader(deps: Deps, wallet: String) -> Result<Leader, ContractError> {
    let wallet = deps.api.addr_validate(&wallet)?;
    Ok(load_leader(deps.storage, &wallet)?)
}

pub fn query_leaders(
    deps: Deps,
    page: u64,
    page_size: u64,
) -> Result<LeadersResponse, ContractError> {
    validate_page(page, page_size)?;

    let (wallets, total) = LEADER_LIST.page(deps.storage, page, page_size)?;
    let leaders = wallets
        .iter()
        .map(|wallet| load_leader(deps.storage, wallet))
        .collect::<StdResult<Vec<Leader>>>()?;

    Ok(LeadersResponse { leaders, total })
}

pub fn query_counselors(deps: Deps) -> StdResult<Vec<Addr>> {
    COUNSELORS.all(deps.storage)
}

pub fn query_is_leader(deps: Deps, wallet: String) -> Result<bool, ContractError> {
    Ok(query_leader(deps, wallet)?.is_leader())
}
