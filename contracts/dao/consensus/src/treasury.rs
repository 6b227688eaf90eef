use consensus_common::types::{group_exists, PAYMENT_INTERVAL_SECONDS};
use cosmwasm_std::{Addr, Deps, DepsMut, Env, MessageInfo, Response, Timestamp};
use cw_utils::must_pay;

use crate::error::ContractError;
use crate::state::{load_leader, CONFIG, MANAGER, MONTHLY_QUOTA, PAYMENTS};

/// Lets through leaders whose group has paid its dues. The manager is always
/// let through so a fresh deployment can bootstrap its first topics.
pub(crate) fn assert_leader_in_good_standing(
    deps: Deps,
    env: &Env,
    sender: &Addr,
) -> Result<(), ContractError> {
    if MANAGER.load(deps.storage)? == *sender {
        return Ok(());
    }

    let leader = load_leader(deps.storage, sender)?;
    if !leader.is_leader() {
        return Err(ContractError::OnlyLeaders {});
    }
    if leader.is_defaulter(env.block.time) {
        return Err(ContractError::Defaulter {});
    }
    Ok(())
}

/// Pays the monthly quota for `group_id` on behalf of the whole group. Anyone
/// may pay. The attached funds must match the quota exactly and the group's
/// previous period must have run out.
pub fn execute_pay_quota(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    group_id: u8,
) -> Result<Response, ContractError> {
    if !group_exists(group_id) {
        return Err(ContractError::GroupDoesNotExist {});
    }

    let config = CONFIG.load(deps.storage)?;
    let quota = MONTHLY_QUOTA.load(deps.storage)?;
    let paid = must_pay(&info, &config.denom)?;
    if paid != quota {
        return Err(ContractError::InvalidAmount {});
    }

    if let Some(due) = PAYMENTS.may_load(deps.storage, group_id)? {
        if due > env.block.time {
            return Err(ContractError::PaymentAlreadyMade {});
        }
    }

    let next_payment = env.block.time.plus_seconds(PAYMENT_INTERVAL_SECONDS);
    PAYMENTS.save(deps.storage, group_id, &next_payment)?;

    Ok(Response::new()
        .add_attribute("action", "pay_quota")
        .add_attribute("sender", info.sender)
        .add_attribute("group_id", group_id.to_string())
        .add_attribute("amount", paid)
        .add_attribute("next_payment", next_payment.seconds().to_string()))
}

pub fn query_payment(deps: Deps, group_id: u8) -> Result<Timestamp, ContractError> {
    if !group_exists(group_id) {
        return Err(ContractError::GroupDoesNotExist {});
    }
    PAYMENTS
        .may_load(deps.storage, group_id)?
        .ok_or(ContractError::PaymentNotMade {})
}

pub fn query_is_defaulter(deps: Deps, env: Env, leader: String) -> Result<bool, ContractError> {
    let leader = deps.api.addr_validate(&leader)?;
    Ok(load_leader(deps.storage, &leader)?.is_defaulter(env.block.time))
}
