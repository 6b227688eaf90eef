use consensus_common::types::{Category, Status};
use cosmwasm_std::{coins, BankMsg, DepsMut, Env, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::membership::assert_manager;
use crate::state::{CONFIG, TOPICS};
use crate::topics::load_topic;

/// Pays out an approved SPENT topic to its responsible. Any successful
/// transfer settles the topic, even when less than its amount is drawn.
pub fn execute_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    title: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    assert_manager(deps.as_ref(), &info.sender)?;

    let mut topic = load_topic(deps.as_ref(), &title)?;
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {});
    }

    let config = CONFIG.load(deps.storage)?;
    let balance = deps
        .querier
        .query_balance(&env.contract.address, &config.denom)?
        .amount;
    if amount > topic.amount || amount > balance {
        return Err(ContractError::InsufficientFunds {});
    }

    if topic.status != Status::Approved || topic.category != Category::Spent {
        return Err(ContractError::NotTransferable {});
    }

    // status is settled before the funds leave
    topic.status = Status::Spent;
    TOPICS.save(deps.storage, &title, &topic)?;

    let send = BankMsg::Send {
        to_address: topic.responsible.to_string(),
        amount: coins(amount.u128(), &config.denom),
    };

    Ok(Response::new()
        .add_message(send)
        .add_attribute("action", "transfer")
        .add_attribute("title", title)
        .add_attribute("to", topic.responsible)
        .add_attribute("amount", amount))
}
