use consensus_common::query::TopicsResponse;
use consensus_common::types::{Category, Status, Topic, Vote};
use consensus_common::validator;
use cosmwasm_std::{Addr, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Uint128};

use crate::contract::validate_page;
use crate::error::ContractError;
use crate::membership::assert_manager;
use crate::state::{BALLOTS, TOPICS, VOTES};
use crate::treasury::assert_leader_in_good_standing;

pub(crate) fn load_topic(deps: Deps, title: &str) -> Result<Topic, ContractError> {
    TOPICS
        .may_load(deps.storage, title)?
        .ok_or(ContractError::TopicDoesNotExist {})
}

/// Treats a missing or blank responsible as "not provided".
fn validate_responsible(deps: Deps, responsible: Option<String>) -> StdResult<Option<Addr>> {
    responsible
        .filter(|responsible| validator::is_valid_address(responsible))
        .map(|responsible| deps.api.addr_validate(&responsible))
        .transpose()
}

#[allow(clippy::too_many_arguments)]
pub fn execute_add_topic(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    title: String,
    description: String,
    category: Category,
    amount: Uint128,
    responsible: Option<String>,
) -> Result<Response, ContractError> {
    assert_leader_in_good_standing(deps.as_ref(), &env, &info.sender)?;

    if !validator::is_valid_string(&title) {
        return Err(ContractError::EmptyTitle {});
    }
    if TOPICS.has(deps.storage, &title) {
        return Err(ContractError::TopicAlreadyExists {});
    }
    if !amount.is_zero() && !category.allows_amount() {
        return Err(ContractError::AmountNotAllowed {});
    }

    let responsible =
        validate_responsible(deps.as_ref(), responsible)?.unwrap_or_else(|| info.sender.clone());

    let topic = Topic {
        title,
        description,
        category,
        amount,
        responsible,
        status: Status::Idle,
        created_at: env.block.time,
        approve_count: 0,
        deny_count: 0,
    };
    TOPICS.save(deps.storage, &topic.title, &topic)?;

    Ok(Response::new()
        .add_attribute("action", "add_topic")
        .add_attribute("sender", info.sender)
        .add_attribute("title", topic.title)
        .add_attribute("category", topic.category.to_string())
        .add_attribute("amount", topic.amount)
        .add_attribute("responsible", topic.responsible))
}

/// Edits an IDLE topic. An absent responsible keeps the current one.
pub fn execute_edit_topic(
    deps: DepsMut,
    info: MessageInfo,
    title: String,
    description: String,
    amount: Uint128,
    responsible: Option<String>,
) -> Result<Response, ContractError> {
    assert_manager(deps.as_ref(), &info.sender)?;

    let mut topic = load_topic(deps.as_ref(), &title)?;
    if topic.status != Status::Idle {
        return Err(ContractError::NotEditable {});
    }

    let responsible =
        validate_responsible(deps.as_ref(), responsible)?.unwrap_or(topic.responsible.clone());
    if description == topic.description
        && amount == topic.amount
        && responsible == topic.responsible
    {
        return Err(ContractError::NoChanges {});
    }
    if !amount.is_zero() && !topic.category.allows_amount() {
        return Err(ContractError::AmountNotAllowed {});
    }

    topic.description = description;
    topic.amount = amount;
    topic.responsible = responsible;
    TOPICS.save(deps.storage, &title, &topic)?;

    Ok(Response::new()
        .add_attribute("action", "edit_topic")
        .add_attribute("title", title)
        .add_attribute("amount", topic.amount)
        .add_attribute("responsible", topic.responsible))
}

/// Deletes a topic in any status together with its ballots.
pub fn execute_remove_topic(
    deps: DepsMut,
    info: MessageInfo,
    title: String,
) -> Result<Response, ContractError> {
    assert_manager(deps.as_ref(), &info.sender)?;

    if !TOPICS.remove(deps.storage, &title)? {
        return Err(ContractError::TopicDoesNotExist {});
    }

    let votes = VOTES.may_load(deps.storage, &title)?.unwrap_or_default();
    for vote in votes.iter() {
        BALLOTS.remove(deps.storage, (title.as_str(), &vote.voter));
    }
    VOTES.remove(deps.storage, &title);

    Ok(Response::new()
        .add_attribute("action", "remove_topic")
        .add_attribute("title", title)
        .add_attribute("status", Status::Deleted.to_string()))
}

/// Unlike the other lookups, a missing title is not an error here: the
/// zero-valued topic is returned instead.
pub fn query_topic(deps: Deps, title: String) -> StdResult<Topic> {
    Ok(TOPICS
        .may_load(deps.storage, &title)?
        .unwrap_or_else(Topic::empty))
}

pub fn query_topics(
    deps: Deps,
    page: u64,
    page_size: u64,
) -> Result<TopicsResponse, ContractError> {
    validate_page(page, page_size)?;
    let (topics, total) = TOPICS.page(deps.storage, page, page_size)?;
    Ok(TopicsResponse { topics, total })
}

pub fn query_votes(deps: Deps, title: String) -> StdResult<Vec<Vote>> {
    Ok(VOTES.may_load(deps.storage, &title)?.unwrap_or_default())
}

pub fn query_number_of_votes(deps: Deps, title: String) -> StdResult<u64> {
    Ok(query_topic(deps, title)?.number_of_votes())
}
