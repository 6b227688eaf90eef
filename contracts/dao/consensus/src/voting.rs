use consensus_common::types::{Category, Status, Vote, VoteOption};
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response};

use crate::error::ContractError;
use crate::membership::{assert_manager, replace_manager};
use crate::state::{BALLOTS, CONFIG, MANAGER, MONTHLY_QUOTA, TOPICS, VOTES};
use crate::topics::load_topic;
use crate::treasury::assert_leader_in_good_standing;

pub fn execute_open_voting(
    deps: DepsMut,
    info: MessageInfo,
    title: String,
) -> Result<Response, ContractError> {
    assert_manager(deps.as_ref(), &info.sender)?;

    let mut topic = load_topic(deps.as_ref(), &title)?;
    if topic.status != Status::Idle {
        return Err(ContractError::NotOpenable {});
    }

    topic.status = Status::Voting;
    topic.approve_count = 0;
    topic.deny_count = 0;
    TOPICS.save(deps.storage, &title, &topic)?;

    Ok(Response::new()
        .add_attribute("action", "open_voting")
        .add_attribute("title", title)
        .add_attribute("status", topic.status.to_string()))
}

/// Casts the sender's ballot. Ballots can not be changed once cast.
pub fn execute_vote(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    title: String,
    option: VoteOption,
) -> Result<Response, ContractError> {
    assert_leader_in_good_standing(deps.as_ref(), &env, &info.sender)?;

    let mut topic = load_topic(deps.as_ref(), &title)?;
    if topic.status != Status::Voting {
        return Err(ContractError::NotVotable {});
    }
    if option == VoteOption::Empty {
        return Err(ContractError::EmptyOption {});
    }

    let ballot = (title.as_str(), &info.sender);
    if BALLOTS.has(deps.storage, ballot) {
        return Err(ContractError::AlreadyVoted {});
    }
    BALLOTS.save(deps.storage, ballot, &option)?;

    match option {
        VoteOption::Yes => topic.approve_count += 1,
        VoteOption::No => topic.deny_count += 1,
        VoteOption::Empty => {}
    }
    TOPICS.save(deps.storage, &title, &topic)?;

    let mut votes = VOTES.may_load(deps.storage, &title)?.unwrap_or_default();
    votes.push(Vote {
        voter: info.sender.clone(),
        title: title.clone(),
        option,
    });
    VOTES.save(deps.storage, &title, &votes)?;

    Ok(Response::new()
        .add_attribute("action", "vote")
        .add_attribute("voter", info.sender)
        .add_attribute("title", title)
        .add_attribute("option", option.to_string()))
}

/// Settles a vote once the category's quorum of ballots is reached and
/// applies the topic's side effect when it is approved.
pub fn execute_close_voting(
    deps: DepsMut,
    info: MessageInfo,
    title: String,
) -> Result<Response, ContractError> {
    assert_manager(deps.as_ref(), &info.sender)?;

    let mut topic = load_topic(deps.as_ref(), &title)?;
    if topic.status != Status::Voting {
        return Err(ContractError::NotClosable {});
    }

    let config = CONFIG.load(deps.storage)?;
    if topic.number_of_votes() < config.quorum.min_votes(topic.category) {
        return Err(ContractError::NotEnoughVotes {});
    }

    topic.status = if topic.approve_count > topic.deny_count {
        Status::Approved
    } else {
        Status::Denied
    };
    TOPICS.save(deps.storage, &title, &topic)?;

    let mut response = Response::new()
        .add_attribute("action", "close_voting")
        .add_attribute("title", title)
        .add_attribute("status", topic.status.to_string())
        .add_attribute("approve_count", topic.approve_count.to_string())
        .add_attribute("deny_count", topic.deny_count.to_string());

    if topic.status != Status::Approved {
        return Ok(response);
    }

    match topic.category {
        Category::ChangeManager => {
            let outgoing = MANAGER.load(deps.storage)?;
            replace_manager(deps.storage, &outgoing, &topic.responsible)?;
            response = response.add_attribute("new_manager", topic.responsible);
        }
        Category::ChangeQuota => {
            MONTHLY_QUOTA.save(deps.storage, &topic.amount)?;
            response = response.add_attribute("new_quota", topic.amount);
        }
        Category::Decision | Category::Spent => {}
    }

    Ok(response)
}
