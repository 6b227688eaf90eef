use cosmwasm_std::StdError;
use cw_utils::PaymentError;
use thiserror::Error;

/// Every variant renders as the exact reason string callers match on.
#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Invalid amount")]
    Payment(#[from] PaymentError),

    #[error("Only the manager can call this function")]
    OnlyManager {},

    #[error("Only the council members can call this function")]
    OnlyCouncil {},

    #[error("Only the group leaders can call this function")]
    OnlyLeaders {},

    // Raised when a leader's dues are overdue.
    #[error("The leader must be defaulter")]
    Defaulter {},

    #[error("Address can't be null")]
    NullAddress {},

    #[error("Group does not exists")]
    GroupDoesNotExist {},

    #[error("Leader does not belong to this group")]
    WrongGroup {},

    #[error("New manager can't be the current manager")]
    SameManager {},

    #[error("Counselor is not a leader")]
    CounselorNotLeader {},

    #[error("Counselor already exists")]
    CounselorAlreadyExists {},

    #[error("Counselor does not exists")]
    CounselorDoesNotExist {},

    #[error("Invalid amount")]
    InvalidAmount {},

    #[error("Payment already made")]
    PaymentAlreadyMade {},

    #[error("Payment not made")]
    PaymentNotMade {},

    #[error("Title can't be empty")]
    EmptyTitle {},

    #[error("Topic already exists")]
    TopicAlreadyExists {},

    #[error("Topic does not exists")]
    TopicDoesNotExist {},

    #[error("No amount allowed for this category")]
    AmountNotAllowed {},

    #[error("Only IDLE topics can be edited")]
    NotEditable {},

    #[error("No changes")]
    NoChanges {},

    #[error("Only IDLE topics can be open for voting")]
    NotOpenable {},

    #[error("Only VOTING topics can be voted")]
    NotVotable {},

    #[error("Option can't be EMPTY")]
    EmptyOption {},

    #[error("Leader already voted")]
    AlreadyVoted {},

    #[error("Only VOTING topics can be closed")]
    NotClosable {},

    #[error("You cannot close the voting because there are not enough votes")]
    NotEnoughVotes {},

    #[error("Only APPROVED SPENT topics can be used for transfers")]
    NotTransferable {},

    #[error("Insufficient funds")]
    InsufficientFunds {},

    #[error("Page must be greater than 0")]
    InvalidPage {},

    #[error("Page size must be greater than 0")]
    InvalidPageSize {},

    #[error("Unauthorized forwarder")]
    UnauthorizedForwarder {},

    #[error("Forwarded calls can not be nested")]
    NestedForward {},

    #[error("Denom can't be empty")]
    EmptyDenom {},

    #[error("Every quorum must be between 1 and the number of groups")]
    InvalidQuorum {},
}
