use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Only owner can upgrade")]
    OnlyOwner {},

    #[error("New contract address cannot be 0")]
    ZeroAddress {},

    #[error("Contract not upgraded")]
    NotUpgraded {},

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },

    /// A failure reported by the installed implementation, passed on as is.
    #[error("{msg}")]
    Implementation { msg: String },
}
