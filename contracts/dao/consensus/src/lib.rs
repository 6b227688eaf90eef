pub mod contract;
mod error;
pub mod msg;
pub mod state;

mod membership;
mod topics;
mod transfer;
mod treasury;
mod voting;


pub use crate::error::ContractError;
