//! Normalized events emitted after calls that settle or delete a topic.

use consensus_common::types::Status;
use cosmwasm_std::{Addr, Event, HexBinary, Uint128};
use sha3::{Digest, Keccak256};

/// Keccak-256 of the title, the stable id indexers key topics by.
pub fn topic_id(title: &str) -> HexBinary {
    HexBinary::from(Keccak256::digest(title.as_bytes()).to_vec())
}

pub fn topic_changed(title: &str, status: Status) -> Event {
    Event::new("topic_changed")
        .add_attribute("topic_id", format!("0x{}", topic_id(title).to_hex()))
        .add_attribute("title", title)
        .add_attribute("status", status.to_string())
}

pub fn manager_changed(manager: &Addr) -> Event {
    Event::new("manager_changed").add_attribute("manager", manager)
}

pub fn quota_changed(quota: Uint128) -> Event {
    Event::new("quota_changed").add_attribute("quota", quota)
}
