use cosmwasm_std::Addr;
use cw_storage_plus::Item;

/// Fixed at instantiation.
pub const OWNER: Item<Addr> = Item::new("owner");
/// Absent until the first upgrade.
pub const IMPLEMENTATION: Item<Addr> = Item::new("implementation");
/// Title of the topic whose forwarded call is awaiting its reply.
pub const PENDING_TOPIC: Item<String> = Item::new("pending_topic");
