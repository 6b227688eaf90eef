use consensus_common::query::page_bounds;
use consensus_common::types::{Leader, Quorum, Topic, Vote, VoteOption};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Configuration.
#[cw_serde]
pub struct Config {
    /// Native denom quotas are paid and disbursed in.
    pub denom: String,
    /// Minimum number of ballots needed to close a vote, per category.
    pub quorum: Quorum,
    /// Contract allowed to act on behalf of other senders.
    pub forwarder: Option<Addr>,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const MANAGER: Item<Addr> = Item::new("manager");
pub const MONTHLY_QUOTA: Item<Uint128> = Item::new("monthly_quota");

/// Membership records, kept after removal with `group == 0`.
pub const LEADERS: Map<&Addr, Leader> = Map::new("leaders");
/// Wallets currently leading a group.
pub const LEADER_LIST: SwapList<Addr> =
    SwapList::new("leader_list", "leader_list_keys", "leader_list_pos", "leader_list_len");
pub const COUNSELORS: SwapList<Addr> =
    SwapList::new("counselors", "counselors_keys", "counselors_pos", "counselors_len");

/// Until when each group's last quota payment is valid. This is the only
/// record of dues; leader records mirror it on load.
pub const PAYMENTS: Map<u8, Timestamp> = Map::new("payments");

pub const TOPICS: SwapList<Topic> =
    SwapList::new("topics", "topics_keys", "topics_pos", "topics_len");
/// Ballots per topic title, in casting order.
pub const VOTES: Map<&str, Vec<Vote>> = Map::new("votes");
pub const BALLOTS: Map<(&str, &Addr), VoteOption> = Map::new("ballots");

/// A string-keyed list stored as a dense index arena.
///
/// Removal moves the last entry into the freed slot, so the relative order
/// of the remaining entries is only preserved before the removed position
/// and for the untouched tail.
pub struct SwapList<T> {
    entries: Map<u64, T>,
    keys: Map<u64, String>,
    positions: Map<&'static str, u64>,
    len: Item<u64>,
}

impl<T> SwapList<T> {
    pub const fn new(
        entries: &'static str,
        keys: &'static str,
        positions: &'static str,
        len: &'static str,
    ) -> Self {
        SwapList {
            entries: Map::new(entries),
            keys: Map::new(keys),
            positions: Map::new(positions),
            len: Item::new(len),
        }
    }
}

impl<T> SwapList<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn len(&self, store: &dyn Storage) -> StdResult<u64> {
        Ok(self.len.may_load(store)?.unwrap_or_default())
    }

    pub fn has(&self, store: &dyn Storage, key: &str) -> bool {
        self.positions.has(store, key)
    }

    pub fn may_load(&self, store: &dyn Storage, key: &str) -> StdResult<Option<T>> {
        match self.positions.may_load(store, key)? {
            Some(index) => self.entries.may_load(store, index),
            None => Ok(None),
        }
    }

    /// Appends a new entry or overwrites the entry stored under `key`.
    pub fn save(&self, store: &mut dyn Storage, key: &str, value: &T) -> StdResult<()> {
        if let Some(index) = self.positions.may_load(store, key)? {
            return self.entries.save(store, index, value);
        }

        let index = self.len(store)?;
        self.entries.save(store, index, value)?;
        self.keys.save(store, index, &key.to_string())?;
        self.positions.save(store, key, &index)?;
        self.len.save(store, &(index + 1))
    }

    /// Removes the entry under `key`, filling its slot with the last entry.
    /// Returns false if there was nothing to remove.
    pub fn remove(&self, store: &mut dyn Storage, key: &str) -> StdResult<bool> {
        let index = match self.positions.may_load(store, key)? {
            Some(index) => index,
            None => return Ok(false),
        };
        let last = self.len(store)? - 1;

        if index != last {
            let moved = self.entries.load(store, last)?;
            let moved_key = self.keys.load(store, last)?;
            self.entries.save(store, index, &moved)?;
            self.keys.save(store, index, &moved_key)?;
            self.positions.save(store, moved_key.as_str(), &index)?;
        }

        self.entries.remove(store, last);
        self.keys.remove(store, last);
        self.positions.remove(store, key);
        self.len.save(store, &last)?;
        Ok(true)
    }

    /// Returns the 1-indexed page of entries together with the total count.
    pub fn page(
        &self,
        store: &dyn Storage,
        page: u64,
        page_size: u64,
    ) -> StdResult<(Vec<T>, u64)> {
        let total = self.len(store)?;
        let (start, end) = page_bounds(page, page_size, total);
        let entries = (start..end)
            .map(|index| self.entries.load(store, index))
            .collect::<StdResult<Vec<T>>>()?;
        Ok((entries, total))
    }

    pub fn all(&self, store: &dyn Storage) -> StdResult<Vec<T>> {
        let total = self.len(store)?;
        (0..total)
            .map(|index| self.entries.load(store, index))
            .collect()
    }
}

/// Loads the membership record of `wallet`, or an empty one. The due date
/// is always read from the payment slot of the wallet's current group.
pub fn load_leader(store: &dyn Storage, wallet: &Addr) -> StdResult<Leader> {
    let mut leader = LEADERS
        .may_load(store, wallet)?
        .unwrap_or_else(|| Leader::new(wallet.clone()));
    leader.next_payment = if leader.is_leader() {
        PAYMENTS
            .may_load(store, leader.group)?
            .unwrap_or(Timestamp::from_seconds(0))
    } else {
        Timestamp::from_seconds(0)
    };
    Ok(leader)
}
