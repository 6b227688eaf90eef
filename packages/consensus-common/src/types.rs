use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};

/// Highest group id. Group `0` marks a wallet that is not a leader.
pub const MAX_GROUPS: u8 = 50;

/// Time a quota payment keeps a leader in good standing.
pub const PAYMENT_INTERVAL_SECONDS: u64 = 30 * 24 * 60 * 60;

/// Monthly quota at genesis, 0.01 of an 18-decimal token.
pub const DEFAULT_MONTHLY_QUOTA: u128 = 10_000_000_000_000_000;

/// Returns true if `group_id` names one of the member groups.
pub fn group_exists(group_id: u8) -> bool {
    group_id > 0 && group_id <= MAX_GROUPS
}

#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum Category {
    /// A plain decision with no side effect.
    Decision,
    /// A disbursement of `amount` to the topic's responsible.
    Spent,
    /// Replaces the monthly quota with `amount`.
    ChangeQuota,
    /// Replaces the manager with the topic's responsible.
    ChangeManager,
}

impl Category {
    /// Only these categories may carry a non-zero amount.
    pub fn allows_amount(&self) -> bool {
        matches!(self, Category::Spent | Category::ChangeQuota)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Decision => write!(f, "decision"),
            Category::Spent => write!(f, "spent"),
            Category::ChangeQuota => write!(f, "change_quota"),
            Category::ChangeManager => write!(f, "change_manager"),
        }
    }
}

#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum Status {
    /// Created, editable, not yet open for ballots.
    Idle,
    /// Accepting ballots.
    Voting,
    Approved,
    Denied,
    /// An approved disbursement that has been paid out. Terminal.
    Spent,
    /// Only reported by the adapter once a topic has been removed.
    Deleted,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Idle => write!(f, "idle"),
            Status::Voting => write!(f, "voting"),
            Status::Approved => write!(f, "approved"),
            Status::Denied => write!(f, "denied"),
            Status::Spent => write!(f, "spent"),
            Status::Deleted => write!(f, "deleted"),
        }
    }
}

#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum VoteOption {
    Empty,
    Yes,
    No,
}

impl std::fmt::Display for VoteOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteOption::Empty => write!(f, "empty"),
            VoteOption::Yes => write!(f, "yes"),
            VoteOption::No => write!(f, "no"),
        }
    }
}

/// A wallet's membership record. Unknown wallets read back as a record with
/// `group == 0` and no roles.
#[cw_serde]
pub struct Leader {
    pub wallet: Addr,
    pub group: u8,
    pub is_counselor: bool,
    pub is_manager: bool,
    /// Until when the last quota payment of the wallet's group is valid.
    pub next_payment: Timestamp,
}

impl Leader {
    pub fn new(wallet: Addr) -> Self {
        Leader {
            wallet,
            group: 0,
            is_counselor: false,
            is_manager: false,
            next_payment: Timestamp::from_seconds(0),
        }
    }

    pub fn is_leader(&self) -> bool {
        self.group > 0
    }

    /// A wallet is a defaulter once its group's paid period has lapsed.
    /// Groups that never paid are in default.
    pub fn is_defaulter(&self, now: Timestamp) -> bool {
        self.next_payment < now
    }
}

#[cw_serde]
pub struct Topic {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub amount: Uint128,
    pub responsible: Addr,
    pub status: Status,
    pub created_at: Timestamp,
    pub approve_count: u64,
    pub deny_count: u64,
}

impl Topic {
    /// The zero-valued record returned when looking up a missing title.
    pub fn empty() -> Self {
        Topic {
            title: String::new(),
            description: String::new(),
            category: Category::Decision,
            amount: Uint128::zero(),
            responsible: Addr::unchecked(""),
            status: Status::Idle,
            created_at: Timestamp::from_seconds(0),
            approve_count: 0,
            deny_count: 0,
        }
    }

    pub fn number_of_votes(&self) -> u64 {
        self.approve_count + self.deny_count
    }
}

#[cw_serde]
pub struct Vote {
    pub voter: Addr,
    pub title: String,
    pub option: VoteOption,
}

/// Minimum number of cast ballots needed to close a vote, per category.
#[cw_serde]
#[derive(Copy, Eq)]
pub struct Quorum {
    pub decision: u64,
    pub spent: u64,
    pub change_quota: u64,
    pub change_manager: u64,
}

impl Default for Quorum {
    fn default() -> Self {
        Quorum {
            decision: 5,
            spent: 9,
            change_quota: 10,
            change_manager: 18,
        }
    }
}

impl Quorum {
    pub fn min_votes(&self, category: Category) -> u64 {
        match category {
            Category::Decision => self.decision,
            Category::Spent => self.spent,
            Category::ChangeQuota => self.change_quota,
            Category::ChangeManager => self.change_manager,
        }
    }

    /// Every threshold must be reachable by the member groups.
    pub fn is_valid(&self) -> bool {
        [
            self.decision,
            self.spent,
            self.change_quota,
            self.change_manager,
        ]
        .iter()
        .all(|min| *min > 0 && *min <= MAX_GROUPS as u64)
    }
}
