use crate::types::{Leader, Topic};
use cosmwasm_schema::cw_serde;

/// Response for the `leaders` query.
#[cw_serde]
pub struct LeadersResponse {
    pub leaders: Vec<Leader>,
    pub total: u64,
}

/// Response for the `topics` query.
#[cw_serde]
pub struct TopicsResponse {
    pub topics: Vec<Topic>,
    pub total: u64,
}

/// Bounds of a 1-indexed page within a list of `total` entries. Pages past
/// the end are empty.
pub fn page_bounds(page: u64, page_size: u64, total: u64) -> (u64, u64) {
    let start = (page.saturating_sub(1)).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    (start, end)
}
