use cosmwasm_schema::cw_serde;
use cosmwasm_std::Binary;

/// Envelope the adapter uses to call the implementation on behalf of the
/// original sender. `msg` holds the JSON of one governance execute message.
///
/// It serializes exactly like the implementation's `ExecuteMsg::ActAs`.
#[cw_serde]
pub enum ForwardMsg {
    ActAs { sender: String, msg: Binary },
}
