use crate::events::topic_id;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use consensus::msg::InstantiateMsg as ConsensusInstantiateMsg;
use consensus_common::query::TopicsResponse;
use consensus_common::types::{
    Category, Leader, Quorum, Status, Topic, VoteOption, DEFAULT_MONTHLY_QUOTA,
};
use cosmwasm_std::{coins, Addr, Coin, Empty, StdResult, Uint128};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use serde::de::DeserializeOwned;

const DENOM: &str = "untrn";

fn adapter_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crate::contract::execute,
        crate::contract::instantiate,
        crate::contract::query,
    )
    .with_reply(crate::contract::reply);
    Box::new(contract)
}

fn consensus_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        consensus::contract::execute,
        consensus::contract::instantiate,
        consensus::contract::query,
    );
    Box::new(contract)
}

fn error_message(err: anyhow::Error) -> String {
    err.root_cause().to_string()
}

fn wasm_event_attr(res: &AppResponse, ty: &str, key: &str) -> Option<String> {
    res.events
        .iter()
        .find(|event| event.ty == format!("wasm-{ty}"))
        .and_then(|event| event.attributes.iter().find(|attr| attr.key == key))
        .map(|attr| attr.value.clone())
}

fn has_wasm_event(res: &AppResponse, ty: &str) -> bool {
    res.events
        .iter()
        .any(|event| event.ty == format!("wasm-{ty}"))
}

struct Suite {
    app: App,
    owner: Addr,
    manager: Addr,
    adapter: Addr,
    consensus_code_id: u64,
    leaders: Vec<Addr>,
}

impl Suite {
    /// An adapter without an implementation and `leader_count` funded
    /// wallets that are not leaders yet.
    fn new(leader_count: u8) -> Self {
        let mut app = App::default();
        let owner = app.api().addr_make("owner");
        let manager = app.api().addr_make("manager");
        let leaders: Vec<Addr> = (1..=leader_count)
            .map(|index| app.api().addr_make(&format!("leader{index}")))
            .collect();

        app.init_modules(|router, _, storage| {
            for leader in leaders.iter() {
                router
                    .bank
                    .init_balance(storage, leader, coins(10 * DEFAULT_MONTHLY_QUOTA, DENOM))
                    .unwrap();
            }
        });

        let adapter_code_id = app.store_code(adapter_contract());
        let consensus_code_id = app.store_code(consensus_contract());
        let adapter = app
            .instantiate_contract(
                adapter_code_id,
                owner.clone(),
                &InstantiateMsg {},
                &[],
                "consensus-adapter",
                None,
            )
            .unwrap();

        Suite {
            app,
            owner,
            manager,
            adapter,
            consensus_code_id,
            leaders,
        }
    }

    fn instantiate_consensus(&mut self, manager: &Addr) -> Addr {
        self.app
            .instantiate_contract(
                self.consensus_code_id,
                manager.clone(),
                &ConsensusInstantiateMsg {
                    manager: None,
                    denom: DENOM.to_string(),
                    monthly_quota: None,
                    quorum: Some(Quorum {
                        decision: 2,
                        spent: 2,
                        change_quota: 2,
                        change_manager: 2,
                    }),
                    forwarder: Some(self.adapter.to_string()),
                },
                &[],
                "consensus",
                None,
            )
            .unwrap()
    }

    fn upgrade(&mut self, sender: &Addr, new_contract: &str) -> anyhow::Result<AppResponse> {
        self.execute(
            sender,
            ExecuteMsg::Upgrade {
                new_contract: new_contract.to_string(),
            },
        )
    }

    fn execute(&mut self, sender: &Addr, msg: ExecuteMsg) -> anyhow::Result<AppResponse> {
        self.execute_with_funds(sender, msg, &[])
    }

    fn execute_with_funds(
        &mut self,
        sender: &Addr,
        msg: ExecuteMsg,
        funds: &[Coin],
    ) -> anyhow::Result<AppResponse> {
        self.app
            .execute_contract(sender.clone(), self.adapter.clone(), &msg, funds)
    }

    fn query<T: DeserializeOwned>(&self, msg: QueryMsg) -> StdResult<T> {
        self.app.wrap().query_wasm_smart(self.adapter.clone(), &msg)
    }

    /// Installs a fresh implementation and admits every leader, each with
    /// a paid quota. Returns the implementation address.
    fn setup_governance(&mut self) -> Addr {
        let manager = self.manager.clone();
        let implementation = self.instantiate_consensus(&manager);
        let owner = self.owner.clone();
        self.upgrade(&owner, implementation.as_str()).unwrap();

        for (index, leader) in self.leaders.clone().iter().enumerate() {
            let group_id = index as u8 + 1;
            self.execute(
                &manager,
                ExecuteMsg::AddLeader {
                    wallet: leader.to_string(),
                    group_id,
                },
            )
            .unwrap();
            self.execute_with_funds(
                leader,
                ExecuteMsg::PayQuota { group_id },
                &coins(DEFAULT_MONTHLY_QUOTA, DENOM),
            )
            .unwrap();
        }
        implementation
    }

    fn add_topic(
        &mut self,
        title: &str,
        category: Category,
        amount: u128,
        responsible: Option<&Addr>,
    ) {
        let sender = self.leaders[0].clone();
        self.execute(
            &sender,
            ExecuteMsg::AddTopic {
                title: title.to_string(),
                description: format!("{title} description"),
                category,
                amount: Uint128::new(amount),
                responsible: responsible.map(|responsible| responsible.to_string()),
            },
        )
        .unwrap();
    }

    /// Opens the vote and casts one ballot per leader with `options`.
    fn vote(&mut self, title: &str, options: &[VoteOption]) {
        let manager = self.manager.clone();
        self.execute(
            &manager,
            ExecuteMsg::OpenVoting {
                title: title.to_string(),
            },
        )
        .unwrap();
        for (leader, option) in self.leaders.clone().iter().zip(options) {
            self.execute(
                leader,
                ExecuteMsg::Vote {
                    title: title.to_string(),
                    option: *option,
                },
            )
            .unwrap();
        }
    }

    fn close_voting(&mut self, title: &str) -> anyhow::Result<AppResponse> {
        let manager = self.manager.clone();
        self.execute(
            &manager,
            ExecuteMsg::CloseVoting {
                title: title.to_string(),
            },
        )
    }
}

#[test]
fn test_not_upgraded() {
    let mut suite = Suite::new(1);
    let manager = suite.manager.clone();

    let implementation: Option<Addr> = suite.query(QueryMsg::ImplAddress {}).unwrap();
    assert_eq!(implementation, None);
    let owner: Addr = suite.query(QueryMsg::Owner {}).unwrap();
    assert_eq!(owner, suite.owner);

    let err = suite
        .execute(
            &manager,
            ExecuteMsg::AddLeader {
                wallet: suite.leaders[0].to_string(),
                group_id: 1,
            },
        )
        .unwrap_err();
    assert_eq!(error_message(err), "Contract not upgraded");

    let err = suite.query::<Addr>(QueryMsg::Manager {}).unwrap_err();
    assert!(err.to_string().contains("Contract not upgraded"));
}

#[test]
fn test_upgrade() {
    let mut suite = Suite::new(0);
    let owner = suite.owner.clone();
    let manager = suite.manager.clone();
    let implementation = suite.instantiate_consensus(&manager);

    let err = suite
        .upgrade(&manager, implementation.as_str())
        .unwrap_err();
    assert_eq!(error_message(err), "Only owner can upgrade");

    let err = suite.upgrade(&owner, "").unwrap_err();
    assert_eq!(error_message(err), "New contract address cannot be 0");

    let res = suite.upgrade(&owner, implementation.as_str()).unwrap();
    assert!(!has_wasm_event(&res, "topic_changed"));
    let stored: Option<Addr> = suite.query(QueryMsg::ImplAddress {}).unwrap();
    assert_eq!(stored, Some(implementation));

    // the pointer is replaced without any compatibility check
    let other = suite.app.api().addr_make("other");
    suite.upgrade(&owner, other.as_str()).unwrap();
    let stored: Option<Addr> = suite.query(QueryMsg::ImplAddress {}).unwrap();
    assert_eq!(stored, Some(other));
}

/// Tests the following scenario:
///     1.  The manager admits leaders through the adapter, a stranger can not
///     2.  Leaders pay their quota through the adapter and the funds reach
///         the implementation
#[test]
fn test_forwarding_keeps_sender() {
    let mut suite = Suite::new(3);
    let implementation = suite.setup_governance();
    let stranger = suite.app.api().addr_make("stranger");

    let err = suite
        .execute(
            &stranger,
            ExecuteMsg::AddLeader {
                wallet: stranger.to_string(),
                group_id: 9,
            },
        )
        .unwrap_err();
    assert_eq!(
        error_message(err),
        "Only the council members can call this function"
    );

    let leader: Leader = suite
        .query(QueryMsg::Leader {
            wallet: suite.leaders[2].to_string(),
        })
        .unwrap();
    assert_eq!(leader.group, 3);
    let is_defaulter: bool = suite
        .query(QueryMsg::IsDefaulter {
            leader: suite.leaders[2].to_string(),
        })
        .unwrap();
    assert!(!is_defaulter);

    let balance = suite
        .app
        .wrap()
        .query_balance(&implementation, DENOM)
        .unwrap();
    assert_eq!(balance.amount, Uint128::new(3 * DEFAULT_MONTHLY_QUOTA));
    let balance = suite.app.wrap().query_balance(&suite.adapter, DENOM).unwrap();
    assert!(balance.amount.is_zero());

    // implementation errors surface through adapter queries
    let err = suite
        .query::<TopicsResponse>(QueryMsg::Topics {
            page: 0,
            page_size: 10,
        })
        .unwrap_err();
    assert!(err.to_string().contains("Page must be greater than 0"));
}

#[test]
fn test_close_voting_events() {
    let mut suite = Suite::new(2);
    suite.setup_governance();
    let new_manager = suite.leaders[1].clone();

    suite.add_topic("decision", Category::Decision, 0, None);
    suite.add_topic("quota", Category::ChangeQuota, 42, None);
    suite.add_topic("manager", Category::ChangeManager, 0, Some(&new_manager));
    suite.add_topic("tie", Category::ChangeQuota, 7, None);

    suite.vote("decision", &[VoteOption::Yes]);
    let err = suite.close_voting("decision").unwrap_err();
    assert_eq!(
        error_message(err),
        "You cannot close the voting because there are not enough votes"
    );

    let leader = suite.leaders[1].clone();
    suite
        .execute(
            &leader,
            ExecuteMsg::Vote {
                title: "decision".to_string(),
                option: VoteOption::No,
            },
        )
        .unwrap();
    let res = suite.close_voting("decision").unwrap();
    assert_eq!(
        wasm_event_attr(&res, "topic_changed", "status"),
        Some("denied".to_string())
    );
    assert_eq!(
        wasm_event_attr(&res, "topic_changed", "topic_id"),
        Some(format!("0x{}", topic_id("decision").to_hex()))
    );
    assert!(!has_wasm_event(&res, "manager_changed"));
    assert!(!has_wasm_event(&res, "quota_changed"));

    suite.vote("quota", &[VoteOption::Yes, VoteOption::Yes]);
    let res = suite.close_voting("quota").unwrap();
    assert_eq!(
        wasm_event_attr(&res, "topic_changed", "status"),
        Some("approved".to_string())
    );
    assert_eq!(
        wasm_event_attr(&res, "quota_changed", "quota"),
        Some("42".to_string())
    );
    assert!(!has_wasm_event(&res, "manager_changed"));
    let quota: Uint128 = suite.query(QueryMsg::Quota {}).unwrap();
    assert_eq!(quota, Uint128::new(42));

    suite.vote("tie", &[VoteOption::Yes, VoteOption::No]);
    let res = suite.close_voting("tie").unwrap();
    assert_eq!(
        wasm_event_attr(&res, "topic_changed", "status"),
        Some("denied".to_string())
    );
    assert!(!has_wasm_event(&res, "quota_changed"));

    suite.vote("manager", &[VoteOption::Yes, VoteOption::Yes]);
    let res = suite.close_voting("manager").unwrap();
    assert_eq!(
        wasm_event_attr(&res, "manager_changed", "manager"),
        Some(new_manager.to_string())
    );
    assert!(!has_wasm_event(&res, "quota_changed"));

    let manager: Addr = suite.query(QueryMsg::Manager {}).unwrap();
    assert_eq!(manager, new_manager);
}

#[test]
fn test_remove_topic_event() {
    let mut suite = Suite::new(1);
    suite.setup_governance();
    let manager = suite.manager.clone();
    suite.add_topic("topic", Category::Decision, 0, None);

    let err = suite
        .execute(
            &manager,
            ExecuteMsg::RemoveTopic {
                title: "missing".to_string(),
            },
        )
        .unwrap_err();
    assert_eq!(error_message(err), "Topic does not exists");

    let res = suite
        .execute(
            &manager,
            ExecuteMsg::RemoveTopic {
                title: "topic".to_string(),
            },
        )
        .unwrap();
    assert_eq!(
        wasm_event_attr(&res, "topic_changed", "status"),
        Some("deleted".to_string())
    );
    assert_eq!(
        wasm_event_attr(&res, "topic_changed", "title"),
        Some("topic".to_string())
    );

    let topic: Topic = suite
        .query(QueryMsg::Topic {
            title: "topic".to_string(),
        })
        .unwrap();
    assert_eq!(topic, Topic::empty());
}

#[test]
fn test_transfer() {
    let mut suite = Suite::new(2);
    let implementation = suite.setup_governance();
    let manager = suite.manager.clone();
    let contractor = suite.app.api().addr_make("contractor");

    suite.add_topic("repairs", Category::Spent, 5_000, Some(&contractor));
    suite.vote("repairs", &[VoteOption::Yes, VoteOption::Yes]);
    let res = suite.close_voting("repairs").unwrap();
    assert!(!has_wasm_event(&res, "quota_changed"));

    let transfer = |amount: u128| ExecuteMsg::Transfer {
        title: "repairs".to_string(),
        amount: Uint128::new(amount),
    };

    let err = suite.execute(&manager, transfer(6_000)).unwrap_err();
    assert_eq!(error_message(err), "Insufficient funds");

    suite.execute(&manager, transfer(3_000)).unwrap();
    let balance = suite.app.wrap().query_balance(&contractor, DENOM).unwrap();
    assert_eq!(balance.amount, Uint128::new(3_000));
    let balance = suite
        .app
        .wrap()
        .query_balance(&implementation, DENOM)
        .unwrap();
    assert_eq!(
        balance.amount,
        Uint128::new(2 * DEFAULT_MONTHLY_QUOTA - 3_000)
    );

    let topic: Topic = suite
        .query(QueryMsg::Topic {
            title: "repairs".to_string(),
        })
        .unwrap();
    assert_eq!(topic.status, Status::Spent);

    let err = suite.execute(&manager, transfer(1_000)).unwrap_err();
    assert_eq!(
        error_message(err),
        "Only APPROVED SPENT topics can be used for transfers"
    );
}

#[test]
fn test_upgrade_switches_state() {
    let mut suite = Suite::new(1);
    suite.setup_governance();
    let owner = suite.owner.clone();
    let old_manager = suite.manager.clone();

    let new_manager = suite.app.api().addr_make("new_manager");
    let replacement = suite.instantiate_consensus(&new_manager);
    suite.upgrade(&owner, replacement.as_str()).unwrap();

    let manager: Addr = suite.query(QueryMsg::Manager {}).unwrap();
    assert_eq!(manager, new_manager);
    let is_leader: bool = suite
        .query(QueryMsg::IsLeader {
            wallet: suite.leaders[0].to_string(),
        })
        .unwrap();
    assert!(!is_leader);

    let err = suite
        .execute(
            &old_manager,
            ExecuteMsg::AddLeader {
                wallet: suite.leaders[0].to_string(),
                group_id: 1,
            },
        )
        .unwrap_err();
    assert_eq!(
        error_message(err),
        "Only the council members can call this function"
    );
}
