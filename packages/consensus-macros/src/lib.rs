use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, AttributeArgs, DataEnum, DeriveInput, Variant};

/// Adds every governance execute method to an enum so that the enum
/// implements the consensus execute interface.
///
/// Both the implementation contract and the adapter declare their
/// `ExecuteMsg` with this attribute, so a message built for one
/// serializes identically for the other.
///
/// For example:
///
/// ```
/// use consensus_macros::consensus_execute;
/// use cosmwasm_schema::cw_serde;
///
/// #[consensus_execute]
/// #[cw_serde]
/// enum ExecuteMsg {
///     Upgrade { new_contract: String },
/// }
/// ```
///
/// Will transform the enum to:
///
/// ```text
/// enum ExecuteMsg {
///     Upgrade { new_contract: String },
///     AddLeader { wallet: String, group_id: u8 },
///     RemoveLeader { wallet: String, group_id: u8 },
///     ...
///     Transfer { title: String, amount: Uint128 },
/// }
/// ```
///
/// Other derive macro invocations must occur after this procedural macro
/// as they may depend on the new variants.
#[proc_macro_attribute]
pub fn consensus_execute(metadata: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(metadata as AttributeArgs);
    if let Some(first_arg) = args.first() {
        return syn::Error::new_spanned(first_arg, "consensus execute macro takes no arguments")
            .to_compile_error()
            .into();
    }

    let ast: DeriveInput = parse_macro_input!(input);
    append_variants(
        ast,
        "consensus execute",
        vec![
            quote! {
                /// Admits `wallet` as the leader of `group_id`, keeping its roles.
                /// Must be called by a council member.
                AddLeader {
                    wallet: ::std::string::String,
                    group_id: ::std::primitive::u8
                }
            },
            quote! {
                /// Removes `wallet` from `group_id` and clears its roles.
                /// Must be called by the manager.
                RemoveLeader {
                    wallet: ::std::string::String,
                    group_id: ::std::primitive::u8
                }
            },
            quote! {
                /// Hands the manager role over. Must be called by the manager.
                SetManager {
                    new_manager: ::std::string::String
                }
            },
            quote! {
                /// Grants or revokes the counselor role of a leader.
                /// Must be called by the manager.
                SetCounselor {
                    wallet: ::std::string::String,
                    is_counselor: ::std::primitive::bool
                }
            },
            quote! {
                /// Pays the monthly quota for `group_id` with the attached funds.
                PayQuota {
                    group_id: ::std::primitive::u8
                }
            },
            quote! {
                /// Creates an IDLE topic. `responsible` defaults to the sender.
                AddTopic {
                    title: ::std::string::String,
                    description: ::std::string::String,
                    category: ::consensus_common::types::Category,
                    amount: ::cosmwasm_std::Uint128,
                    responsible: ::std::option::Option<::std::string::String>
                }
            },
            quote! {
                /// Edits an IDLE topic. Must be called by the manager.
                EditTopic {
                    title: ::std::string::String,
                    description: ::std::string::String,
                    amount: ::cosmwasm_std::Uint128,
                    responsible: ::std::option::Option<::std::string::String>
                }
            },
            quote! {
                /// Deletes a topic in any status. Must be called by the manager.
                RemoveTopic {
                    title: ::std::string::String
                }
            },
            quote! {
                /// Opens an IDLE topic for ballots. Must be called by the manager.
                OpenVoting {
                    title: ::std::string::String
                }
            },
            quote! {
                /// Casts the sender's ballot on a VOTING topic.
                Vote {
                    title: ::std::string::String,
                    option: ::consensus_common::types::VoteOption
                }
            },
            quote! {
                /// Closes a VOTING topic once its quorum is met and applies the outcome.
                /// Must be called by the manager.
                CloseVoting {
                    title: ::std::string::String
                }
            },
            quote! {
                /// Pays `amount` of an APPROVED SPENT topic to its responsible and
                /// settles the topic. Must be called by the manager.
                Transfer {
                    title: ::std::string::String,
                    amount: ::cosmwasm_std::Uint128
                }
            },
        ],
    )
}

/// Adds every governance query to an enum so that the enum implements the
/// consensus query interface.
///
/// For example:
///
/// ```
/// use consensus_macros::consensus_query;
/// use cosmwasm_schema::{cw_serde, QueryResponses};
///
/// #[consensus_query]
/// #[cw_serde]
/// #[derive(QueryResponses)]
/// enum QueryMsg {}
/// ```
///
/// Will transform the enum to:
///
/// ```text
/// enum QueryMsg {
///     Leader { wallet: String },
///     Leaders { page: u64, page_size: u64 },
///     ...
///     NumberOfVotes { title: String },
/// }
/// ```
#[proc_macro_attribute]
pub fn consensus_query(metadata: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(metadata as AttributeArgs);
    if let Some(first_arg) = args.first() {
        return syn::Error::new_spanned(first_arg, "consensus query macro takes no arguments")
            .to_compile_error()
            .into();
    }

    let ast: DeriveInput = parse_macro_input!(input);
    append_variants(
        ast,
        "consensus query",
        vec![
            quote! {
                #[returns(::consensus_common::types::Leader)]
                Leader {
                    wallet: ::std::string::String
                }
            },
            quote! {
                /// 1-indexed page of the current leaders.
                #[returns(::consensus_common::query::LeadersResponse)]
                Leaders {
                    page: ::std::primitive::u64,
                    page_size: ::std::primitive::u64
                }
            },
            quote! {
                #[returns(::std::vec::Vec<::cosmwasm_std::Addr>)]
                Counselors {}
            },
            quote! {
                #[returns(::cosmwasm_std::Addr)]
                Manager {}
            },
            quote! {
                #[returns(::std::primitive::bool)]
                IsLeader {
                    wallet: ::std::string::String
                }
            },
            quote! {
                #[returns(::std::primitive::bool)]
                GroupExists {
                    group_id: ::std::primitive::u8
                }
            },
            quote! {
                /// The current monthly quota.
                #[returns(::cosmwasm_std::Uint128)]
                Quota {}
            },
            quote! {
                /// Until when the last payment for `group_id` is valid.
                #[returns(::cosmwasm_std::Timestamp)]
                Payment {
                    group_id: ::std::primitive::u8
                }
            },
            quote! {
                #[returns(::std::primitive::bool)]
                IsDefaulter {
                    leader: ::std::string::String
                }
            },
            quote! {
                /// Returns a zero-valued topic if `title` is unknown.
                #[returns(::consensus_common::types::Topic)]
                Topic {
                    title: ::std::string::String
                }
            },
            quote! {
                /// 1-indexed page of the stored topics.
                #[returns(::consensus_common::query::TopicsResponse)]
                Topics {
                    page: ::std::primitive::u64,
                    page_size: ::std::primitive::u64
                }
            },
            quote! {
                /// Ballots cast on `title`, in casting order.
                #[returns(::std::vec::Vec<::consensus_common::types::Vote>)]
                Votes {
                    title: ::std::string::String
                }
            },
            quote! {
                #[returns(::std::primitive::u64)]
                NumberOfVotes {
                    title: ::std::string::String
                }
            },
        ],
    )
}

fn append_variants(mut ast: DeriveInput, name: &str, extra: Vec<TokenStream2>) -> TokenStream {
    match &mut ast.data {
        syn::Data::Enum(DataEnum { variants, .. }) => {
            for tokens in extra {
                let variant: Variant = match syn::parse2(tokens) {
                    Ok(variant) => variant,
                    Err(err) => return err.to_compile_error().into(),
                };
                variants.push(variant);
            }
        }
        _ => {
            return syn::Error::new(
                ast.ident.span(),
                format!("{} types can only be derived for enums", name),
            )
            .to_compile_error()
            .into()
        }
    };

    quote! {
    #ast
    }
    .into()
}
