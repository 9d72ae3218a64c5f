//! # Governance (v1)
//!
//! The second generation of governance messages. Most fields here are
//! nullable and omit-empty, so a default genesis state encodes as `{}`.
//! Exceptions that the legacy signers relied on are marked with
//! `keep_empty` below.

use amino_core::{
    FieldDescriptor, FieldValue, Message, MessageDescriptor, Registration, RegistryBuilder,
    RegistryError, ScalarKind,
};

use crate::coin::Coin;
use crate::gov_v1beta1::{ProposalStatus, VoteOption};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightedVoteOption {
    pub option: VoteOption,
    pub weight: String,
}

pub static WEIGHTED_VOTE_OPTION: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1.WeightedVoteOption",
    fields: &[
        FieldDescriptor::scalar("option", ScalarKind::Int32),
        FieldDescriptor::scalar("weight", ScalarKind::String),
    ],
};

impl Message for WeightedVoteOption {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &WEIGHTED_VOTE_OPTION
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![FieldValue::Int(self.option.as_i64()), FieldValue::Str(&self.weight)]
    }
}

/// Submit a proposal that executes arbitrary registered messages.
#[derive(Debug, Default)]
pub struct MsgSubmitProposal {
    pub messages: Vec<Box<dyn Message>>,
    pub initial_deposit: Vec<Coin>,
    pub proposer: String,
    pub metadata: String,
    pub title: String,
    pub summary: String,
}

pub static MSG_SUBMIT_PROPOSAL: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1.MsgSubmitProposal",
    fields: &[
        FieldDescriptor::repeated_interface("messages"),
        FieldDescriptor::repeated_message("initial_deposit").keep_empty(),
        FieldDescriptor::scalar("proposer", ScalarKind::String),
        FieldDescriptor::scalar("metadata", ScalarKind::String),
        FieldDescriptor::scalar("title", ScalarKind::String),
        FieldDescriptor::scalar("summary", ScalarKind::String),
    ],
};

impl Message for MsgSubmitProposal {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &MSG_SUBMIT_PROPOSAL
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::interfaces(&self.messages),
            FieldValue::messages(&self.initial_deposit),
            FieldValue::Str(&self.proposer),
            FieldValue::Str(&self.metadata),
            FieldValue::Str(&self.title),
            FieldValue::Str(&self.summary),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgDeposit {
    pub proposal_id: u64,
    pub depositor: String,
    pub amount: Vec<Coin>,
}

pub static MSG_DEPOSIT: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1.MsgDeposit",
    fields: &[
        FieldDescriptor::scalar("proposal_id", ScalarKind::Uint64).keep_empty(),
        FieldDescriptor::scalar("depositor", ScalarKind::String),
        FieldDescriptor::repeated_message("amount").keep_empty(),
    ],
};

impl Message for MsgDeposit {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &MSG_DEPOSIT
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Uint(self.proposal_id),
            FieldValue::Str(&self.depositor),
            FieldValue::messages(&self.amount),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgVote {
    pub proposal_id: u64,
    pub voter: String,
    pub option: VoteOption,
    pub metadata: String,
}

pub static MSG_VOTE: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1.MsgVote",
    fields: &[
        FieldDescriptor::scalar("proposal_id", ScalarKind::Uint64).keep_empty(),
        FieldDescriptor::scalar("voter", ScalarKind::String),
        FieldDescriptor::scalar("option", ScalarKind::Int32),
        FieldDescriptor::scalar("metadata", ScalarKind::String),
    ],
};

impl Message for MsgVote {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &MSG_VOTE
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Uint(self.proposal_id),
            FieldValue::Str(&self.voter),
            FieldValue::Int(self.option.as_i64()),
            FieldValue::Str(&self.metadata),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgVoteWeighted {
    pub proposal_id: u64,
    pub voter: String,
    pub options: Vec<WeightedVoteOption>,
    pub metadata: String,
}

pub static MSG_VOTE_WEIGHTED: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1.MsgVoteWeighted",
    fields: &[
        FieldDescriptor::scalar("proposal_id", ScalarKind::Uint64).keep_empty(),
        FieldDescriptor::scalar("voter", ScalarKind::String),
        FieldDescriptor::repeated_message("options"),
        FieldDescriptor::scalar("metadata", ScalarKind::String),
    ],
};

impl Message for MsgVoteWeighted {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &MSG_VOTE_WEIGHTED
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Uint(self.proposal_id),
            FieldValue::Str(&self.voter),
            FieldValue::messages(&self.options),
            FieldValue::Str(&self.metadata),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deposit {
    pub proposal_id: u64,
    pub depositor: String,
    pub amount: Vec<Coin>,
}

pub static DEPOSIT: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1.Deposit",
    fields: &[
        FieldDescriptor::scalar("proposal_id", ScalarKind::Uint64),
        FieldDescriptor::scalar("depositor", ScalarKind::String),
        FieldDescriptor::repeated_message("amount").keep_empty(),
    ],
};

impl Message for Deposit {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &DEPOSIT
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Uint(self.proposal_id),
            FieldValue::Str(&self.depositor),
            FieldValue::messages(&self.amount),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vote {
    pub proposal_id: u64,
    pub voter: String,
    pub options: Vec<WeightedVoteOption>,
    pub metadata: String,
}

pub static VOTE: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1.Vote",
    fields: &[
        FieldDescriptor::scalar("proposal_id", ScalarKind::Uint64),
        FieldDescriptor::scalar("voter", ScalarKind::String),
        FieldDescriptor::repeated_message("options"),
        FieldDescriptor::scalar("metadata", ScalarKind::String),
    ],
};

impl Message for Vote {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &VOTE
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Uint(self.proposal_id),
            FieldValue::Str(&self.voter),
            FieldValue::messages(&self.options),
            FieldValue::Str(&self.metadata),
        ]
    }
}

#[derive(Debug, Default)]
pub struct Proposal {
    pub id: u64,
    pub messages: Vec<Box<dyn Message>>,
    pub status: ProposalStatus,
    pub total_deposit: Vec<Coin>,
    pub metadata: String,
    pub title: String,
    pub summary: String,
    pub proposer: String,
}

pub static PROPOSAL: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1.Proposal",
    fields: &[
        FieldDescriptor::scalar("id", ScalarKind::Uint64),
        FieldDescriptor::repeated_interface("messages"),
        FieldDescriptor::scalar("status", ScalarKind::Int32),
        FieldDescriptor::repeated_message("total_deposit"),
        FieldDescriptor::scalar("metadata", ScalarKind::String),
        FieldDescriptor::scalar("title", ScalarKind::String),
        FieldDescriptor::scalar("summary", ScalarKind::String),
        FieldDescriptor::scalar("proposer", ScalarKind::String),
    ],
};

impl Message for Proposal {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &PROPOSAL
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Uint(self.id),
            FieldValue::interfaces(&self.messages),
            FieldValue::Int(self.status.as_i64()),
            FieldValue::messages(&self.total_deposit),
            FieldValue::Str(&self.metadata),
            FieldValue::Str(&self.title),
            FieldValue::Str(&self.summary),
            FieldValue::Str(&self.proposer),
        ]
    }
}

/// Deposit parameters. The deposit period is optional in this version;
/// `None` and `Some(0)` are both omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepositParams {
    pub min_deposit: Vec<Coin>,
    pub max_deposit_period: Option<i64>,
}

pub static DEPOSIT_PARAMS: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1.DepositParams",
    fields: &[
        FieldDescriptor::repeated_message("min_deposit").non_nullable(),
        FieldDescriptor::scalar("max_deposit_period", ScalarKind::Int64),
    ],
};

impl Message for DepositParams {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &DEPOSIT_PARAMS
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::messages(&self.min_deposit),
            FieldValue::optional_int(self.max_deposit_period),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VotingParams {
    pub voting_period: Option<i64>,
}

pub static VOTING_PARAMS: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1.VotingParams",
    fields: &[FieldDescriptor::scalar("voting_period", ScalarKind::Int64)],
};

impl Message for VotingParams {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &VOTING_PARAMS
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![FieldValue::optional_int(self.voting_period)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallyParams {
    pub quorum: String,
    pub threshold: String,
    pub veto_threshold: String,
}

pub static TALLY_PARAMS: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1.TallyParams",
    fields: &[
        FieldDescriptor::scalar("quorum", ScalarKind::String),
        FieldDescriptor::scalar("threshold", ScalarKind::String),
        FieldDescriptor::scalar("veto_threshold", ScalarKind::String),
    ],
};

impl Message for TallyParams {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &TALLY_PARAMS
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Str(&self.quorum),
            FieldValue::Str(&self.threshold),
            FieldValue::Str(&self.veto_threshold),
        ]
    }
}

#[derive(Debug, Default)]
pub struct GenesisState {
    pub starting_proposal_id: u64,
    pub deposits: Vec<Deposit>,
    pub votes: Vec<Vote>,
    pub proposals: Vec<Proposal>,
    pub deposit_params: Option<DepositParams>,
    pub voting_params: Option<VotingParams>,
    pub tally_params: Option<TallyParams>,
    pub constitution: String,
}

pub static GENESIS_STATE: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1.GenesisState",
    fields: &[
        FieldDescriptor::scalar("starting_proposal_id", ScalarKind::Uint64),
        FieldDescriptor::repeated_message("deposits"),
        FieldDescriptor::repeated_message("votes"),
        FieldDescriptor::repeated_message("proposals"),
        FieldDescriptor::message("deposit_params"),
        FieldDescriptor::message("voting_params"),
        FieldDescriptor::message("tally_params"),
        FieldDescriptor::scalar("constitution", ScalarKind::String),
    ],
};

impl Message for GenesisState {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &GENESIS_STATE
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Uint(self.starting_proposal_id),
            FieldValue::messages(&self.deposits),
            FieldValue::messages(&self.votes),
            FieldValue::messages(&self.proposals),
            FieldValue::optional_message(&self.deposit_params),
            FieldValue::optional_message(&self.voting_params),
            FieldValue::optional_message(&self.tally_params),
            FieldValue::Str(&self.constitution),
        ]
    }
}

/// Register the v1 governance messages.
pub fn register_legacy_amino_codec(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder.register(Registration::interface(
        &MSG_SUBMIT_PROPOSAL,
        "cosmos-sdk/v1/MsgSubmitProposal",
    ))?;
    builder.register(Registration::interface(&MSG_DEPOSIT, "cosmos-sdk/v1/MsgDeposit"))?;
    builder.register(Registration::interface(&MSG_VOTE, "cosmos-sdk/v1/MsgVote"))?;
    builder.register(Registration::interface(
        &MSG_VOTE_WEIGHTED,
        "cosmos-sdk/v1/MsgVoteWeighted",
    ))?;
    Ok(())
}
