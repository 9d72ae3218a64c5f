//! # Governance (v1beta1)
//!
//! The original governance messages. Parameters and the collections in the
//! genesis state are non-nullable without omit-empty, so a default genesis
//! state still writes every params object (as `{}`) and every collection
//! (as `null`).

use amino_core::{
    FieldDescriptor, FieldValue, Message, MessageDescriptor, Registration, RegistryBuilder,
    RegistryError, ScalarKind,
};

use crate::coin::Coin;

/// Vote choice. Encoded as its integer value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum VoteOption {
    #[default]
    Unspecified = 0,
    Yes = 1,
    Abstain = 2,
    No = 3,
    NoWithVeto = 4,
}

impl VoteOption {
    pub fn as_i64(self) -> i64 {
        self as i64
    }
}

/// Proposal lifecycle status. Encoded as its integer value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ProposalStatus {
    #[default]
    Unspecified = 0,
    DepositPeriod = 1,
    VotingPeriod = 2,
    Passed = 3,
    Rejected = 4,
    Failed = 5,
}

impl ProposalStatus {
    pub fn as_i64(self) -> i64 {
        self as i64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightedVoteOption {
    pub option: VoteOption,
    /// Decimal weight, e.g. `"0.500000000000000000"`.
    pub weight: String,
}

pub static WEIGHTED_VOTE_OPTION: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1beta1.WeightedVoteOption",
    fields: &[
        FieldDescriptor::scalar("option", ScalarKind::Int32),
        FieldDescriptor::scalar("weight", ScalarKind::String).keep_empty(),
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

/// Free-text proposal content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextProposal {
    pub title: String,
    pub description: String,
}

pub static TEXT_PROPOSAL: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1beta1.TextProposal",
    fields: &[
        FieldDescriptor::scalar("title", ScalarKind::String),
        FieldDescriptor::scalar("description", ScalarKind::String),
    ],
};

impl Message for TextProposal {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &TEXT_PROPOSAL
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![FieldValue::Str(&self.title), FieldValue::Str(&self.description)]
    }
}

#[derive(Debug, Default)]
pub struct MsgSubmitProposal {
    /// Any registered proposal content.
    pub content: Option<Box<dyn Message>>,
    pub initial_deposit: Vec<Coin>,
    pub proposer: String,
}

pub static MSG_SUBMIT_PROPOSAL: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1beta1.MsgSubmitProposal",
    fields: &[
        FieldDescriptor::interface("content"),
        FieldDescriptor::repeated_message("initial_deposit").keep_empty(),
        FieldDescriptor::scalar("proposer", ScalarKind::String),
    ],
};

impl Message for MsgSubmitProposal {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &MSG_SUBMIT_PROPOSAL
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::optional_interface(&self.content),
            FieldValue::messages(&self.initial_deposit),
            FieldValue::Str(&self.proposer),
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
    full_name: "cosmos.gov.v1beta1.MsgDeposit",
    fields: &[
        FieldDescriptor::scalar("proposal_id", ScalarKind::Uint64),
        FieldDescriptor::scalar("depositor", ScalarKind::String),
        FieldDescriptor::repeated_message("amount"),
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
}

pub static MSG_VOTE: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1beta1.MsgVote",
    fields: &[
        FieldDescriptor::scalar("proposal_id", ScalarKind::Uint64),
        FieldDescriptor::scalar("voter", ScalarKind::String),
        FieldDescriptor::scalar("option", ScalarKind::Int32),
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
    full_name: "cosmos.gov.v1beta1.Deposit",
    fields: &[
        FieldDescriptor::scalar("proposal_id", ScalarKind::Uint64),
        FieldDescriptor::scalar("depositor", ScalarKind::String),
        FieldDescriptor::repeated_message("amount"),
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
    pub option: VoteOption,
    pub options: Vec<WeightedVoteOption>,
}

pub static VOTE: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1beta1.Vote",
    fields: &[
        FieldDescriptor::scalar("proposal_id", ScalarKind::Uint64),
        FieldDescriptor::scalar("voter", ScalarKind::String),
        FieldDescriptor::scalar("option", ScalarKind::Int32),
        FieldDescriptor::repeated_message("options"),
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
            FieldValue::Int(self.option.as_i64()),
            FieldValue::messages(&self.options),
        ]
    }
}

#[derive(Debug, Default)]
pub struct Proposal {
    pub proposal_id: u64,
    pub content: Option<Box<dyn Message>>,
    pub status: ProposalStatus,
    pub total_deposit: Vec<Coin>,
}

pub static PROPOSAL: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1beta1.Proposal",
    fields: &[
        FieldDescriptor::scalar("proposal_id", ScalarKind::Uint64),
        FieldDescriptor::interface("content"),
        FieldDescriptor::scalar("status", ScalarKind::Int32),
        FieldDescriptor::repeated_message("total_deposit"),
    ],
};

impl Message for Proposal {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &PROPOSAL
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Uint(self.proposal_id),
            FieldValue::optional_interface(&self.content),
            FieldValue::Int(self.status.as_i64()),
            FieldValue::messages(&self.total_deposit),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepositParams {
    pub min_deposit: Vec<Coin>,
    /// Nanoseconds.
    pub max_deposit_period: i64,
}

pub static DEPOSIT_PARAMS: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1beta1.DepositParams",
    fields: &[
        FieldDescriptor::repeated_message("min_deposit"),
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
            FieldValue::Int(self.max_deposit_period),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VotingParams {
    /// Nanoseconds.
    pub voting_period: i64,
}

pub static VOTING_PARAMS: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1beta1.VotingParams",
    fields: &[FieldDescriptor::scalar("voting_period", ScalarKind::Int64)],
};

impl Message for VotingParams {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &VOTING_PARAMS
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![FieldValue::Int(self.voting_period)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallyParams {
    pub quorum: String,
    pub threshold: String,
    pub veto_threshold: String,
}

pub static TALLY_PARAMS: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1beta1.TallyParams",
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
    pub deposit_params: DepositParams,
    pub voting_params: VotingParams,
    pub tally_params: TallyParams,
}

pub static GENESIS_STATE: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.gov.v1beta1.GenesisState",
    fields: &[
        FieldDescriptor::scalar("starting_proposal_id", ScalarKind::Uint64),
        FieldDescriptor::repeated_message("deposits").keep_empty(),
        FieldDescriptor::repeated_message("votes").keep_empty(),
        FieldDescriptor::repeated_message("proposals").keep_empty(),
        FieldDescriptor::message("deposit_params").non_nullable().keep_empty(),
        FieldDescriptor::message("voting_params").non_nullable().keep_empty(),
        FieldDescriptor::message("tally_params").non_nullable().keep_empty(),
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
            FieldValue::Message(&self.deposit_params),
            FieldValue::Message(&self.voting_params),
            FieldValue::Message(&self.tally_params),
        ]
    }
}

/// Register the v1beta1 governance messages and proposal content.
pub fn register_legacy_amino_codec(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder.register(Registration::interface(
        &MSG_SUBMIT_PROPOSAL,
        "cosmos-sdk/MsgSubmitProposal",
    ))?;
    builder.register(Registration::interface(&MSG_DEPOSIT, "cosmos-sdk/MsgDeposit"))?;
    builder.register(Registration::interface(&MSG_VOTE, "cosmos-sdk/MsgVote"))?;
    builder.register(Registration::interface(&TEXT_PROPOSAL, "cosmos-sdk/TextProposal"))?;
    Ok(())
}
