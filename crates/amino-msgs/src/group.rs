//! Group module messages.

use amino_core::{
    FieldDescriptor, FieldValue, Message, MessageDescriptor, Registration, RegistryBuilder,
    RegistryError, ScalarKind,
};

use crate::gov_v1beta1::VoteOption;

/// Whether a proposal should be executed immediately after the vote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Exec {
    #[default]
    Unspecified = 0,
    Try = 1,
}

impl Exec {
    pub fn as_i64(self) -> i64 {
        self as i64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgVote {
    pub proposal_id: u64,
    pub voter: String,
    pub option: VoteOption,
    pub metadata: String,
    pub exec: Exec,
}

pub static MSG_VOTE: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.group.v1.MsgVote",
    fields: &[
        FieldDescriptor::scalar("proposal_id", ScalarKind::Uint64),
        FieldDescriptor::scalar("voter", ScalarKind::String),
        FieldDescriptor::scalar("option", ScalarKind::Int32),
        FieldDescriptor::scalar("metadata", ScalarKind::String),
        FieldDescriptor::scalar("exec", ScalarKind::Int32),
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
            FieldValue::Int(self.exec.as_i64()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgExec {
    pub proposal_id: u64,
    pub executor: String,
}

pub static MSG_EXEC: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.group.v1.MsgExec",
    fields: &[
        FieldDescriptor::scalar("proposal_id", ScalarKind::Uint64),
        FieldDescriptor::scalar("executor", ScalarKind::String),
    ],
};

impl Message for MsgExec {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &MSG_EXEC
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![FieldValue::Uint(self.proposal_id), FieldValue::Str(&self.executor)]
    }
}

/// Register the group messages.
pub fn register_legacy_amino_codec(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder.register(Registration::interface(&MSG_VOTE, "cosmos-sdk/group/MsgVote"))?;
    builder.register(Registration::interface(&MSG_EXEC, "cosmos-sdk/group/MsgExec"))?;
    Ok(())
}
