//! Token amounts.

use amino_core::{FieldDescriptor, FieldValue, Message, MessageDescriptor, ScalarKind};

/// An amount of a single denomination. The amount is an arbitrary-precision
/// integer carried as its decimal string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    /// Convenience constructor.
    pub fn new(denom: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

pub static COIN: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.base.v1beta1.Coin",
    fields: &[
        FieldDescriptor::scalar("denom", ScalarKind::String),
        FieldDescriptor::scalar("amount", ScalarKind::String).keep_empty(),
    ],
};

impl Message for Coin {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &COIN
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![FieldValue::Str(&self.denom), FieldValue::Str(&self.amount)]
    }
}
