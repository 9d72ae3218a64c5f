//! # Legacy Sign Documents
//!
//! The `StdSignDoc` that legacy-mode signers sign over, and the fee it
//! carries. The document is never registered: it is encoded bare, while each
//! message inside `msgs` is enveloped with its wire name.
//!
//! Sign bytes are canonical bytes; [`StdSignDoc::digest`] hashes them for
//! signers that sign over a SHA-256 digest.

use amino_core::{
    sha256_digest, CanonicalBytes, ContentDigest, EncodingError, FieldDescriptor, FieldValue,
    LegacyCodec, Message, MessageDescriptor, ScalarKind,
};

use crate::coin::Coin;

/// Transaction fee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    pub gas: u64,
    pub payer: String,
    pub granter: String,
}

impl StdFee {
    pub fn new(amount: Vec<Coin>, gas: u64) -> Self {
        Self {
            amount,
            gas,
            ..Self::default()
        }
    }
}

pub static STD_FEE: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.tx.v1beta1.StdFee",
    fields: &[
        FieldDescriptor::repeated_message("amount")
            .keep_empty()
            .with_empty_array(),
        FieldDescriptor::scalar("gas", ScalarKind::Uint64).keep_empty(),
        FieldDescriptor::scalar("payer", ScalarKind::String),
        FieldDescriptor::scalar("granter", ScalarKind::String),
    ],
};

impl Message for StdFee {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &STD_FEE
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::messages(&self.amount),
            FieldValue::Uint(self.gas),
            FieldValue::Str(&self.payer),
            FieldValue::Str(&self.granter),
        ]
    }
}

/// The document a legacy signer signs.
#[derive(Debug, Clone)]
pub struct StdSignDoc<'a> {
    pub account_number: u64,
    pub chain_id: &'a str,
    pub fee: &'a StdFee,
    pub memo: &'a str,
    pub msgs: Vec<&'a dyn Message>,
    pub sequence: u64,
    pub timeout_height: u64,
}

pub static STD_SIGN_DOC: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.tx.v1beta1.StdSignDoc",
    fields: &[
        FieldDescriptor::scalar("account_number", ScalarKind::Uint64).keep_empty(),
        FieldDescriptor::scalar("chain_id", ScalarKind::String).keep_empty(),
        FieldDescriptor::message("fee").non_nullable().keep_empty(),
        FieldDescriptor::scalar("memo", ScalarKind::String).keep_empty(),
        FieldDescriptor::repeated_interface("msgs")
            .keep_empty()
            .with_empty_array(),
        FieldDescriptor::scalar("sequence", ScalarKind::Uint64).keep_empty(),
        FieldDescriptor::scalar("timeout_height", ScalarKind::Uint64),
    ],
};

impl Message for StdSignDoc<'_> {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &STD_SIGN_DOC
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Uint(self.account_number),
            FieldValue::Str(self.chain_id),
            FieldValue::Message(self.fee),
            FieldValue::Str(self.memo),
            FieldValue::List(self.msgs.iter().map(|m| FieldValue::Interface(*m)).collect()),
            FieldValue::Uint(self.sequence),
            FieldValue::Uint(self.timeout_height),
        ]
    }
}

impl StdSignDoc<'_> {
    /// Canonical sign bytes of this document.
    pub fn sign_bytes(&self, codec: &LegacyCodec) -> Result<CanonicalBytes, EncodingError> {
        let bytes = codec.marshal_canonical(self)?;
        tracing::debug!(
            chain_id = self.chain_id,
            account_number = self.account_number,
            sequence = self.sequence,
            msgs = self.msgs.len(),
            len = bytes.len(),
            "built legacy sign bytes"
        );
        Ok(bytes)
    }

    /// SHA-256 digest of the sign bytes.
    pub fn digest(&self, codec: &LegacyCodec) -> Result<ContentDigest, EncodingError> {
        let digest = sha256_digest(&self.sign_bytes(codec)?);
        tracing::debug!(chain_id = self.chain_id, %digest, "digested legacy sign doc");
        Ok(digest)
    }
}

/// Canonical bytes of a legacy sign document.
///
/// # Errors
///
/// Fails if any message in `msgs` is not registered with the codec's
/// registry, or if encoding a message fails.
#[allow(clippy::too_many_arguments)]
pub fn std_sign_bytes(
    codec: &LegacyCodec,
    chain_id: &str,
    account_number: u64,
    sequence: u64,
    timeout_height: u64,
    fee: &StdFee,
    msgs: &[&dyn Message],
    memo: &str,
) -> Result<CanonicalBytes, EncodingError> {
    let doc = StdSignDoc {
        account_number,
        chain_id,
        fee,
        memo,
        msgs: msgs.to_vec(),
        sequence,
        timeout_height,
    };
    doc.sign_bytes(codec)
}
