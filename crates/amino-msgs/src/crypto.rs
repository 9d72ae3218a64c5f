//! # Public Keys
//!
//! Legacy forms of the account public key types. Single keys flatten to
//! their bare base64 key bytes (`"AQ=="`, never `{"key":"AQ=="}`). The
//! threshold multisig key keeps its object shape but renders the threshold
//! as a decimal string and an empty key list as `[]`.
//!
//! No key validation or cryptography happens here; these types only carry
//! bytes into the encoder.

use std::sync::Arc;

use amino_core::{
    FieldDescriptor, FieldValue, FlattenField, Message, MessageDescriptor, Registration,
    RegistryBuilder, RegistryError, ScalarKind,
};

/// Wire name of [`Secp256k1PubKey`].
pub const SECP256K1_PUB_KEY_NAME: &str = "tendermint/PubKeySecp256k1";
/// Wire name of [`Ed25519PubKey`].
pub const ED25519_PUB_KEY_NAME: &str = "tendermint/PubKeyEd25519";
/// Wire name of [`LegacyAminoPubKey`].
pub const MULTISIG_THRESHOLD_PUB_KEY_NAME: &str = "tendermint/PubKeyMultisigThreshold";

/// Compressed secp256k1 public key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Secp256k1PubKey {
    /// 33-byte compressed point.
    pub key: Vec<u8>,
}

pub static SECP256K1_PUB_KEY: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.crypto.secp256k1.PubKey",
    fields: &[FieldDescriptor::scalar("key", ScalarKind::Bytes)],
};

impl Message for Secp256k1PubKey {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &SECP256K1_PUB_KEY
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![FieldValue::Bytes(&self.key)]
    }
}

/// Ed25519 public key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ed25519PubKey {
    /// 32-byte key.
    pub key: Vec<u8>,
}

pub static ED25519_PUB_KEY: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.crypto.ed25519.PubKey",
    fields: &[FieldDescriptor::scalar("key", ScalarKind::Bytes)],
};

impl Message for Ed25519PubKey {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &ED25519_PUB_KEY
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![FieldValue::Bytes(&self.key)]
    }
}

/// K-of-N threshold multisig public key.
#[derive(Debug, Default)]
pub struct LegacyAminoPubKey {
    /// Signatures required.
    pub threshold: u32,
    /// Member keys, any registered public key type.
    pub public_keys: Vec<Box<dyn Message>>,
}

pub static LEGACY_AMINO_PUB_KEY: MessageDescriptor = MessageDescriptor {
    full_name: "cosmos.crypto.multisig.LegacyAminoPubKey",
    fields: &[
        FieldDescriptor::scalar("threshold", ScalarKind::Uint32)
            .keep_empty()
            .with_decimal_string(),
        FieldDescriptor::repeated_interface("pubkeys")
            .keep_empty()
            .with_empty_array(),
    ],
};

impl Message for LegacyAminoPubKey {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &LEGACY_AMINO_PUB_KEY
    }

    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Uint(u64::from(self.threshold)),
            FieldValue::interfaces(&self.public_keys),
        ]
    }
}

/// Register the public key types.
pub fn register_legacy_amino_codec(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    let flatten_key = Arc::new(FlattenField::new("key"));
    builder.register(
        Registration::interface(&SECP256K1_PUB_KEY, SECP256K1_PUB_KEY_NAME)
            .with_encoder(flatten_key.clone()),
    )?;
    builder.register(
        Registration::interface(&ED25519_PUB_KEY, ED25519_PUB_KEY_NAME).with_encoder(flatten_key),
    )?;
    builder.register(Registration::interface(
        &LEGACY_AMINO_PUB_KEY,
        MULTISIG_THRESHOLD_PUB_KEY_NAME,
    ))?;
    Ok(())
}
