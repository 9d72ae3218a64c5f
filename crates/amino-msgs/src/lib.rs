//! # amino-msgs: Legacy Amino Message Catalogue
//!
//! Message types whose legacy JSON form must stay byte-identical to what
//! historical signers produced, together with their wire-name
//! registrations:
//!
//! - [`crypto`]: single and threshold multisig public keys.
//! - [`coin`]: token amounts.
//! - [`gov_v1beta1`] and [`gov_v1`]: governance messages, params and
//!   genesis state for both generations.
//! - [`group`]: group votes.
//! - [`tx`]: `StdSignDoc`, `StdFee` and [`tx::std_sign_bytes`].
//!
//! Each module exposes a `register_legacy_amino_codec` function. The
//! crate-level [`register_legacy_amino_codec`] calls all of them, and
//! [`legacy_codec`] returns a ready-to-use codec over the frozen result.

pub mod coin;
pub mod crypto;
pub mod gov_v1;
pub mod gov_v1beta1;
pub mod group;
pub mod tx;

use std::sync::Arc;

use amino_core::{AminoError, CodecConfig, LegacyCodec, Registry, RegistryBuilder, RegistryError};

pub use coin::Coin;
pub use tx::{std_sign_bytes, StdFee, StdSignDoc};

/// Register every type in this crate.
pub fn register_legacy_amino_codec(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    crypto::register_legacy_amino_codec(builder)?;
    gov_v1beta1::register_legacy_amino_codec(builder)?;
    gov_v1::register_legacy_amino_codec(builder)?;
    group::register_legacy_amino_codec(builder)?;
    Ok(())
}

/// A frozen registry holding every type in this crate.
pub fn legacy_registry() -> Result<Registry, RegistryError> {
    let mut builder = RegistryBuilder::new();
    register_legacy_amino_codec(&mut builder)?;
    Ok(builder.build())
}

/// A codec over [`legacy_registry`] with the given configuration.
pub fn legacy_codec(config: CodecConfig) -> Result<LegacyCodec, AminoError> {
    let registry = legacy_registry()?;
    tracing::debug!(types = registry.len(), ?config, "legacy codec ready");
    Ok(LegacyCodec::with_config(Arc::new(registry), config)?)
}
