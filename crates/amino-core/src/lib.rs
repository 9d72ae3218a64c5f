//! # amino-core: Legacy Amino JSON Encoding Engine
//!
//! Serializes messages into the canonical legacy ("amino") JSON form that
//! historical signers and validators produced, byte for byte, even though
//! the message definitions now follow a newer schema system with different
//! nullability and naming conventions.
//!
//! ## Components
//!
//! - [`registry`]: concrete type → wire name, envelope kind, custom encoder.
//!   Built once, then frozen.
//! - [`descriptor`]: static field tables carrying each field's legacy
//!   emission policy, and the [`Message`] trait.
//! - [`rules`]: per-field emission decision (omit, `null`, `[]`, value).
//! - [`encoder`]: the structural walk, envelopes, and [`LegacyCodec`].
//! - [`custom`]: type-level encode overrides such as [`FlattenField`].
//! - [`canonical`]: [`sort_json`] and the [`CanonicalBytes`] newtype.
//! - [`digest`]: SHA-256 over canonical bytes only.
//!
//! ## Crate Policy
//!
//! - No global registry. Every codec is given the registry it encodes against.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod config;
pub mod custom;
pub mod descriptor;
pub mod digest;
pub mod encoder;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod rules;

// Re-export primary types for ergonomic imports.
pub use canonical::{sort_json, sort_json_with, CanonicalBytes};
pub use config::CodecConfig;
pub use custom::{CustomEncoder, FlattenField};
pub use descriptor::{
    FieldDescriptor, FieldValue, Message, MessageDescriptor, ScalarKind, ValueKind,
};
pub use digest::{sha256_digest, ContentDigest, DigestAlgorithm};
pub use encoder::{EncodeContext, LegacyCodec};
pub use envelope::Envelope;
pub use error::{AminoError, CanonicalizationError, ConfigError, EncodingError, RegistryError};
pub use registry::{Registration, Registry, RegistryBuilder, TypeDescriptor, TypeKind};
pub use rules::Emission;
