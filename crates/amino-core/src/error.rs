//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types used throughout the legacy codec. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Registry inconsistencies fail loudly with both conflicting names.
//! - Encoding errors carry the schema name of the message being encoded
//!   and the JSON name of the offending field.
//! - Nothing is retried or repaired. An encode either yields canonical
//!   bytes or an error, never partial output.

use thiserror::Error;

/// Top-level error type for the legacy codec.
#[derive(Error, Debug)]
pub enum AminoError {
    /// Registration or lookup failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Structural encoding failed.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Codec configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Error raised by the type registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The wire name is already bound to another concrete type.
    #[error(
        "wire name '{wire_name}' is already bound to '{existing}', cannot bind to '{attempted}'"
    )]
    DuplicateWireName {
        /// The contested wire name.
        wire_name: String,
        /// Schema name of the type already holding the wire name.
        existing: String,
        /// Schema name of the type that attempted to claim it.
        attempted: String,
    },

    /// The concrete type was registered twice.
    #[error("type '{full_name}' is already registered as '{wire_name}'")]
    DuplicateType {
        /// Schema name of the concrete type.
        full_name: String,
        /// Wire name from the first registration.
        wire_name: String,
    },

    /// An interface-typed value has no registry entry.
    #[error("type '{full_name}' is not registered")]
    UnregisteredType {
        /// Schema name of the concrete type.
        full_name: String,
    },

    /// No type is registered under the wire name.
    #[error("no type registered under wire name '{wire_name}'")]
    UnknownWireName {
        /// The wire name that failed to resolve.
        wire_name: String,
    },
}

/// Error during structural encoding of a message.
#[derive(Error, Debug)]
pub enum EncodingError {
    /// Registry lookup failed for an interface-typed value.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A message returned a different number of values than its field table.
    #[error("message '{full_name}' declares {declared} fields but produced {produced} values")]
    SchemaMismatch {
        /// Schema name of the message.
        full_name: String,
        /// Number of entries in the field table.
        declared: usize,
        /// Number of values the message produced.
        produced: usize,
    },

    /// A field value does not match its declared kind.
    #[error("field '{full_name}.{field}' expects {expected}, got {actual}")]
    KindMismatch {
        /// Schema name of the message owning the field.
        full_name: String,
        /// JSON name of the field.
        field: String,
        /// Declared kind.
        expected: String,
        /// Kind of the value actually supplied.
        actual: String,
    },

    /// A type-level custom encoder failed.
    #[error("custom encoder for '{full_name}' failed: {reason}")]
    Custom {
        /// Schema name of the type whose encoder failed.
        full_name: String,
        /// Failure description from the encoder.
        reason: String,
    },

    /// Message nesting exceeded the configured limit.
    #[error("message nesting exceeds maximum depth of {0}")]
    DepthExceeded(usize),

    /// The raw encoding could not be canonicalized.
    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),
}

impl EncodingError {
    /// Wrap a failure reported by a custom encoder.
    pub fn custom(full_name: &str, reason: impl Into<String>) -> Self {
        Self::Custom {
            full_name: full_name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// The input is not well-formed JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    /// Object/array nesting exceeded the configured limit.
    #[error("JSON nesting exceeds maximum depth of {0}")]
    DepthExceeded(usize),

    /// Reserialization of a parsed document failed.
    #[error("serialization failed: {0}")]
    Serialization(serde_json::Error),
}

/// Error loading or validating codec configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The YAML document could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A value is out of range.
    #[error("invalid config value for '{field}': {reason}")]
    Invalid {
        /// Config key.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
