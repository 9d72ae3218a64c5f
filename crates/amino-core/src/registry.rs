//! # Type Registry
//!
//! Maps concrete message types (by fully-qualified schema name) to their
//! stable legacy wire names, and records whether a type is enveloped at
//! the top level and whether it carries a custom encoder.
//!
//! ## Lifecycle
//!
//! Registration happens on a [`RegistryBuilder`], which needs `&mut` access
//! and therefore a single writer. [`RegistryBuilder::build`] freezes it into
//! an immutable [`Registry`] that is `Send + Sync` and is shared across
//! encode calls behind an `Arc`. Nothing can be registered after the freeze,
//! so lookups never race with registration.
//!
//! There is no process-global registry; each codec is handed the registry
//! it encodes against.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::custom::CustomEncoder;
use crate::descriptor::{Message, MessageDescriptor};
use crate::error::RegistryError;

/// Whether a registered type is enveloped when encoded at the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Wrapped as `{"type": wire_name, "value": ...}` at the top level.
    Interface,
    /// Encoded bare at the top level. Still enveloped inside interface fields.
    Concrete,
}

/// Registry entry for one concrete type.
#[derive(Clone)]
pub struct TypeDescriptor {
    full_name: &'static str,
    wire_name: &'static str,
    kind: TypeKind,
    custom_encoder: Option<Arc<dyn CustomEncoder>>,
}

impl TypeDescriptor {
    /// Fully-qualified schema name of the concrete type.
    pub fn full_name(&self) -> &'static str {
        self.full_name
    }

    /// Stable legacy wire name.
    pub fn wire_name(&self) -> &'static str {
        self.wire_name
    }

    /// Top-level envelope behavior.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Whether the type is enveloped at the top level.
    pub fn is_interface_kind(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// The type-level encode override, if any.
    pub fn custom_encoder(&self) -> Option<&dyn CustomEncoder> {
        self.custom_encoder.as_deref()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("full_name", &self.full_name)
            .field("wire_name", &self.wire_name)
            .field("kind", &self.kind)
            .field("custom_encoder", &self.custom_encoder.is_some())
            .finish()
    }
}

/// A pending registration.
///
/// ```
/// use amino_core::{FieldDescriptor, MessageDescriptor, Registration, RegistryBuilder, ScalarKind};
///
/// static PUB_KEY: MessageDescriptor = MessageDescriptor {
///     full_name: "crypto.ed25519.PubKey",
///     fields: &[FieldDescriptor::scalar("key", ScalarKind::Bytes)],
/// };
///
/// let mut builder = RegistryBuilder::new();
/// builder.register(Registration::interface(&PUB_KEY, "tendermint/PubKeyEd25519")).unwrap();
/// let registry = builder.build();
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Clone)]
pub struct Registration {
    descriptor: TypeDescriptor,
}

impl Registration {
    /// Register by schema name.
    pub fn new(full_name: &'static str, wire_name: &'static str, kind: TypeKind) -> Self {
        Self {
            descriptor: TypeDescriptor {
                full_name,
                wire_name,
                kind,
                custom_encoder: None,
            },
        }
    }

    /// A type enveloped at the top level.
    pub fn interface(message: &'static MessageDescriptor, wire_name: &'static str) -> Self {
        Self::new(message.full_name, wire_name, TypeKind::Interface)
    }

    /// A type encoded bare at the top level.
    pub fn concrete(message: &'static MessageDescriptor, wire_name: &'static str) -> Self {
        Self::new(message.full_name, wire_name, TypeKind::Concrete)
    }

    /// Attach a type-level encode override.
    pub fn with_encoder(mut self, encoder: Arc<dyn CustomEncoder>) -> Self {
        self.descriptor.custom_encoder = Some(encoder);
        self
    }
}

/// Mutable registration phase of a [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    by_type: HashMap<&'static str, TypeDescriptor>,
    by_wire_name: HashMap<&'static str, &'static str>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a concrete type.
    ///
    /// # Errors
    ///
    /// - `DuplicateWireName` if the wire name is bound to a different type.
    /// - `DuplicateType` if the type is already registered.
    pub fn register(&mut self, registration: Registration) -> Result<(), RegistryError> {
        let descriptor = registration.descriptor;
        if let Some(existing) = self.by_wire_name.get(descriptor.wire_name) {
            if *existing != descriptor.full_name {
                return Err(RegistryError::DuplicateWireName {
                    wire_name: descriptor.wire_name.to_string(),
                    existing: existing.to_string(),
                    attempted: descriptor.full_name.to_string(),
                });
            }
        }
        if let Some(existing) = self.by_type.get(descriptor.full_name) {
            return Err(RegistryError::DuplicateType {
                full_name: descriptor.full_name.to_string(),
                wire_name: existing.wire_name.to_string(),
            });
        }

        tracing::debug!(
            full_name = descriptor.full_name,
            wire_name = descriptor.wire_name,
            kind = ?descriptor.kind,
            custom_encoder = descriptor.custom_encoder.is_some(),
            "registered legacy type"
        );
        self.by_wire_name
            .insert(descriptor.wire_name, descriptor.full_name);
        self.by_type.insert(descriptor.full_name, descriptor);
        Ok(())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Freeze the registry.
    pub fn build(self) -> Registry {
        tracing::debug!(types = self.by_type.len(), "legacy type registry frozen");
        Registry {
            by_type: self.by_type,
            by_wire_name: self.by_wire_name,
        }
    }
}

/// Immutable registry of concrete types and their wire names.
#[derive(Debug, Default)]
pub struct Registry {
    by_type: HashMap<&'static str, TypeDescriptor>,
    by_wire_name: HashMap<&'static str, &'static str>,
}

impl Registry {
    /// Entry for a schema name, if registered.
    pub fn get(&self, full_name: &str) -> Option<&TypeDescriptor> {
        self.by_type.get(full_name)
    }

    /// Entry for the concrete type of `message`.
    ///
    /// # Errors
    ///
    /// `UnregisteredType` if the type has no entry.
    pub fn lookup(&self, message: &dyn Message) -> Result<&TypeDescriptor, RegistryError> {
        let full_name = message.descriptor().full_name;
        self.get(full_name)
            .ok_or_else(|| RegistryError::UnregisteredType {
                full_name: full_name.to_string(),
            })
    }

    /// Entry bound to a wire name, for decode-side dispatch.
    ///
    /// # Errors
    ///
    /// `UnknownWireName` if nothing is bound to the name.
    pub fn resolve_wire_name(&self, wire_name: &str) -> Result<&TypeDescriptor, RegistryError> {
        self.by_wire_name
            .get(wire_name)
            .and_then(|full_name| self.by_type.get(full_name))
            .ok_or_else(|| RegistryError::UnknownWireName {
                wire_name: wire_name.to_string(),
            })
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Registered entries, ordered by wire name.
    pub fn entries(&self) -> Vec<&TypeDescriptor> {
        let mut entries: Vec<_> = self.by_type.values().collect();
        entries.sort_by_key(|d| d.wire_name);
        entries
    }
}
