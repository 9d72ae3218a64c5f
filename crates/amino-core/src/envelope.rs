//! # Interface Envelope
//!
//! The `{"type": wire_name, "value": ...}` wrapper around polymorphic values.
//! The encoder builds envelopes; decode-side callers parse them and resolve
//! the wire name back to a registered type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CanonicalizationError, RegistryError};
use crate::registry::{Registry, TypeDescriptor};

/// A polymorphic value tagged with its wire name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    /// Wire name of the concrete type.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Encoding of the concrete value.
    pub value: Value,
}

impl Envelope {
    /// Wrap an encoded value.
    pub fn new(wire_name: &str, value: Value) -> Self {
        Self {
            type_name: wire_name.to_string(),
            value,
        }
    }

    /// Convert into a JSON object.
    pub fn into_value(self) -> Value {
        let mut object = Map::new();
        object.insert("type".to_string(), Value::String(self.type_name));
        object.insert("value".to_string(), self.value);
        Value::Object(object)
    }

    /// Parse an envelope from raw JSON.
    pub fn from_json(raw: &[u8]) -> Result<Self, CanonicalizationError> {
        serde_json::from_slice(raw).map_err(CanonicalizationError::InvalidJson)
    }

    /// Resolve the wire name against a registry.
    pub fn resolve<'r>(&self, registry: &'r Registry) -> Result<&'r TypeDescriptor, RegistryError> {
        registry.resolve_wire_name(&self.type_name)
    }
}
