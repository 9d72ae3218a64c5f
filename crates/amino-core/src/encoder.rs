//! # Legacy Encoder
//!
//! Walks a message according to its field table and the registry, and
//! produces canonical legacy JSON.
//!
//! ## Pipeline
//!
//! `LegacyCodec::marshal_json` → structural walk (custom encoders where
//! registered, [`rules::resolve`] for every other field, envelopes for
//! interface values) → JSON value → [`CanonicalBytes`].
//!
//! ## Purity
//!
//! Every call builds its own [`EncodeContext`] borrowing the frozen registry
//! and the configuration. No state survives a call and concurrent calls
//! never interact. An error aborts the whole call; no partial output is
//! returned.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::canonical::CanonicalBytes;
use crate::config::CodecConfig;
use crate::custom::{encode_bytes, encode_decimal};
use crate::descriptor::{
    FieldDescriptor, FieldValue, Message, MessageDescriptor, ScalarKind, ValueKind,
};
use crate::envelope::Envelope;
use crate::error::{ConfigError, EncodingError};
use crate::registry::Registry;
use crate::rules::{self, Emission};

/// Encoder bound to a frozen registry.
#[derive(Debug, Clone)]
pub struct LegacyCodec {
    registry: Arc<Registry>,
    config: CodecConfig,
}

impl LegacyCodec {
    /// Create a codec with the default configuration.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            config: CodecConfig::default(),
        }
    }

    /// Create a codec with an explicit configuration.
    pub fn with_config(registry: Arc<Registry>, config: CodecConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    /// The registry this codec encodes against.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The active configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode `message` to canonical legacy JSON bytes.
    ///
    /// Types registered as [`TypeKind::Interface`](crate::TypeKind::Interface)
    /// are enveloped; anything else, registered or not, is encoded bare.
    pub fn marshal_json(&self, message: &dyn Message) -> Result<Vec<u8>, EncodingError> {
        Ok(self.marshal_canonical(message)?.into_vec())
    }

    /// Same as [`marshal_json`](Self::marshal_json), keeping the
    /// canonical-bytes type for digesting.
    pub fn marshal_canonical(
        &self,
        message: &dyn Message,
    ) -> Result<CanonicalBytes, EncodingError> {
        let value = self.encode_value(message)?;
        Ok(CanonicalBytes::from_value(&value, &self.config)?)
    }

    /// Encode `message` inside an envelope, whatever its registered kind.
    ///
    /// # Errors
    ///
    /// `UnregisteredType` if the type has no registry entry.
    pub fn marshal_interface(&self, message: &dyn Message) -> Result<Vec<u8>, EncodingError> {
        let value = self.context().encode_interface(message)?;
        Ok(CanonicalBytes::from_value(&value, &self.config)?.into_vec())
    }

    /// Encode `message` to a JSON value, before canonicalization.
    pub fn encode_value(&self, message: &dyn Message) -> Result<Value, EncodingError> {
        let ctx = self.context();
        match self.registry.get(message.descriptor().full_name) {
            Some(entry) if entry.is_interface_kind() => ctx.encode_interface(message),
            _ => ctx.encode_message(message),
        }
    }

    fn context(&self) -> EncodeContext<'_> {
        EncodeContext {
            registry: &self.registry,
            config: &self.config,
            depth: 0,
        }
    }
}

/// Per-call encoding state handed to custom encoders.
#[derive(Debug, Clone, Copy)]
pub struct EncodeContext<'r> {
    registry: &'r Registry,
    config: &'r CodecConfig,
    depth: usize,
}

impl<'r> EncodeContext<'r> {
    /// The registry in use.
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Current message nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Encode a message of a statically known type, without an envelope.
    ///
    /// Uses the type's custom encoder when one is registered, the field
    /// table otherwise.
    pub fn encode_message(&self, message: &dyn Message) -> Result<Value, EncodingError> {
        let ctx = self.descend()?;
        let descriptor = message.descriptor();
        if let Some(encoder) = self
            .registry
            .get(descriptor.full_name)
            .and_then(|entry| entry.custom_encoder())
        {
            return encoder.encode(message, &ctx);
        }
        ctx.encode_fields(descriptor, message)
    }

    /// Encode a polymorphic value as `{"type": wire_name, "value": ...}`.
    ///
    /// # Errors
    ///
    /// `UnregisteredType` if the concrete type has no registry entry. The
    /// legacy format cannot represent an unknown variant, so there is no
    /// fallback.
    pub fn encode_interface(&self, message: &dyn Message) -> Result<Value, EncodingError> {
        let entry = self.registry.lookup(message).map_err(|e| {
            tracing::warn!(error = %e, "cannot envelope unregistered interface value");
            e
        })?;
        let inner = self.encode_message(message)?;
        Ok(Envelope::new(entry.wire_name(), inner).into_value())
    }

    /// Encode a single field value that is known to be emitted.
    ///
    /// Kind checks are applied; emission rules are not.
    pub fn encode_field_value(
        &self,
        owner: &MessageDescriptor,
        field: &FieldDescriptor,
        value: &FieldValue<'_>,
    ) -> Result<Value, EncodingError> {
        check_kind(owner, field, value)?;
        match value {
            FieldValue::List(items) => items
                .iter()
                .map(|item| self.encode_element(field, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            FieldValue::Absent if field.kind.is_repeated() => Ok(if field.empty_as_array {
                Value::Array(Vec::new())
            } else {
                Value::Null
            }),
            single => self.encode_element(field, single),
        }
    }

    fn encode_fields(
        &self,
        descriptor: &MessageDescriptor,
        message: &dyn Message,
    ) -> Result<Value, EncodingError> {
        let values = message.field_values();
        if values.len() != descriptor.fields.len() {
            return Err(EncodingError::SchemaMismatch {
                full_name: descriptor.full_name.to_string(),
                declared: descriptor.fields.len(),
                produced: values.len(),
            });
        }

        let mut object = Map::new();
        for (field, value) in descriptor.fields.iter().zip(values.iter()) {
            check_kind(descriptor, field, value)?;
            let encoded = match rules::resolve(field, value) {
                Emission::Omit => continue,
                Emission::Null => Value::Null,
                Emission::EmptyArray => Value::Array(Vec::new()),
                Emission::Value => self.encode_field_value(descriptor, field, value)?,
            };
            object.insert(field.json_name.to_string(), encoded);
        }
        Ok(Value::Object(object))
    }

    fn encode_element(
        &self,
        field: &FieldDescriptor,
        value: &FieldValue<'_>,
    ) -> Result<Value, EncodingError> {
        if field.decimal_string {
            if let Some(decimal) = encode_decimal(value) {
                return Ok(decimal);
            }
        }
        Ok(match value {
            FieldValue::Absent => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(i) => Value::from(*i),
            FieldValue::Uint(u) => Value::from(*u),
            FieldValue::Str(s) => Value::String((*s).to_string()),
            FieldValue::Bytes(b) => encode_bytes(b),
            FieldValue::Message(m) => self.encode_message(*m)?,
            FieldValue::Interface(m) => self.encode_interface(*m)?,
            // Nested sequences are rejected by `check_kind`.
            FieldValue::List(_) => Value::Null,
        })
    }

    fn descend(&self) -> Result<Self, EncodingError> {
        let depth = self.depth + 1;
        if depth > self.config.max_depth {
            return Err(EncodingError::DepthExceeded(self.config.max_depth));
        }
        Ok(Self { depth, ..*self })
    }
}

fn check_kind(
    owner: &MessageDescriptor,
    field: &FieldDescriptor,
    value: &FieldValue<'_>,
) -> Result<(), EncodingError> {
    let ok = match value {
        FieldValue::Absent => true,
        FieldValue::List(items) => {
            field.kind.is_repeated()
                && items
                    .iter()
                    .all(|item| element_matches(field.kind.element(), item))
        }
        single => !field.kind.is_repeated() && element_matches(field.kind, single),
    };
    if ok {
        return Ok(());
    }
    Err(EncodingError::KindMismatch {
        full_name: owner.full_name.to_string(),
        field: field.json_name.to_string(),
        expected: field.kind.to_string(),
        actual: value.kind_name().to_string(),
    })
}

fn element_matches(kind: ValueKind, value: &FieldValue<'_>) -> bool {
    matches!(
        (kind, value),
        (_, FieldValue::Absent)
            | (ValueKind::Scalar(ScalarKind::Bool), FieldValue::Bool(_))
            | (ValueKind::Scalar(ScalarKind::Int32 | ScalarKind::Int64), FieldValue::Int(_))
            | (ValueKind::Scalar(ScalarKind::Uint32 | ScalarKind::Uint64), FieldValue::Uint(_))
            | (ValueKind::Scalar(ScalarKind::String), FieldValue::Str(_))
            | (ValueKind::Scalar(ScalarKind::Bytes), FieldValue::Bytes(_))
            | (ValueKind::Message, FieldValue::Message(_))
            | (ValueKind::Interface, FieldValue::Interface(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom::{CustomEncoder, FlattenField};
    use crate::error::RegistryError;
    use crate::registry::{Registration, RegistryBuilder};

    #[derive(Debug, Default)]
    struct Key {
        key: Vec<u8>,
    }

    static KEY: MessageDescriptor = MessageDescriptor {
        full_name: "test.Key",
        fields: &[FieldDescriptor::scalar("key", ScalarKind::Bytes)],
    };

    impl Message for Key {
        fn descriptor(&self) -> &'static MessageDescriptor {
            &KEY
        }

        fn field_values(&self) -> Vec<FieldValue<'_>> {
            vec![FieldValue::Bytes(&self.key)]
        }
    }

    #[derive(Debug, Default)]
    struct Holder {
        id: u64,
        count: u32,
        label: String,
        inner: Option<Key>,
        required: Option<Key>,
        any: Option<Box<dyn Message>>,
        keys: Vec<Box<dyn Message>>,
        tags: Vec<String>,
    }

    static HOLDER: MessageDescriptor = MessageDescriptor {
        full_name: "test.Holder",
        fields: &[
            FieldDescriptor::scalar("id", ScalarKind::Uint64).keep_empty(),
            FieldDescriptor::scalar("count", ScalarKind::Uint32),
            FieldDescriptor::scalar("label", ScalarKind::String),
            FieldDescriptor::message("inner"),
            FieldDescriptor::message("required").non_nullable().keep_empty(),
            FieldDescriptor::interface("any"),
            FieldDescriptor::repeated_interface("keys").keep_empty().with_empty_array(),
            FieldDescriptor::repeated_scalar("tags", ScalarKind::String).keep_empty(),
        ],
    };

    impl Message for Holder {
        fn descriptor(&self) -> &'static MessageDescriptor {
            &HOLDER
        }

        fn field_values(&self) -> Vec<FieldValue<'_>> {
            vec![
                FieldValue::Uint(self.id),
                FieldValue::Uint(u64::from(self.count)),
                FieldValue::Str(&self.label),
                FieldValue::optional_message(&self.inner),
                FieldValue::optional_message(&self.required),
                FieldValue::optional_interface(&self.any),
                FieldValue::interfaces(&self.keys),
                FieldValue::strs(&self.tags),
            ]
        }
    }

    #[derive(Debug)]
    struct Broken;

    static BROKEN: MessageDescriptor = MessageDescriptor {
        full_name: "test.Broken",
        fields: &[FieldDescriptor::scalar("n", ScalarKind::Int32)],
    };

    impl Message for Broken {
        fn descriptor(&self) -> &'static MessageDescriptor {
            &BROKEN
        }

        fn field_values(&self) -> Vec<FieldValue<'_>> {
            vec![FieldValue::Str("not a number")]
        }
    }

    struct Rejecting;

    impl CustomEncoder for Rejecting {
        fn encode(
            &self,
            message: &dyn Message,
            _ctx: &EncodeContext<'_>,
        ) -> Result<Value, EncodingError> {
            Err(EncodingError::custom(message.descriptor().full_name, "refused"))
        }
    }

    #[derive(Debug, Default)]
    struct Ledger {
        height: Option<u64>,
        nonce: u64,
        entries: Option<Vec<Key>>,
    }

    static LEDGER: MessageDescriptor = MessageDescriptor {
        full_name: "test.Ledger",
        fields: &[
            FieldDescriptor::scalar("height", ScalarKind::Uint64).optional(),
            FieldDescriptor::scalar("nonce", ScalarKind::Uint64)
                .keep_empty()
                .with_json_number(),
            FieldDescriptor::repeated_message("entries").keep_empty(),
        ],
    };

    impl Message for Ledger {
        fn descriptor(&self) -> &'static MessageDescriptor {
            &LEDGER
        }

        fn field_values(&self) -> Vec<FieldValue<'_>> {
            vec![
                FieldValue::optional_uint(self.height),
                FieldValue::Uint(self.nonce),
                FieldValue::optional_messages(&self.entries),
            ]
        }
    }

    fn codec(register_key: bool) -> LegacyCodec {
        let mut builder = RegistryBuilder::new();
        if register_key {
            builder
                .register(
                    Registration::interface(&KEY, "test/Key")
                        .with_encoder(Arc::new(FlattenField::new("key"))),
                )
                .unwrap();
        }
        LegacyCodec::new(Arc::new(builder.build()))
    }

    fn text(codec: &LegacyCodec, message: &dyn Message) -> String {
        String::from_utf8(codec.marshal_json(message).unwrap()).unwrap()
    }

    #[test]
    fn default_holder_applies_field_rules() {
        let out = text(&codec(true), &Holder::default());
        assert_eq!(out, r#"{"id":"0","keys":[],"required":null,"tags":null}"#);
    }

    #[test]
    fn populated_holder() {
        let holder = Holder {
            id: 9,
            count: 3,
            label: "a&b".into(),
            inner: Some(Key { key: vec![1] }),
            required: Some(Key::default()),
            any: Some(Box::new(Key { key: vec![1] })),
            keys: vec![Box::new(Key { key: vec![2] })],
            tags: vec!["x".into()],
        };
        let out = text(&codec(true), &holder);
        assert_eq!(
            out,
            concat!(
                r#"{"any":{"type":"test/Key","value":"AQ=="},"count":3,"id":"9","inner":"AQ==","#,
                r#""keys":[{"type":"test/Key","value":"Ag=="}],"label":"a\u0026b","required":"","tags":["x"]}"#
            )
        );
    }

    #[test]
    fn interface_kind_enveloped_at_top_level() {
        let out = text(&codec(true), &Key { key: vec![1] });
        assert_eq!(out, r#"{"type":"test/Key","value":"AQ=="}"#);
    }

    #[test]
    fn unregistered_top_level_encoded_bare() {
        let out = text(&codec(false), &Key { key: vec![1] });
        assert_eq!(out, r#"{"key":"AQ=="}"#);
    }

    #[test]
    fn unregistered_interface_value_fails() {
        let holder = Holder {
            any: Some(Box::new(Key { key: vec![1] })),
            ..Holder::default()
        };
        let err = codec(false).marshal_json(&holder).unwrap_err();
        assert!(matches!(
            err,
            EncodingError::Registry(RegistryError::UnregisteredType { ref full_name })
                if full_name == "test.Key"
        ));
    }

    #[test]
    fn marshal_interface_requires_registration() {
        let err = codec(false).marshal_interface(&Key::default()).unwrap_err();
        assert!(matches!(err, EncodingError::Registry(_)));
        let out = codec(true).marshal_interface(&Key { key: vec![1] }).unwrap();
        assert_eq!(out, br#"{"type":"test/Key","value":"AQ=="}"#);
    }

    #[test]
    fn kind_mismatch_reported() {
        let err = codec(false).marshal_json(&Broken).unwrap_err();
        match err {
            EncodingError::KindMismatch { full_name, field, expected, actual } => {
                assert_eq!(full_name, "test.Broken");
                assert_eq!(field, "n");
                assert_eq!(expected, "int32");
                assert_eq!(actual, "string");
            }
            other => panic!("expected KindMismatch, got {other}"),
        }
    }

    #[test]
    fn custom_encoder_failure_propagates() {
        let mut builder = RegistryBuilder::new();
        builder
            .register(Registration::concrete(&KEY, "test/Key").with_encoder(Arc::new(Rejecting)))
            .unwrap();
        let codec = LegacyCodec::new(Arc::new(builder.build()));
        let err = codec.marshal_json(&Key::default()).unwrap_err();
        assert!(matches!(err, EncodingError::Custom { ref reason, .. } if reason == "refused"));
    }

    #[test]
    fn depth_limit_enforced() {
        let config = CodecConfig {
            max_depth: 1,
            ..CodecConfig::default()
        };
        let codec =
            LegacyCodec::with_config(Arc::new(RegistryBuilder::new().build()), config).unwrap();
        assert!(codec.marshal_json(&Key::default()).is_ok());
        let holder = Holder {
            required: Some(Key::default()),
            ..Holder::default()
        };
        assert!(matches!(
            codec.marshal_json(&holder).unwrap_err(),
            EncodingError::DepthExceeded(1)
        ));
    }

    #[test]
    fn marshal_is_deterministic() {
        let codec = codec(true);
        let holder = Holder {
            id: 1,
            keys: vec![Box::new(Key { key: vec![1, 2, 3] })],
            ..Holder::default()
        };
        assert_eq!(codec.marshal_json(&holder).unwrap(), codec.marshal_json(&holder).unwrap());
    }

    #[test]
    fn zero_depth_config_rejected() {
        let config = CodecConfig {
            max_depth: 0,
            ..CodecConfig::default()
        };
        assert!(LegacyCodec::with_config(Arc::new(Registry::default()), config).is_err());
    }

    #[test]
    fn optional_scalars_and_sequences() {
        let codec = codec(false);
        assert_eq!(text(&codec, &Ledger::default()), r#"{"entries":null,"nonce":0}"#);

        let present_zero = Ledger {
            height: Some(0),
            entries: Some(Vec::new()),
            ..Ledger::default()
        };
        assert_eq!(text(&codec, &present_zero), r#"{"entries":null,"nonce":0}"#);

        let populated = Ledger {
            height: Some(5),
            nonce: u64::MAX,
            entries: Some(vec![Key { key: vec![1] }]),
        };
        assert_eq!(
            text(&codec, &populated),
            r#"{"entries":[{"key":"AQ=="}],"height":"5","nonce":18446744073709551615}"#
        );
    }
}
