//! # Custom Encoders
//!
//! Type-level overrides of structural encoding. When a registered type
//! carries a [`CustomEncoder`], the field table of that type is ignored and
//! the encoder's output is substituted wherever a value of the type would
//! be encoded (top level, nested message, or inside an envelope).
//!
//! The output must be a complete JSON value. Key ordering inside it does
//! not matter; canonicalization runs afterwards.

use base64::Engine;
use serde_json::Value;

use crate::descriptor::{FieldValue, Message};
use crate::encoder::EncodeContext;
use crate::error::EncodingError;

/// Replaces the default "object of resolved fields" encoding for a type.
pub trait CustomEncoder: Send + Sync {
    /// Encode `message`. Nested values may be encoded through `ctx`.
    fn encode(
        &self,
        message: &dyn Message,
        ctx: &EncodeContext<'_>,
    ) -> Result<Value, EncodingError>;
}

/// Plain functions and closures are encoders. Annotate the closure's
/// argument types so it is inferred for every lifetime.
impl<F> CustomEncoder for F
where
    F: Fn(&dyn Message, &EncodeContext<'_>) -> Result<Value, EncodingError> + Send + Sync,
{
    fn encode(
        &self,
        message: &dyn Message,
        ctx: &EncodeContext<'_>,
    ) -> Result<Value, EncodingError> {
        self(message, ctx)
    }
}

/// Encodes a message as one of its fields, discarding the wrapping object.
///
/// Used for public keys, whose legacy form is the bare base64 key bytes
/// rather than `{"key": "..."}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenField {
    json_name: &'static str,
}

impl FlattenField {
    /// Flatten onto the field with the given JSON name.
    pub const fn new(json_name: &'static str) -> Self {
        Self { json_name }
    }
}

impl CustomEncoder for FlattenField {
    fn encode(
        &self,
        message: &dyn Message,
        ctx: &EncodeContext<'_>,
    ) -> Result<Value, EncodingError> {
        let descriptor = message.descriptor();
        let (index, field) = descriptor.field(self.json_name).ok_or_else(|| {
            EncodingError::custom(
                descriptor.full_name,
                format!("no field named '{}' to flatten onto", self.json_name),
            )
        })?;
        let values = message.field_values();
        let value = values.get(index).ok_or_else(|| EncodingError::SchemaMismatch {
            full_name: descriptor.full_name.to_string(),
            declared: descriptor.fields.len(),
            produced: values.len(),
        })?;
        ctx.encode_field_value(descriptor, field, value)
    }
}

/// Encode a byte payload the way the legacy format does: padded standard
/// base64.
pub fn encode_bytes(bytes: &[u8]) -> Value {
    Value::String(base64::engine::general_purpose::STANDARD.encode(bytes))
}

/// Encode an integer as a quoted decimal string.
pub fn encode_decimal(value: &FieldValue<'_>) -> Option<Value> {
    match value {
        FieldValue::Int(i) => Some(Value::String(i.to_string())),
        FieldValue::Uint(u) => Some(Value::String(u.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldDescriptor, MessageDescriptor, ScalarKind};
    use crate::encoder::LegacyCodec;
    use crate::registry::{Registration, RegistryBuilder};
    use std::sync::Arc;

    #[derive(Debug, Default)]
    struct Height {
        revision: u64,
        height: u64,
    }

    static HEIGHT: MessageDescriptor = MessageDescriptor {
        full_name: "test.Height",
        fields: &[
            FieldDescriptor::scalar("revision", ScalarKind::Uint64),
            FieldDescriptor::scalar("height", ScalarKind::Uint64),
        ],
    };

    impl Message for Height {
        fn descriptor(&self) -> &'static MessageDescriptor {
            &HEIGHT
        }

        fn field_values(&self) -> Vec<FieldValue<'_>> {
            vec![FieldValue::Uint(self.revision), FieldValue::Uint(self.height)]
        }
    }

    fn codec_with(encoder: Arc<dyn CustomEncoder>) -> LegacyCodec {
        let mut builder = RegistryBuilder::new();
        builder
            .register(Registration::concrete(&HEIGHT, "test/Height").with_encoder(encoder))
            .unwrap();
        LegacyCodec::new(Arc::new(builder.build()))
    }

    fn revision_dash_height(
        message: &dyn Message,
        _ctx: &EncodeContext<'_>,
    ) -> Result<Value, EncodingError> {
        let values = message.field_values();
        match (&values[0], &values[1]) {
            (FieldValue::Uint(r), FieldValue::Uint(h)) => Ok(Value::String(format!("{r}-{h}"))),
            _ => Err(EncodingError::custom(
                message.descriptor().full_name,
                "unexpected layout",
            )),
        }
    }

    #[test]
    fn function_encoder_replaces_fields() {
        let codec = codec_with(Arc::new(revision_dash_height));
        let out = codec.marshal_json(&Height { revision: 4, height: 12 }).unwrap();
        assert_eq!(out, br#""4-12""#.to_vec());
    }

    #[test]
    fn closure_encoder_error_propagates() {
        let refusal = String::from("refused");
        let codec = codec_with(Arc::new(
            move |message: &dyn Message, _ctx: &EncodeContext<'_>| -> Result<Value, EncodingError> {
                Err(EncodingError::custom(message.descriptor().full_name, refusal.clone()))
            },
        ));
        assert!(matches!(
            codec.marshal_json(&Height::default()),
            Err(EncodingError::Custom { .. })
        ));
    }

    #[test]
    fn bytes_are_padded_standard_base64() {
        assert_eq!(encode_bytes(&[1]), Value::String("AQ==".into()));
        assert_eq!(encode_bytes(&[]), Value::String(String::new()));
        assert_eq!(encode_bytes(&[0xfb, 0xff]), Value::String("+/8=".into()));
    }

    #[test]
    fn decimal_strings() {
        assert_eq!(encode_decimal(&FieldValue::Uint(2)), Some(Value::String("2".into())));
        assert_eq!(
            encode_decimal(&FieldValue::Uint(u64::MAX)),
            Some(Value::String("18446744073709551615".into()))
        );
        assert_eq!(encode_decimal(&FieldValue::Int(-5)), Some(Value::String("-5".into())));
        assert_eq!(encode_decimal(&FieldValue::Str("2")), None);
    }
}
