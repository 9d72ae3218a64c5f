//! # Message and Field Descriptors
//!
//! Static schema metadata for every message the codec can encode. Each
//! message type owns one `'static` [`MessageDescriptor`] whose field table
//! carries the legacy emission policy of every field. The policy is read
//! from the table, never inferred from the in-memory shape of a value.
//!
//! ## Constructor Defaults
//!
//! The `FieldDescriptor` constructors start from the legacy defaults and
//! are adjusted with chained `const fn` modifiers:
//!
//! | Constructor | `nullable` | `omit_empty` | `decimal_string` |
//! |-------------|-----------|--------------|------------------|
//! | `scalar` | no | yes | 64-bit integers only |
//! | `message` / `interface` | yes | yes | no |
//! | `repeated_*` | no | yes | 64-bit integers only |

use std::fmt;

/// Scalar value kinds understood by the legacy format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `true` / `false`.
    Bool,
    /// 32-bit signed integer. Enums use this kind.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit unsigned integer.
    Uint32,
    /// 64-bit unsigned integer.
    Uint64,
    /// UTF-8 string.
    String,
    /// Byte payload, rendered as padded standard base64.
    Bytes,
}

impl ScalarKind {
    /// Kind name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::String => "string",
            Self::Bytes => "bytes",
        }
    }

    const fn is_wide_integer(&self) -> bool {
        matches!(self, Self::Int64 | Self::Uint64)
    }
}

/// Declared kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A single scalar.
    Scalar(ScalarKind),
    /// A nested message of a statically known type, encoded directly.
    Message,
    /// A polymorphic value, encoded inside a `{"type","value"}` envelope.
    Interface,
    /// A sequence of scalars.
    RepeatedScalar(ScalarKind),
    /// A sequence of nested messages.
    RepeatedMessage,
    /// A sequence of polymorphic values.
    RepeatedInterface,
}

impl ValueKind {
    /// Whether the field holds a sequence.
    pub fn is_repeated(&self) -> bool {
        matches!(
            self,
            Self::RepeatedScalar(_) | Self::RepeatedMessage | Self::RepeatedInterface
        )
    }

    /// The kind of a single element. Non-repeated kinds return themselves.
    pub fn element(&self) -> ValueKind {
        match self {
            Self::RepeatedScalar(kind) => Self::Scalar(*kind),
            Self::RepeatedMessage => Self::Message,
            Self::RepeatedInterface => Self::Interface,
            other => *other,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => f.write_str(kind.as_str()),
            Self::Message => f.write_str("message"),
            Self::Interface => f.write_str("interface"),
            Self::RepeatedScalar(kind) => write!(f, "repeated {}", kind.as_str()),
            Self::RepeatedMessage => f.write_str("repeated message"),
            Self::RepeatedInterface => f.write_str("repeated interface"),
        }
    }
}

/// Emission policy and shape of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// Key emitted in the JSON object.
    pub json_name: &'static str,
    /// Declared kind.
    pub kind: ValueKind,
    /// Pointer-like field: omitted whenever absent or zero.
    pub nullable: bool,
    /// Omitted when equal to the zero value of its kind.
    pub omit_empty: bool,
    /// Integers are rendered as quoted decimal strings.
    pub decimal_string: bool,
    /// An empty sequence that is not omitted renders `[]` instead of `null`.
    pub empty_as_array: bool,
}

impl FieldDescriptor {
    const fn base(json_name: &'static str, kind: ValueKind, nullable: bool, wide: bool) -> Self {
        Self {
            json_name,
            kind,
            nullable,
            omit_empty: true,
            decimal_string: wide,
            empty_as_array: false,
        }
    }

    /// A scalar field.
    pub const fn scalar(json_name: &'static str, kind: ScalarKind) -> Self {
        Self::base(json_name, ValueKind::Scalar(kind), false, kind.is_wide_integer())
    }

    /// A nested message field. Nullable by default.
    pub const fn message(json_name: &'static str) -> Self {
        Self::base(json_name, ValueKind::Message, true, false)
    }

    /// A polymorphic field. Nullable by default.
    pub const fn interface(json_name: &'static str) -> Self {
        Self::base(json_name, ValueKind::Interface, true, false)
    }

    /// A sequence of scalars.
    pub const fn repeated_scalar(json_name: &'static str, kind: ScalarKind) -> Self {
        Self::base(json_name, ValueKind::RepeatedScalar(kind), false, kind.is_wide_integer())
    }

    /// A sequence of nested messages.
    pub const fn repeated_message(json_name: &'static str) -> Self {
        Self::base(json_name, ValueKind::RepeatedMessage, false, false)
    }

    /// A sequence of polymorphic values.
    pub const fn repeated_interface(json_name: &'static str) -> Self {
        Self::base(json_name, ValueKind::RepeatedInterface, false, false)
    }

    /// Mark the field as always present at the schema level.
    pub const fn non_nullable(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Mark the field as optional (pointer-like).
    pub const fn optional(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Disable omit-empty: zero values are emitted, absent values as `null`.
    pub const fn keep_empty(mut self) -> Self {
        self.omit_empty = false;
        self
    }

    /// Render integers as quoted decimal strings.
    pub const fn with_decimal_string(mut self) -> Self {
        self.decimal_string = true;
        self
    }

    /// Render integers as JSON numbers, even 64-bit ones.
    pub const fn with_json_number(mut self) -> Self {
        self.decimal_string = false;
        self
    }

    /// Render an emitted empty sequence as `[]`.
    pub const fn with_empty_array(mut self) -> Self {
        self.empty_as_array = true;
        self
    }
}

/// Static schema description of a message type.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct MessageDescriptor {
    /// Fully-qualified schema name, unique per concrete type.
    pub full_name: &'static str,
    /// Field table in declaration order.
    pub fields: &'static [FieldDescriptor],
}

impl MessageDescriptor {
    /// Find a field by its JSON name.
    pub fn field(&self, json_name: &str) -> Option<(usize, &'static FieldDescriptor)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, f)| f.json_name == json_name)
    }
}

/// A message the codec can encode.
///
/// `field_values()` must return exactly one value per entry of
/// `descriptor().fields`, in the same order.
pub trait Message: fmt::Debug + Send + Sync {
    /// Static schema description of this type.
    fn descriptor(&self) -> &'static MessageDescriptor;

    /// Current field values, in field-table order.
    fn field_values(&self) -> Vec<FieldValue<'_>>;
}

/// A borrowed field value.
#[derive(Debug, Clone)]
pub enum FieldValue<'a> {
    /// A nil reference.
    Absent,
    /// Boolean scalar.
    Bool(bool),
    /// Signed integer scalar.
    Int(i64),
    /// Unsigned integer scalar.
    Uint(u64),
    /// String scalar.
    Str(&'a str),
    /// Byte payload.
    Bytes(&'a [u8]),
    /// Nested message of a statically known type.
    Message(&'a dyn Message),
    /// Polymorphic value.
    Interface(&'a dyn Message),
    /// Sequence elements.
    List(Vec<FieldValue<'a>>),
}

impl<'a> FieldValue<'a> {
    /// An optional nested message.
    pub fn optional_message<M: Message>(value: &'a Option<M>) -> Self {
        match value {
            Some(m) => Self::Message(m),
            None => Self::Absent,
        }
    }

    /// An optional polymorphic value.
    pub fn optional_interface(value: &'a Option<Box<dyn Message>>) -> Self {
        match value {
            Some(m) => Self::Interface(m.as_ref()),
            None => Self::Absent,
        }
    }

    /// An optional unsigned integer.
    pub fn optional_uint(value: Option<u64>) -> Self {
        value.map_or(Self::Absent, Self::Uint)
    }

    /// An optional signed integer.
    pub fn optional_int(value: Option<i64>) -> Self {
        value.map_or(Self::Absent, Self::Int)
    }

    /// A sequence of nested messages.
    pub fn messages<M: Message>(items: &'a [M]) -> Self {
        Self::List(items.iter().map(|m| Self::Message(m)).collect())
    }

    /// An optional sequence of nested messages; `None` models a nil slice.
    pub fn optional_messages<M: Message>(items: &'a Option<Vec<M>>) -> Self {
        match items {
            Some(items) => Self::messages(items),
            None => Self::Absent,
        }
    }

    /// A sequence of polymorphic values.
    pub fn interfaces(items: &'a [Box<dyn Message>]) -> Self {
        Self::List(items.iter().map(|m| Self::Interface(m.as_ref())).collect())
    }

    /// A sequence of strings.
    pub fn strs(items: &'a [String]) -> Self {
        Self::List(items.iter().map(|s| Self::Str(s)).collect())
    }

    /// Kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Bool(_) => "bool",
            Self::Int(_) => "signed integer",
            Self::Uint(_) => "unsigned integer",
            Self::Str(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Message(_) => "message",
            Self::Interface(_) => "interface",
            Self::List(_) => "list",
        }
    }

    /// Whether the value equals the zero value of its kind.
    ///
    /// Absent values, `false`, `0`, `""`, empty bytes and empty sequences
    /// are zero. A nested message is zero when all of its fields are. A
    /// present polymorphic value never is.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Bool(b) => !b,
            Self::Int(i) => *i == 0,
            Self::Uint(u) => *u == 0,
            Self::Str(s) => s.is_empty(),
            Self::Bytes(b) => b.is_empty(),
            Self::Message(m) => m.field_values().iter().all(FieldValue::is_zero),
            Self::Interface(_) => false,
            Self::List(items) => items.is_empty(),
        }
    }

    /// Whether the value is an absent reference or an empty sequence.
    pub fn is_empty_sequence(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::List(items) => items.is_empty(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Pair {
        left: u64,
        right: String,
    }

    static PAIR: MessageDescriptor = MessageDescriptor {
        full_name: "test.Pair",
        fields: &[
            FieldDescriptor::scalar("left", ScalarKind::Uint64),
            FieldDescriptor::scalar("right", ScalarKind::String),
        ],
    };

    impl Message for Pair {
        fn descriptor(&self) -> &'static MessageDescriptor {
            &PAIR
        }

        fn field_values(&self) -> Vec<FieldValue<'_>> {
            vec![FieldValue::Uint(self.left), FieldValue::Str(&self.right)]
        }
    }

    #[test]
    fn scalar_defaults() {
        let f = FieldDescriptor::scalar("id", ScalarKind::Uint64);
        assert!(!f.nullable);
        assert!(f.omit_empty);
        assert!(f.decimal_string);
        assert!(!FieldDescriptor::scalar("n", ScalarKind::Uint32).decimal_string);
    }

    #[test]
    fn message_defaults_nullable() {
        let f = FieldDescriptor::message("params");
        assert!(f.nullable);
        assert!(!f.non_nullable().nullable);
    }

    #[test]
    fn modifiers_compose() {
        let f = FieldDescriptor::repeated_interface("pubkeys")
            .keep_empty()
            .with_empty_array();
        assert!(!f.omit_empty);
        assert!(f.empty_as_array);
        assert_eq!(f.kind.element(), ValueKind::Interface);
        assert_eq!(f.kind.to_string(), "repeated interface");
    }

    #[test]
    fn zero_values() {
        assert!(FieldValue::Absent.is_zero());
        assert!(FieldValue::Uint(0).is_zero());
        assert!(!FieldValue::Int(-1).is_zero());
        assert!(FieldValue::Str("").is_zero());
        assert!(FieldValue::Bytes(&[]).is_zero());
        assert!(!FieldValue::Bytes(&[1]).is_zero());
        assert!(FieldValue::List(vec![]).is_zero());
        assert!(!FieldValue::Bool(true).is_zero());
    }

    #[test]
    fn nested_message_zero_when_all_fields_zero() {
        let empty = Pair::default();
        assert!(FieldValue::Message(&empty).is_zero());
        let set = Pair {
            left: 1,
            right: String::new(),
        };
        assert!(!FieldValue::Message(&set).is_zero());
        assert!(!FieldValue::Interface(&empty).is_zero());
    }

    #[test]
    fn field_lookup_by_json_name() {
        let (index, field) = PAIR.field("right").unwrap();
        assert_eq!(index, 1);
        assert_eq!(field.kind, ValueKind::Scalar(ScalarKind::String));
        assert!(PAIR.field("missing").is_none());
    }
}
