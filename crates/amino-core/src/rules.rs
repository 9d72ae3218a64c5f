//! # Field Emission Rules
//!
//! Decides, per field, whether the key is written and in what form. Two
//! independent axes from the field table are combined:
//!
//! 1. `nullable` and the value is absent or zero: the key is omitted,
//!    whatever `omit_empty` says.
//! 2. `omit_empty` and the value is zero: the key is omitted.
//! 3. Otherwise the key is written. An absent value, or an empty sequence
//!    without `empty_as_array`, is written as `null`.
//!
//! Type-level custom encoders bypass these rules entirely; see
//! [`crate::custom`].

use crate::descriptor::{FieldDescriptor, FieldValue};

/// How a field appears in the encoded object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// The key is absent from the output.
    Omit,
    /// The key is written with value `null`.
    Null,
    /// The key is written with value `[]`.
    EmptyArray,
    /// The key is written with the encoded value.
    Value,
}

/// Resolve the emission policy for one field value.
pub fn resolve(field: &FieldDescriptor, value: &FieldValue<'_>) -> Emission {
    let zero = value.is_zero();
    if zero && (field.nullable || field.omit_empty) {
        return Emission::Omit;
    }
    if field.kind.is_repeated() && value.is_empty_sequence() {
        return if field.empty_as_array {
            Emission::EmptyArray
        } else {
            Emission::Null
        };
    }
    if matches!(value, FieldValue::Absent) {
        return Emission::Null;
    }
    Emission::Value
}
