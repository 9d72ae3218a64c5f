//! # Canonical Serialization: Sorted-Key Legacy JSON
//!
//! This module defines `CanonicalBytes`, the sole construction path for bytes
//! that leave the codec: marshal output, sign bytes, and digest input.
//!
//! ## Invariants
//!
//! - At every object nesting level, keys appear in strict byte-wise
//!   lexicographic order. Array order is preserved. Scalars are untouched:
//!   numbers keep their literal text (`1e2` stays `1e2`, integers beyond
//!   64 bits keep every digit). This relies on serde_json's
//!   `arbitrary_precision` feature, enabled at the workspace level.
//! - Output is compact: no whitespace between tokens.
//! - `sort_json(sort_json(b)) == sort_json(b)` for every valid document `b`.
//! - Malformed input is rejected with `InvalidJson`. There is no repair.
//!
//! ## Legacy Escaping
//!
//! The legacy encoder wrote `<`, `>`, `&`, U+2028 and U+2029 as `\u`
//! escapes. Reproducing that is required for byte equality with historical
//! sign bytes, so it is on by default (see [`CodecConfig::escape_html`]).
//!
//! Key ordering does not rely on `serde_json::Map` iteration order, which
//! changes when any crate in the build enables `preserve_order`.

use std::io;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::ser::Formatter;
use serde_json::Value;

use crate::config::CodecConfig;
use crate::error::CanonicalizationError;

/// Bytes produced exclusively by sorted-key legacy canonicalization.
///
/// # Invariants
///
/// - The only constructors are [`sort_json`], [`sort_json_with`],
///   [`CanonicalBytes::new`] and [`CanonicalBytes::from_value`].
/// - The contents are valid UTF-8 JSON with sorted keys at every level.
///
/// These invariants cannot be violated by downstream code because the
/// inner `Vec<u8>` is private.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value using the
    /// default configuration.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj).map_err(CanonicalizationError::Serialization)?;
        Self::from_value(&value, &CodecConfig::default())
    }

    /// Construct canonical bytes from an already-parsed JSON value.
    pub fn from_value(value: &Value, config: &CodecConfig) -> Result<Self, CanonicalizationError> {
        check_depth(value, config.max_depth)?;
        let mut buf = Vec::new();
        let formatter = LegacyFormatter {
            escape_html: config.escape_html,
        };
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        Sorted(value)
            .serialize(&mut ser)
            .map_err(CanonicalizationError::Serialization)?;
        Ok(Self(buf))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume and return the underlying buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<CanonicalBytes> for Vec<u8> {
    fn from(bytes: CanonicalBytes) -> Self {
        bytes.0
    }
}

/// Canonicalize a raw JSON document with the default configuration.
///
/// Standalone entry point, usable on any JSON regardless of where it came
/// from, e.g. as a post-processing step after marshaling.
pub fn sort_json(raw: &[u8]) -> Result<CanonicalBytes, CanonicalizationError> {
    sort_json_with(raw, &CodecConfig::default())
}

/// Canonicalize a raw JSON document.
pub fn sort_json_with(
    raw: &[u8],
    config: &CodecConfig,
) -> Result<CanonicalBytes, CanonicalizationError> {
    let value: Value = serde_json::from_slice(raw).map_err(CanonicalizationError::InvalidJson)?;
    CanonicalBytes::from_value(&value, config)
}

fn check_depth(value: &Value, max_depth: usize) -> Result<(), CanonicalizationError> {
    fn depth(value: &Value) -> usize {
        match value {
            Value::Object(map) => 1 + map.values().map(depth).max().unwrap_or(0),
            Value::Array(items) => 1 + items.iter().map(depth).max().unwrap_or(0),
            _ => 0,
        }
    }
    if depth(value) > max_depth {
        return Err(CanonicalizationError::DepthExceeded(max_depth));
    }
    Ok(())
}

/// Serializes a JSON value with object entries ordered by key bytes.
struct Sorted<'a>(&'a Value);

impl Serialize for Sorted<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Object(map) => {
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    out.serialize_entry(key, &Sorted(value))?;
                }
                out.end()
            }
            Value::Array(items) => {
                let mut out = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    out.serialize_element(&Sorted(item))?;
                }
                out.end()
            }
            scalar => scalar.serialize(serializer),
        }
    }
}

/// Compact formatter with optional legacy HTML-safe string escaping.
struct LegacyFormatter {
    escape_html: bool,
}

impl Formatter for LegacyFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if !self.escape_html {
            return writer.write_all(fragment.as_bytes());
        }
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
