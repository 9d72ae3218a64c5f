//! # Codec Configuration
//!
//! Knobs shared by the encoder and the canonicalizer. Defaults reproduce the
//! legacy wire format exactly; deviating from them produces bytes that other
//! legacy implementations will not reproduce.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default nesting limit for encoded messages and parsed JSON documents.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration for [`LegacyCodec`](crate::encoder::LegacyCodec) and
/// [`sort_json_with`](crate::canonical::sort_json_with).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Escape `<`, `>`, `&`, U+2028 and U+2029 as `\u00XX` sequences in
    /// string output, as the legacy encoder did.
    pub escape_html: bool,
    /// Maximum nesting of messages (encoder) or containers (canonicalizer).
    pub max_depth: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            escape_html: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CodecConfig {
    /// Parse and validate a YAML configuration document.
    ///
    /// Missing keys take their default values.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the codec cannot operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "max_depth",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_legacy_format() {
        let config = CodecConfig::default();
        assert!(config.escape_html);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn yaml_partial_document_keeps_defaults() {
        let config = CodecConfig::from_yaml_str("max_depth: 8\n").unwrap();
        assert_eq!(config.max_depth, 8);
        assert!(config.escape_html);
    }

    #[test]
    fn yaml_empty_document_is_default() {
        let config = CodecConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, CodecConfig::default());
    }

    #[test]
    fn yaml_zero_depth_rejected() {
        let err = CodecConfig::from_yaml_str("max_depth: 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_depth", .. }));
    }

    #[test]
    fn yaml_unknown_key_rejected() {
        let err = CodecConfig::from_yaml_str("sort_keys: false").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
