//! Encoding and decoding configuration.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Options for the JSON parse node and writer.
///
/// Deserializable from a camelCase document; missing keys take their
/// defaults:
///
/// ```json
/// { "pretty": false, "writeNulls": false, "preserveUnknownFields": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JsonConfig {
    /// Indent output.
    pub pretty: bool,
    /// Emit `null` for absent scalar fields instead of omitting them.
    pub write_nulls: bool,
    /// Keep unrecognized wire fields in additional data. When off they are dropped.
    pub preserve_unknown_fields: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            write_nulls: false,
            preserve_unknown_fields: true,
        }
    }
}

impl JsonConfig {
    /// Load a configuration document.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = JsonConfig::default();
        assert!(!config.pretty);
        assert!(!config.write_nulls);
        assert!(config.preserve_unknown_fields);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = JsonConfig::from_json(r#"{"writeNulls": true}"#).unwrap();
        assert!(config.write_nulls);
        assert!(config.preserve_unknown_fields);
    }

    #[test]
    fn test_invalid_document() {
        assert!(JsonConfig::from_json(r#"{"pretty": "yes"}"#).is_err());
    }
}
