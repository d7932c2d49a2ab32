use std::path::Path;

use serde::Deserialize;

use idveil_api::schema::{FieldTag, TagSchema};

use crate::error::EngineError;

/// Root configuration — parsed from TOML or JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct VeilConfig {
    /// Named tag schema definitions.
    #[serde(default)]
    pub schemas: Vec<SchemaConfig>,
}

/// A named tag schema as declared in configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaConfig {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldTag>,
}

impl SchemaConfig {
    pub fn tags(&self) -> TagSchema {
        TagSchema::new(self.fields.clone())
    }
}

impl VeilConfig {
    /// Load configuration from a file; the format is chosen by extension
    /// (`.json` is JSON, anything else is TOML).
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{path}: {e}")))?;

        let is_json = Path::new(path).extension().is_some_and(|ext| ext == "json");
        let parsed = if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse(&content)
        };
        parsed.map_err(|e| e.with_context(path))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Parse configuration from a JSON string.
    pub fn parse_json(json_str: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json_str).map_err(|e| EngineError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use idveil_api::schema::Op;

    use super::*;

    #[test]
    fn parses_toml_schema_with_nested_tags() {
        let config = VeilConfig::parse(
            r#"
            [[schemas]]
            name = "order"

            [[schemas.fields]]
            name = "ID"
            op = "encode"

            [[schemas.fields]]
            name = "Items"
            op = "encode"

            [[schemas.fields.nested.fields]]
            name = "ID"
            op = "encode"
            "#,
        )
        .unwrap();

        assert_eq!(config.schemas.len(), 1);
        let tags = config.schemas[0].tags();
        assert_eq!(config.schemas[0].name, "order");
        assert_eq!(tags.op("ID"), Some(Op::Encode));
        let nested = tags.nested("Items").unwrap();
        assert_eq!(nested.op("ID"), Some(Op::Encode));
    }

    #[test]
    fn parses_json_schema() {
        let config = VeilConfig::parse_json(
            r#"{
                "schemas": [
                    {
                        "name": "user",
                        "fields": [
                            { "name": "ID", "op": "decode" },
                            { "name": "Username" }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        let tags = config.schemas[0].tags();
        assert_eq!(tags.op("ID"), Some(Op::Decode));
        assert_eq!(tags.op("Username"), None);
    }

    #[test]
    fn unknown_op_is_a_config_error() {
        let err = VeilConfig::parse(
            r#"
            [[schemas]]
            name = "order"

            [[schemas.fields]]
            name = "ID"
            op = "scramble"
            "#,
        )
        .unwrap_err();

        match err {
            EngineError::Config(msg) => assert!(msg.contains("scramble") || msg.contains("op")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn empty_config_has_no_schemas() {
        let config = VeilConfig::parse("").unwrap();
        assert!(config.schemas.is_empty());
    }
}
