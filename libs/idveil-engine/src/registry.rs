use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use idveil_api::schema::TagSchema;

use crate::config::VeilConfig;

/// Registry of named tag schemas.
///
/// Uses interior mutability so that new schemas can be added at runtime.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<String, Arc<TagSchema>>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from parsed configuration, registering every
    /// declared schema.
    pub fn from_config(config: &VeilConfig) -> Self {
        let registry = Self::new();
        for schema_cfg in &config.schemas {
            tracing::info!(schema = %schema_cfg.name, fields = schema_cfg.fields.len(), "registered tag schema");
            registry.register(&schema_cfg.name, schema_cfg.tags());
        }
        registry
    }

    pub fn register(&self, name: &str, tags: TagSchema) {
        let mut guard = match self.schemas.write() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("schema registry write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.insert(name.to_string(), Arc::new(tags));
    }

    pub fn get(&self, name: &str) -> Option<Arc<TagSchema>> {
        let guard = match self.schemas.read() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("schema registry read lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        let guard = match self.schemas.read() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("schema registry read lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        let guard = match self.schemas.read() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("schema registry read lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use idveil_api::schema::{FieldTag, Op};

    use super::*;

    #[test]
    fn register_and_get() {
        let registry = SchemaRegistry::new();
        assert!(!registry.contains("order"));

        let tags = TagSchema::new(vec![FieldTag::new("ID").with_op(Op::Encode)]);
        registry.register("order", tags);

        assert!(registry.contains("order"));
        let fetched = registry.get("order").unwrap();
        assert_eq!(fetched.op("ID"), Some(Op::Encode));
        assert!(registry.get("user").is_none());
    }

    #[test]
    fn from_config_registers_every_schema() {
        let config = VeilConfig::parse(
            r#"
            [[schemas]]
            name = "order"

            [[schemas.fields]]
            name = "ID"
            op = "encode"

            [[schemas]]
            name = "user"

            [[schemas.fields]]
            name = "ID"
            op = "decode"
            "#,
        )
        .unwrap();

        let registry = SchemaRegistry::from_config(&config);

        let mut names = registry.names();
        names.sort();
        assert_eq!(names, ["order", "user"]);
        assert_eq!(registry.get("user").unwrap().op("ID"), Some(Op::Decode));
    }
}
