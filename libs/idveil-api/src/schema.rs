use serde::{Deserialize, Serialize};

/// Conversion operation a field tag selects.
///
/// Closed set: an unknown operation is unrepresentable, so a bad `op`
/// string in a schema file fails at parse time rather than at walk time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    /// Numeric identifier → opaque token.
    Encode,
    /// Opaque token → numeric identifier.
    Decode,
}

impl Op {
    pub fn reversed(self) -> Op {
        match self {
            Op::Encode => Op::Decode,
            Op::Decode => Op::Encode,
        }
    }
}

/// Tag declaration for a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldTag {
    pub name: String,

    /// Operation this field participates in. `None` = pass-through.
    /// A field is converted only when its op matches the requested
    /// operation; a `decode` tag is inert during an encode walk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<Op>,

    /// Tags for a record field's own fields, or for the record elements
    /// of a sequence field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<TagSchema>,
}

impl FieldTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            op: None,
            nested: None,
        }
    }

    pub fn with_op(mut self, op: Op) -> Self {
        self.op = Some(op);
        self
    }

    pub fn with_nested(mut self, nested: TagSchema) -> Self {
        self.nested = Some(nested);
        self
    }
}

/// Declarative tag schema for one record shape.
///
/// Decoupled from the record value itself: the same record can be walked
/// under different schemas, and a schema can be declared in configuration
/// instead of code.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TagSchema {
    #[serde(default)]
    pub fields: Vec<FieldTag>,
}

impl TagSchema {
    /// Schema with no tags at all — every field passes through.
    pub fn empty() -> &'static TagSchema {
        static EMPTY: TagSchema = TagSchema { fields: Vec::new() };
        &EMPTY
    }

    pub fn new(fields: Vec<FieldTag>) -> Self {
        Self { fields }
    }

    pub fn tag(&self, name: &str) -> Option<&FieldTag> {
        self.fields.iter().find(|t| t.name == name)
    }

    pub fn op(&self, name: &str) -> Option<Op> {
        self.tag(name).and_then(|t| t.op)
    }

    pub fn nested(&self, name: &str) -> Option<&TagSchema> {
        self.tag(name).and_then(|t| t.nested.as_ref())
    }

    /// The opposite-direction schema: every `encode` becomes `decode` and
    /// vice versa, recursively. Lets one declared schema drive both
    /// directions of a round trip.
    pub fn reversed(&self) -> TagSchema {
        TagSchema {
            fields: self
                .fields
                .iter()
                .map(|t| FieldTag {
                    name: t.name.clone(),
                    op: t.op.map(Op::reversed),
                    nested: t.nested.as_ref().map(|n| n.reversed()),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_schema() -> TagSchema {
        TagSchema::new(vec![
            FieldTag::new("ID").with_op(Op::Encode),
            FieldTag::new("Items").with_op(Op::Encode).with_nested(
                TagSchema::new(vec![FieldTag::new("ID").with_op(Op::Encode)]),
            ),
            FieldTag::new("Note"),
        ])
    }

    #[test]
    fn lookup_by_name() {
        let schema = order_schema();
        assert_eq!(schema.op("ID"), Some(Op::Encode));
        assert_eq!(schema.op("Note"), None);
        assert_eq!(schema.op("Unknown"), None);
        assert!(schema.nested("Items").is_some());
        assert!(schema.nested("ID").is_none());
    }

    #[test]
    fn reversed_flips_ops_recursively() {
        let reversed = order_schema().reversed();
        assert_eq!(reversed.op("ID"), Some(Op::Decode));
        assert_eq!(reversed.op("Note"), None);
        let nested = reversed.nested("Items").unwrap();
        assert_eq!(nested.op("ID"), Some(Op::Decode));
    }

    #[test]
    fn empty_schema_has_no_tags() {
        assert!(TagSchema::empty().tag("ID").is_none());
    }
}
