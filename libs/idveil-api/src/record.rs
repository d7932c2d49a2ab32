use crate::value::{Kind, Value};

/// A single named field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

/// Ordered set of named fields.
///
/// Field order is declaration order: the walker visits fields in the order
/// they were set. The transcoder never adds or removes fields on a
/// destination record; it only assigns into fields that already exist.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field. New names append in declaration order;
    /// an existing name keeps its position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.value = value;
        } else {
            self.fields.push(Field { name, value });
        }
    }

    /// Chainable `set` for literal record construction.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Shape descriptor of this record.
    pub fn kind(&self) -> Kind {
        Kind::Record(
            self.fields
                .iter()
                .map(|f| (f.name.clone(), f.value.kind()))
                .collect(),
        )
    }

    /// Fresh instance of the same shape with every field zeroed.
    pub fn zeroed(&self) -> Record {
        let mut rec = Record::new();
        for f in &self.fields {
            rec.set(f.name.clone(), f.value.zeroed());
        }
        rec
    }
}
