use std::fmt;

use crate::record::Record;

/// Canonical value representation.
///
/// Strategy by shape:
/// - Scalars (Uint, Int, Float, Bool): plain copies, cost ~0
/// - Text: owned `String`
/// - Record, Seq: recursive
///
/// `Uint` is the only scalar eligible for forward token conversion and
/// `Text` the only one eligible for reverse conversion; everything else
/// can only pass through.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Uint(u64),
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Record(Record),
    Seq(Seq),
}

impl Value {
    /// Runtime kind of this value.
    ///
    /// A sequence reports its declared element kind, not the kinds of the
    /// individual items it currently holds.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Uint(_) => Kind::Uint,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Bool(_) => Kind::Bool,
            Value::Text(_) => Kind::Text,
            Value::Record(rec) => rec.kind(),
            Value::Seq(seq) => Kind::Seq(Box::new(seq.elem.clone())),
        }
    }

    /// Fresh zero-valued instance of the same shape.
    pub fn zeroed(&self) -> Value {
        self.kind().zero()
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

impl From<Seq> for Value {
    fn from(v: Seq) -> Self {
        Value::Seq(v)
    }
}

/// Recursive type descriptor.
///
/// Two values are directly assignable iff their kinds are equal; for
/// records that means the same field names with the same kinds in the
/// same order.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Uint,
    Int,
    Float,
    Bool,
    Text,
    Record(Vec<(String, Kind)>),
    Seq(Box<Kind>),
}

impl Kind {
    /// Zero value of this kind: 0, empty string, false, record of zeroed
    /// fields, empty sequence.
    pub fn zero(&self) -> Value {
        match self {
            Kind::Uint => Value::Uint(0),
            Kind::Int => Value::Int(0),
            Kind::Float => Value::Float(0.0),
            Kind::Bool => Value::Bool(false),
            Kind::Text => Value::Text(String::new()),
            Kind::Record(fields) => {
                let mut rec = Record::new();
                for (name, kind) in fields {
                    rec.set(name.clone(), kind.zero());
                }
                Value::Record(rec)
            }
            Kind::Seq(elem) => Value::Seq(Seq::new((**elem).clone())),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Uint => write!(f, "u64"),
            Kind::Int => write!(f, "i64"),
            Kind::Float => write!(f, "f64"),
            Kind::Bool => write!(f, "bool"),
            Kind::Text => write!(f, "text"),
            Kind::Record(_) => write!(f, "record"),
            Kind::Seq(elem) => write!(f, "seq<{elem}>"),
        }
    }
}

/// Ordered, variable-length list.
///
/// Carries its declared element kind so that a zero-valued (empty)
/// destination sequence still knows what its elements look like. Items
/// are trusted to match `elem`; leaf conversion re-checks each one.
#[derive(Debug, Clone, PartialEq)]
pub struct Seq {
    pub elem: Kind,
    pub items: Vec<Value>,
}

impl Seq {
    pub fn new(elem: Kind) -> Self {
        Self {
            elem,
            items: Vec::new(),
        }
    }

    /// Sequence of u64 identifiers.
    pub fn from_uints(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            elem: Kind::Uint,
            items: ids.into_iter().map(Value::Uint).collect(),
        }
    }

    /// Sequence of text values.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elem: Kind::Text,
            items: texts.into_iter().map(|s| Value::Text(s.into())).collect(),
        }
    }

    /// Sequence of records sharing `proto`'s shape.
    pub fn of_records(proto: &Record, items: impl IntoIterator<Item = Record>) -> Self {
        Self {
            elem: proto.kind(),
            items: items.into_iter().map(Value::Record).collect(),
        }
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.items.push(value.into());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
