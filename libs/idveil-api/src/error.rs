use std::fmt;

/// Error kind — the closed failure taxonomy.
///
/// Every error aborts the current call; there are no internal retries,
/// and the destination must be discarded by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Structural problem: missing destination field, non-record
    /// destination for a record source, unsupported element kind.
    Shape,
    /// A field's runtime kind does not match what the operation or a
    /// direct copy requires.
    Type,
    /// Reverse conversion met a token the codec cannot resolve.
    InvalidToken,
    /// The codec itself rejected an encode input.
    Codec,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Shape => write!(f, "shape error"),
            ErrorKind::Type => write!(f, "type error"),
            ErrorKind::InvalidToken => write!(f, "invalid token"),
            ErrorKind::Codec => write!(f, "codec error"),
        }
    }
}

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Field(String),
    Index(usize),
}

/// Path from the top-level record to the failing field, e.g.
/// `Items[2].ID`. Built outermost-first as the error unwinds out of
/// nested walks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            match seg {
                Segment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{name}")?;
                }
                Segment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

/// Transcoding error — returned by every engine operation.
#[derive(Debug, Clone)]
pub struct TranscodeError {
    pub kind: ErrorKind,
    pub path: FieldPath,
    pub message: String,
}

impl TranscodeError {
    pub fn shape(msg: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Shape,
            path: FieldPath::default(),
            message: msg.into(),
        }
    }

    pub fn type_error(msg: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Type,
            path: FieldPath::default(),
            message: msg.into(),
        }
    }

    pub fn invalid_token(token: &str) -> Self {
        Self {
            kind: ErrorKind::InvalidToken,
            path: FieldPath::default(),
            message: format!("token {token:?} does not resolve to any id"),
        }
    }

    pub fn codec(msg: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Codec,
            path: FieldPath::default(),
            message: msg.into(),
        }
    }

    /// Prepend a field name as the error unwinds out of a nested walk.
    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        self.path.0.insert(0, Segment::Field(name.into()));
        self
    }

    /// Prepend a sequence index.
    pub fn with_index(mut self, index: usize) -> Self {
        self.path.0.insert(0, Segment::Index(index));
        self
    }
}

impl fmt::Display for TranscodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.kind, self.message)
        } else {
            write!(f, "{} at {}: {}", self.kind, self.path, self.message)
        }
    }
}

impl std::error::Error for TranscodeError {}
