//! Error types for the tuple codec.

use std::fmt;

/// Stable, machine-readable decode failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The top-level JSON value is not an array.
    MalformedArray,
    /// An element could not be converted to its slot's declared type.
    TypeMismatch,
    /// The array is longer than the declared arity (strict mode only).
    TrailingElements,
}

impl DecodeErrorKind {
    /// Returns the string code for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedArray => "MALFORMED_ARRAY",
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::TrailingElements => "TRAILING_ELEMENTS",
        }
    }
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to decode a JSON array into a tuple record.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("expected a JSON array: {source}")]
    MalformedArray {
        #[source]
        source: serde_json::Error,
    },

    #[error("tuple element {position} ({name}) has the wrong type: {source}")]
    TypeMismatch {
        position: usize,
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("tuple has {actual} elements but declares {expected} slots")]
    TrailingElements { expected: usize, actual: usize },
}

impl DecodeError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            DecodeError::MalformedArray { .. } => DecodeErrorKind::MalformedArray,
            DecodeError::TypeMismatch { .. } => DecodeErrorKind::TypeMismatch,
            DecodeError::TrailingElements { .. } => DecodeErrorKind::TrailingElements,
        }
    }

    /// Position of the offending element, if the error concerns one.
    pub fn position(&self) -> Option<usize> {
        match self {
            DecodeError::TypeMismatch { position, .. } => Some(*position),
            DecodeError::TrailingElements { expected, .. } => Some(*expected),
            DecodeError::MalformedArray { .. } => None,
        }
    }

    /// Name of the offending slot, if known.
    pub fn slot_name(&self) -> Option<&'static str> {
        match self {
            DecodeError::TypeMismatch { name, .. } => Some(*name),
            _ => None,
        }
    }
}

/// Stable, machine-readable encode failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeErrorKind {
    /// A slot value has no JSON serialization.
    SerializationFailure,
}

/// Failure to encode a tuple record as a JSON array.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("tuple element {position} ({name}) cannot be serialized: {source}")]
    SerializationFailure {
        position: usize,
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("tuple array cannot be serialized: {0}")]
    Json(#[from] serde_json::Error),
}

impl EncodeError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> EncodeErrorKind {
        EncodeErrorKind::SerializationFailure
    }

    /// Position of the slot that failed to serialize.
    pub fn position(&self) -> Option<usize> {
        match self {
            EncodeError::SerializationFailure { position, .. } => Some(*position),
            EncodeError::Json(_) => None,
        }
    }
}

/// One step on the path from a tuple record down to a failing value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A positional tuple slot.
    Slot { position: usize, name: &'static str },
    /// A named field of a nested record or a map key.
    Field(String),
    /// An element of a nested sequence.
    Index(usize),
}

impl PathSegment {
    /// Shorthand for a named field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Slot { name, .. } => f.write_str(name),
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// What went wrong with a validated value.
///
/// An empty required string counts as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required value is absent.
    MissingRequired,
}

impl ValidationErrorKind {
    /// Returns the string code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorKind::MissingRequired => "MISSING_REQUIRED",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrorKind::MissingRequired => f.write_str("is required"),
        }
    }
}

/// A single validation failure, located by its path from the outermost record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// Outermost segment first.
    pub path: Vec<PathSegment>,
}

impl ValidationError {
    /// A required value at `segment` is absent.
    pub fn missing(segment: PathSegment) -> Self {
        Self {
            kind: ValidationErrorKind::MissingRequired,
            path: vec![segment],
        }
    }

    /// Re-roots this error under an enclosing segment.
    pub fn within(mut self, segment: PathSegment) -> Self {
        self.path.insert(0, segment);
        self
    }

    /// Position of the outermost tuple slot on the path.
    pub fn position(&self) -> Option<usize> {
        self.path.iter().find_map(|segment| match segment {
            PathSegment::Slot { position, .. } => Some(*position),
            _ => None,
        })
    }

    /// Name of the outermost segment (the slot name for tuple records).
    pub fn name(&self) -> Option<String> {
        self.path.first().map(|segment| segment.to_string())
    }

    /// Dotted path to the failing value, e.g. `event.hardware_id`.
    pub fn dotted_path(&self) -> String {
        self.path
            .iter()
            .map(|segment| segment.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "value {}", self.kind)
        } else {
            write!(f, "{} {}", self.dotted_path(), self.kind)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Every validation failure found in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Records a missing-required failure for `field` unless `present`.
    pub fn require_present(&mut self, field: &str, present: bool) {
        if !present {
            self.push(ValidationError::missing(PathSegment::field(field)));
        }
    }

    /// Records a missing-required failure for `field` if `value` is empty.
    pub fn require_non_empty(&mut self, field: &str, value: &str) {
        if value.is_empty() {
            self.push(ValidationError::missing(PathSegment::field(field)));
        }
    }

    /// Folds a nested result in, re-rooting its failures under `segment`.
    pub fn nest(&mut self, segment: PathSegment, nested: Result<(), ValidationErrors>) {
        if let Err(nested) = nested {
            self.errors.extend(
                nested
                    .errors
                    .into_iter()
                    .map(|error| error.within(segment.clone())),
            );
        }
    }

    /// `Ok(())` when nothing failed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failure list:")?;
        for error in &self.errors {
            write!(f, "\n{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
