use std::fmt;

use serde::Serialize;

use crate::field::FieldType;

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum FieldErrorKind {
    /// A required key was absent from the input.
    #[error("required field missing")]
    RequiredFieldMissing,

    /// The supplied value could not be coerced to the declared type.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: FieldType,
        found: &'static str,
    },

    /// The key is not declared by the request (strict mode only).
    #[error("unknown field")]
    UnknownField,
}

/// A diagnostic naming the offending field and the violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{field}: {kind}")]
pub struct FieldError {
    pub field: String,
    #[serde(flatten)]
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: FieldErrorKind::RequiredFieldMissing,
        }
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: FieldType,
        found: &'static str,
    ) -> Self {
        Self {
            field: field.into(),
            kind: FieldErrorKind::TypeMismatch { expected, found },
        }
    }

    pub fn unknown(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: FieldErrorKind::UnknownField,
        }
    }
}

/// Every field-level problem found in one input, in report order.
///
/// Never empty: validators only build one when at least one field failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<FieldError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self(errors)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Diagnostics reported for `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.0.iter().filter(move |err| err.field == field)
    }

    pub fn contains(&self, field: &str, kind: &FieldErrorKind) -> bool {
        self.0
            .iter()
            .any(|err| err.field == field && &err.kind == kind)
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid field(s): ", self.0.len())?;
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Errors that can occur while turning raw input into a validated request.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The payload is not valid JSON.
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The payload exceeds the configured size limit.
    #[error("payload too large ({size} bytes, limit {limit})")]
    PayloadTooLarge { size: usize, limit: usize },

    /// The payload parsed, but is not a JSON object.
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// One or more fields failed validation.
    #[error("{0}")]
    Invalid(#[from] ValidationErrors),

    /// An exported schema could not be compiled.
    #[error("failed to compile schema: {0}")]
    CompileFailed(String),

    /// The payload does not conform to the exported JSON Schema.
    #[error("schema check failed for {kind}: {message}")]
    SchemaMismatch { kind: String, message: String },
}

impl RequestError {
    /// Field diagnostics, when this is a field validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            RequestError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RequestError>;
