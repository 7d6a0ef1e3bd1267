//! Field declarations and per-field coercion.
//!
//! A request is described by a fixed list of [`FieldSpec`]s. The field reader
//! walks an input object against those declarations, applying defaults and
//! coercing values, and accumulates a [`FieldError`] for every field that
//! does not fit instead of stopping at the first one.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::ValidatorConfig;
use crate::error::{FieldError, RequestError, ValidationErrors};

/// Name given to a machine when the request does not supply one.
pub const DEFAULT_MACHINE_NAME: &str = "Machine";

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Boolean,
}

impl FieldType {
    /// JSON Schema `type` keyword for this field type.
    pub fn json_schema_type(self) -> &'static str {
        match self {
            FieldType::Text => "string",
            FieldType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Text => f.write_str("text"),
            FieldType::Boolean => f.write_str("boolean"),
        }
    }
}

/// Value a field takes when its key is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Text(&'static str),
    Boolean(bool),
    Null,
}

impl DefaultValue {
    pub fn to_json(self) -> Value {
        match self {
            DefaultValue::Text(text) => Value::String(text.to_string()),
            DefaultValue::Boolean(flag) => Value::Bool(flag),
            DefaultValue::Null => Value::Null,
        }
    }
}

/// Whether a field must be supplied or falls back to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional(DefaultValue),
}

/// Declaration of one request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name, used verbatim as the JSON key.
    pub name: &'static str,
    pub field_type: FieldType,
    pub presence: Presence,
    /// Accepts an explicit `null`, which resolves to absent.
    pub nullable: bool,
    pub description: &'static str,
}

impl FieldSpec {
    pub const fn required(
        name: &'static str,
        field_type: FieldType,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            field_type,
            presence: Presence::Required,
            nullable: false,
            description,
        }
    }

    pub const fn optional(
        name: &'static str,
        field_type: FieldType,
        default: DefaultValue,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            field_type,
            presence: Presence::Optional(default),
            nullable: false,
            description,
        }
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }
}

/// Name of the JSON type of `value`, as reported in diagnostics.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Coerce a supplied value to text. Only JSON strings qualify.
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        _ => None,
    }
}

/// Coerce a supplied value to a boolean.
///
/// Accepts JSON booleans, the integer literals `0` and `1` (not `0.0` or
/// `1.0`), and the usual textual spellings (`true`/`false`, `yes`/`no`,
/// `on`/`off`, `t`/`f`, `y`/`n`, `1`/`0`). Spellings are matched
/// case-insensitively after trimming surrounding whitespace.
pub fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "t" | "y" | "1" => Some(true),
            "false" | "no" | "off" | "f" | "n" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Borrow `value` as an object, or report what it was instead.
pub(crate) fn as_object(value: &Value) -> Result<&Map<String, Value>, RequestError> {
    value
        .as_object()
        .ok_or_else(|| RequestError::NotAnObject(json_type_name(value)))
}

/// Reads declared fields out of one input object, collecting every failure.
///
/// Accessors always return a value so callers can keep reading after a bad
/// field; the placeholder returned for a failed field is never observable
/// because [`FieldReader::finish`] then reports the failure.
pub(crate) struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(object: &'a Map<String, Value>) -> Self {
        Self {
            object,
            errors: Vec::new(),
        }
    }

    /// Supplied value for `spec`, or its default when absent.
    ///
    /// `None` means the field is required and missing; the error is recorded.
    fn lookup(&mut self, spec: &FieldSpec) -> Option<Lookup<'a>> {
        let object = self.object;
        match (object.get(spec.name), spec.presence) {
            (Some(value), _) => Some(Lookup::Supplied(value)),
            (None, Presence::Optional(default)) => Some(Lookup::Default(default)),
            (None, Presence::Required) => {
                self.errors.push(FieldError::missing(spec.name));
                None
            }
        }
    }

    fn mismatch(&mut self, spec: &FieldSpec, value: &Value) {
        self.errors.push(FieldError::type_mismatch(
            spec.name,
            spec.field_type,
            json_type_name(value),
        ));
    }

    pub(crate) fn text(&mut self, spec: &FieldSpec) -> String {
        self.optional_text(spec).unwrap_or_default()
    }

    /// Text field that may resolve to absent, through a `null` default or an
    /// explicit `null` on a nullable field.
    pub(crate) fn optional_text(&mut self, spec: &FieldSpec) -> Option<String> {
        match self.lookup(spec)? {
            Lookup::Default(DefaultValue::Text(text)) => Some(text.to_string()),
            Lookup::Default(_) => None,
            Lookup::Supplied(Value::Null) if spec.nullable => None,
            Lookup::Supplied(value) => {
                let text = coerce_text(value);
                if text.is_none() {
                    self.mismatch(spec, value);
                }
                text
            }
        }
    }

    pub(crate) fn boolean(&mut self, spec: &FieldSpec) -> bool {
        match self.lookup(spec) {
            Some(Lookup::Default(DefaultValue::Boolean(flag))) => flag,
            Some(Lookup::Supplied(value)) => match coerce_bool(value) {
                Some(flag) => flag,
                None => {
                    self.mismatch(spec, value);
                    false
                }
            },
            _ => false,
        }
    }

    /// Report unknown keys when strict, then hand back any collected errors.
    pub(crate) fn finish(
        mut self,
        fields: &[FieldSpec],
        config: &ValidatorConfig,
    ) -> Result<(), ValidationErrors> {
        if config.strict_mode {
            for key in self.object.keys() {
                if !fields.iter().any(|spec| spec.name == key) {
                    self.errors.push(FieldError::unknown(key.as_str()));
                }
            }
        }

        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::new(self.errors))
        }
    }
}

enum Lookup<'a> {
    Supplied(&'a Value),
    Default(DefaultValue),
}
