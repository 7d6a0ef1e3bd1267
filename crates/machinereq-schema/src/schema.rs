//! JSON Schema export for the request types.
//!
//! Documents are generated from the same [`FieldSpec`] declarations the
//! validators use, so a form builder reading the schema sees the same
//! defaults and required fields the validator enforces.

use serde_json::{json, Map, Value};

use crate::config::ValidatorConfig;
use crate::field::{FieldSpec, Presence};
use crate::registry::RequestKind;

/// Dialect declared by exported documents.
pub const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Build the JSON Schema document describing `kind`.
///
/// In strict mode the document forbids properties outside the declared set.
pub fn json_schema(kind: RequestKind, config: &ValidatorConfig) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for spec in kind.fields() {
        properties.insert(spec.name.to_string(), property_schema(spec));
        if spec.is_required() {
            required.push(Value::String(spec.name.to_string()));
        }
    }

    let mut schema = Map::new();
    schema.insert("$schema".to_string(), Value::String(SCHEMA_DIALECT.to_string()));
    schema.insert("title".to_string(), Value::String(kind.title().to_string()));
    schema.insert("type".to_string(), Value::String("object".to_string()));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }
    if config.strict_mode {
        schema.insert("additionalProperties".to_string(), Value::Bool(false));
    }

    Value::Object(schema)
}

fn property_schema(spec: &FieldSpec) -> Value {
    let json_type = spec.field_type.json_schema_type();
    let mut property = Map::new();
    property.insert("title".to_string(), Value::String(title_case(spec.name)));
    property.insert(
        "description".to_string(),
        Value::String(spec.description.to_string()),
    );
    let type_value = if spec.nullable {
        json!([json_type, "null"])
    } else {
        json!(json_type)
    };
    property.insert("type".to_string(), type_value);
    if let Presence::Optional(default) = spec.presence {
        property.insert("default".to_string(), default.to_json());
    }
    Value::Object(property)
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
