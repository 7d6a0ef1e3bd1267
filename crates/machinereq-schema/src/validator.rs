use jsonschema::Validator;
use serde_json::Value;

use crate::error::{RequestError, Result};
use crate::registry::RequestKind;

/// Check `value` against a compiled request schema, reporting up to four
/// schema errors in one message.
pub(crate) fn check_value(kind: RequestKind, value: &Value, validator: &Validator) -> Result<()> {
    let mut errors = validator.iter_errors(value);
    if let Some(first) = errors.next() {
        let mut message = first.to_string();
        for err in errors.take(3) {
            message.push_str("; ");
            message.push_str(&err.to_string());
        }
        return Err(RequestError::SchemaMismatch {
            kind: kind.to_string(),
            message,
        });
    }

    Ok(())
}
