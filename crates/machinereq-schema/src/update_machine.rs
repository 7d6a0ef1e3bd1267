use serde::Serialize;
use serde_json::Value;

use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::field::{
    as_object, DefaultValue, FieldReader, FieldSpec, FieldType, DEFAULT_MACHINE_NAME,
};
use crate::payload::parse_payload;

const NAME: FieldSpec = FieldSpec::optional(
    "name",
    FieldType::Text,
    DefaultValue::Text(DEFAULT_MACHINE_NAME),
    "Machine Name",
);
const LOCATION: FieldSpec = FieldSpec::optional(
    "location",
    FieldType::Text,
    DefaultValue::Null,
    "Machine location",
)
.nullable();

/// Validated input for changing a machine's display metadata.
///
/// Every field has a default, so only wrongly typed values (or unknown keys
/// in strict mode) make validation fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateMachineRequest {
    name: String,
    location: Option<String>,
}

impl UpdateMachineRequest {
    pub const FIELDS: [FieldSpec; 2] = [NAME, LOCATION];

    pub fn validate(input: &Value) -> Result<Self> {
        Self::validate_with_config(input, &ValidatorConfig::default())
    }

    pub fn validate_with_config(input: &Value, config: &ValidatorConfig) -> Result<Self> {
        let object = as_object(input)?;
        let mut fields = FieldReader::new(object);

        let name = fields.text(&NAME);
        let location = fields.optional_text(&LOCATION);
        fields.finish(&Self::FIELDS, config)?;

        Ok(Self { name, location })
    }

    pub fn from_slice(payload: &[u8]) -> Result<Self> {
        Self::from_slice_with_config(payload, &ValidatorConfig::default())
    }

    pub fn from_slice_with_config(payload: &[u8], config: &ValidatorConfig) -> Result<Self> {
        let value = parse_payload(payload, config)?;
        Self::validate_with_config(&value, config)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}
