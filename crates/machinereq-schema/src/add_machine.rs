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
    "Machine name",
);
const LOCATION: FieldSpec = FieldSpec::optional(
    "location",
    FieldType::Text,
    DefaultValue::Null,
    "Machine location",
)
.nullable();
const EMAIL: FieldSpec = FieldSpec::required("email", FieldType::Text, "Machine email");
const NUMBER: FieldSpec = FieldSpec::required("number", FieldType::Text, "Machine number");
const ENUM: FieldSpec = FieldSpec::optional(
    "enum",
    FieldType::Boolean,
    DefaultValue::Boolean(false),
    "Machine enum",
);

/// Validated input for registering a new machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddMachineRequest {
    name: String,
    location: Option<String>,
    email: String,
    number: String,
    #[serde(rename = "enum")]
    enum_flag: bool,
}

impl AddMachineRequest {
    /// Declared fields, in report order.
    pub const FIELDS: [FieldSpec; 5] = [NAME, LOCATION, EMAIL, NUMBER, ENUM];

    /// Validate an untyped input object with the default config.
    pub fn validate(input: &Value) -> Result<Self> {
        Self::validate_with_config(input, &ValidatorConfig::default())
    }

    pub fn validate_with_config(input: &Value, config: &ValidatorConfig) -> Result<Self> {
        let object = as_object(input)?;
        let mut fields = FieldReader::new(object);

        let name = fields.text(&NAME);
        let location = fields.optional_text(&LOCATION);
        let email = fields.text(&EMAIL);
        let number = fields.text(&NUMBER);
        let enum_flag = fields.boolean(&ENUM);
        fields.finish(&Self::FIELDS, config)?;

        Ok(Self {
            name,
            location,
            email,
            number,
            enum_flag,
        })
    }

    /// Parse raw JSON bytes and validate them with the default config.
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

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// The `enum` flag. Its meaning belongs to the caller.
    pub fn enum_flag(&self) -> bool {
        self.enum_flag
    }
}
