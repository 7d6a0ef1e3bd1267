use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use jsonschema::Validator;
use serde::Serialize;
use serde_json::Value;

use crate::add_machine::AddMachineRequest;
use crate::config::ValidatorConfig;
use crate::error::{RequestError, Result};
use crate::field::FieldSpec;
use crate::payload::parse_payload;
use crate::schema::json_schema;
use crate::update_machine::UpdateMachineRequest;
use crate::validator::check_value;

/// The machine operations that accept a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestKind {
    AddMachine,
    UpdateMachine,
}

impl RequestKind {
    pub const ALL: [RequestKind; 2] = [RequestKind::AddMachine, RequestKind::UpdateMachine];

    pub fn as_str(self) -> &'static str {
        match self {
            RequestKind::AddMachine => "add-machine",
            RequestKind::UpdateMachine => "update-machine",
        }
    }

    /// Type name used as the exported schema title.
    pub fn title(self) -> &'static str {
        match self {
            RequestKind::AddMachine => "AddMachineRequest",
            RequestKind::UpdateMachine => "UpdateMachineRequest",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            RequestKind::AddMachine => &AddMachineRequest::FIELDS,
            RequestKind::UpdateMachine => &UpdateMachineRequest::FIELDS,
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "add-machine" | "add" => Ok(RequestKind::AddMachine),
            "update-machine" | "update" => Ok(RequestKind::UpdateMachine),
            other => Err(format!("unknown request kind: {other}")),
        }
    }
}

/// A validated request of either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MachineRequest {
    Add(AddMachineRequest),
    Update(UpdateMachineRequest),
}

impl MachineRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            MachineRequest::Add(_) => RequestKind::AddMachine,
            MachineRequest::Update(_) => RequestKind::UpdateMachine,
        }
    }
}

/// Kind-keyed registry of request validators and their compiled schemas.
///
/// Immutable once built; share it by reference across request handlers.
pub struct RequestRegistry {
    schemas: HashMap<RequestKind, Validator>,
    config: ValidatorConfig,
}

impl RequestRegistry {
    /// Build a registry with default config.
    pub fn new() -> Result<Self> {
        Self::with_config(ValidatorConfig::default())
    }

    /// Build a registry with explicit config, compiling every request schema.
    pub fn with_config(config: ValidatorConfig) -> Result<Self> {
        let mut schemas = HashMap::new();
        for kind in RequestKind::ALL {
            let document = json_schema(kind, &config);
            let compiled = jsonschema::validator_for(&document)
                .map_err(|err| RequestError::CompileFailed(format!("{kind}: {err}")))?;
            schemas.insert(kind, compiled);
        }

        tracing::debug!(
            strict_mode = config.strict_mode,
            kinds = schemas.len(),
            "request registry ready"
        );
        Ok(Self { schemas, config })
    }

    /// Parse and validate a raw request body for `kind`.
    pub fn validate(&self, kind: RequestKind, payload: &[u8]) -> Result<MachineRequest> {
        let value = parse_payload(payload, &self.config)?;
        self.validate_value(kind, &value)
    }

    /// Validate an already parsed request body for `kind`.
    pub fn validate_value(&self, kind: RequestKind, value: &Value) -> Result<MachineRequest> {
        let result = match kind {
            RequestKind::AddMachine => {
                AddMachineRequest::validate_with_config(value, &self.config).map(MachineRequest::Add)
            }
            RequestKind::UpdateMachine => {
                UpdateMachineRequest::validate_with_config(value, &self.config)
                    .map(MachineRequest::Update)
            }
        };

        if let Err(err) = &result {
            tracing::debug!(%kind, error = %err, "request rejected");
        }
        result
    }

    /// Check a raw request body against the exported JSON Schema for `kind`.
    ///
    /// Schemas describe the canonical wire form, so lax spellings the field
    /// validator would coerce (such as `"enum": "yes"`) fail here.
    pub fn check_schema(&self, kind: RequestKind, payload: &[u8]) -> Result<()> {
        let value = parse_payload(payload, &self.config)?;
        self.check_schema_value(kind, &value)
    }

    pub fn check_schema_value(&self, kind: RequestKind, value: &Value) -> Result<()> {
        match self.schemas.get(&kind) {
            Some(validator) => check_value(kind, value, validator),
            None => Err(RequestError::CompileFailed(format!(
                "no schema compiled for {kind}"
            ))),
        }
    }

    /// JSON Schema document for `kind` under this registry's config.
    pub fn schema(&self, kind: RequestKind) -> Value {
        json_schema(kind, &self.config)
    }

    /// Request kinds with a compiled schema.
    pub fn kinds(&self) -> Vec<RequestKind> {
        let mut kinds: Vec<RequestKind> = self.schemas.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// Get registry configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::FieldErrorKind;

    #[test]
    fn dispatches_by_kind() {
        let registry = RequestRegistry::new().unwrap();

        let add = registry
            .validate(RequestKind::AddMachine, br#"{"email":"a@b.com","number":"123"}"#)
            .unwrap();
        assert_eq!(add.kind(), RequestKind::AddMachine);

        let update = registry
            .validate(RequestKind::UpdateMachine, br#"{"name":"Mill"}"#)
            .unwrap();
        assert_eq!(update.kind(), RequestKind::UpdateMachine);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "name": "Mill", "location": null })
        );
    }

    #[test]
    fn same_payload_differs_by_kind() {
        let registry = RequestRegistry::new().unwrap();
        let payload = br#"{"name":"Mill"}"#;

        assert!(registry.validate(RequestKind::UpdateMachine, payload).is_ok());
        let err = registry
            .validate(RequestKind::AddMachine, payload)
            .unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert!(errors.contains("email", &FieldErrorKind::RequiredFieldMissing));
        assert!(errors.contains("number", &FieldErrorKind::RequiredFieldMissing));
    }

    #[test]
    fn strict_registry_rejects_unknown_keys() {
        let permissive = RequestRegistry::new().unwrap();
        let strict = RequestRegistry::with_config(ValidatorConfig::strict()).unwrap();
        let payload = br#"{"name":"Mill","extra":true}"#;

        assert!(permissive.validate(RequestKind::UpdateMachine, payload).is_ok());
        assert!(matches!(
            strict.validate(RequestKind::UpdateMachine, payload),
            Err(RequestError::Invalid(_))
        ));
        assert!(permissive.check_schema(RequestKind::UpdateMachine, payload).is_ok());
        assert!(matches!(
            strict.check_schema(RequestKind::UpdateMachine, payload),
            Err(RequestError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn schema_check_reports_mismatches() {
        let registry = RequestRegistry::new().unwrap();

        assert!(registry
            .check_schema(RequestKind::AddMachine, br#"{"email":"a","number":"1"}"#)
            .is_ok());
        match registry.check_schema(RequestKind::AddMachine, br#"{"email":42}"#) {
            Err(RequestError::SchemaMismatch { kind, message }) => {
                assert_eq!(kind, "add-machine");
                assert!(message.contains("; "), "expected several errors: {message}");
            }
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn validated_outputs_conform_to_exported_schemas() {
        let registry = RequestRegistry::with_config(ValidatorConfig::strict()).unwrap();
        let cases = [
            (RequestKind::AddMachine, json!({ "email": "a@b.com", "number": "123" })),
            (
                RequestKind::AddMachine,
                json!({ "name": "Lathe-1", "location": "Hall B", "email": "e", "number": "n", "enum": "1" }),
            ),
            (RequestKind::UpdateMachine, json!({})),
            (RequestKind::UpdateMachine, json!({ "location": "Bay 2" })),
        ];

        for (kind, input) in cases {
            let request = registry.validate_value(kind, &input).unwrap();
            let output = serde_json::to_value(&request).unwrap();
            registry.check_schema_value(kind, &output).unwrap();
        }
    }

    #[test]
    fn kinds_and_config_access() {
        let registry = RequestRegistry::with_config(ValidatorConfig::strict()).unwrap();
        assert_eq!(
            registry.kinds(),
            vec![RequestKind::AddMachine, RequestKind::UpdateMachine]
        );
        assert!(registry.config().strict_mode);
        assert_eq!(registry.schema(RequestKind::AddMachine)["additionalProperties"], false);
    }

    #[test]
    fn request_kind_parses_and_prints() {
        assert_eq!("add-machine".parse::<RequestKind>(), Ok(RequestKind::AddMachine));
        assert_eq!("Update".parse::<RequestKind>(), Ok(RequestKind::UpdateMachine));
        assert!("delete".parse::<RequestKind>().is_err());
        assert_eq!(RequestKind::UpdateMachine.to_string(), "update-machine");
        assert_eq!(
            serde_json::to_value(RequestKind::AddMachine).unwrap(),
            json!("add-machine")
        );
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RequestRegistry>();
        assert_send_sync::<MachineRequest>();
        assert_send_sync::<RequestError>();
    }
}
