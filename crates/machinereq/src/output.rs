use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use machinereq_schema::{MachineRequest, RequestKind, ValidationErrors};
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Result of validating one payload, as printed by `validate`.
#[derive(Serialize)]
#[serde(untagged)]
pub enum Outcome<'a> {
    Valid {
        kind: RequestKind,
        valid: bool,
        record: &'a MachineRequest,
    },
    Invalid {
        kind: RequestKind,
        valid: bool,
        errors: &'a ValidationErrors,
    },
}

impl<'a> Outcome<'a> {
    pub fn valid(record: &'a MachineRequest) -> Self {
        Outcome::Valid {
            kind: record.kind(),
            valid: true,
            record,
        }
    }

    pub fn invalid(kind: RequestKind, errors: &'a ValidationErrors) -> Self {
        Outcome::Invalid {
            kind,
            valid: false,
            errors,
        }
    }
}

pub fn print_outcome(outcome: &Outcome<'_>, format: OutputFormat) {
    println!("{}", render_outcome(outcome, format));
}

pub fn render_outcome(outcome: &Outcome<'_>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string(outcome).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Table => match outcome {
            Outcome::Valid { record, .. } => {
                let mut table = new_table(vec!["FIELD", "VALUE"]);
                for (field, value) in record_fields(record) {
                    table.add_row(vec![field, display_value(&value)]);
                }
                table.to_string()
            }
            Outcome::Invalid { errors, .. } => {
                let mut table = new_table(vec!["FIELD", "PROBLEM"]);
                for err in errors.iter() {
                    table.add_row(vec![err.field.clone(), err.kind.to_string()]);
                }
                table.to_string()
            }
        },
        OutputFormat::Pretty => match outcome {
            Outcome::Valid { kind, record, .. } => {
                let mut lines = vec![format!("{kind}: valid")];
                for (field, value) in record_fields(record) {
                    lines.push(format!("  {field}={}", display_value(&value)));
                }
                lines.join("\n")
            }
            Outcome::Invalid { kind, errors, .. } => {
                let mut lines = vec![format!("{kind}: {} problem(s)", errors.len())];
                for err in errors.iter() {
                    lines.push(format!("  {err}"));
                }
                lines.join("\n")
            }
        },
    }
}

pub fn print_schema(kind: RequestKind, schema: &Value, format: OutputFormat) {
    println!("{}", render_schema(kind, schema, format));
}

pub fn render_schema(kind: RequestKind, schema: &Value, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(schema).unwrap_or_else(|_| "{}".to_string()),
        OutputFormat::Pretty => {
            serde_json::to_string_pretty(schema).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Table => {
            let required: Vec<&str> = schema["required"]
                .as_array()
                .map(|items| items.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            let mut table = new_table(vec!["FIELD", "TYPE", "REQUIRED", "DEFAULT", "DESCRIPTION"]);
            if let Some(properties) = schema["properties"].as_object() {
                for (field, property) in properties {
                    table.add_row(vec![
                        field.clone(),
                        display_type(&property["type"]),
                        required.contains(&field.as_str()).to_string(),
                        property
                            .get("default")
                            .map(display_value)
                            .unwrap_or_default(),
                        property["description"].as_str().unwrap_or_default().to_string(),
                    ]);
                }
            }
            format!("{}\n{table}", kind.title())
        }
    }
}

#[derive(Serialize)]
struct SchemaCheckOutput<'a> {
    kind: RequestKind,
    conforms: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

pub fn print_schema_check(kind: RequestKind, mismatch: Option<&str>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = SchemaCheckOutput {
                kind,
                conforms: mismatch.is_none(),
                message: mismatch,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => match mismatch {
            None => println!("{kind}: payload conforms to {}", kind.title()),
            Some(message) => println!("{kind}: payload does not conform: {message}"),
        },
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Record values as rows, in the request's declared field order.
fn record_fields(record: &MachineRequest) -> Vec<(String, Value)> {
    let Ok(Value::Object(mut map)) = serde_json::to_value(record) else {
        return Vec::new();
    };
    record
        .kind()
        .fields()
        .iter()
        .filter_map(|spec| {
            map.remove(spec.name)
                .map(|value| (spec.name.to_string(), value))
        })
        .collect()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn display_type(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" | "),
        other => display_value(other),
    }
}

#[cfg(test)]
mod tests {
    use machinereq_schema::{json_schema, AddMachineRequest, RequestError, ValidatorConfig};
    use serde_json::json;

    use super::*;

    fn add_request(input: Value) -> MachineRequest {
        MachineRequest::Add(AddMachineRequest::validate(&input).unwrap())
    }

    #[test]
    fn json_outcome_wraps_record() {
        let record = add_request(json!({ "email": "a@b.com", "number": "123" }));
        let rendered = render_outcome(&Outcome::valid(&record), OutputFormat::Json);
        let value: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(
            value,
            json!({
                "kind": "add-machine",
                "valid": true,
                "record": {
                    "name": "Machine",
                    "location": null,
                    "email": "a@b.com",
                    "number": "123",
                    "enum": false
                }
            })
        );
    }

    #[test]
    fn json_outcome_lists_errors() {
        let err = AddMachineRequest::validate(&json!({ "number": "1" })).unwrap_err();
        let errors = match err {
            RequestError::Invalid(errors) => errors,
            other => panic!("unexpected error: {other:?}"),
        };
        let rendered = render_outcome(
            &Outcome::invalid(RequestKind::AddMachine, &errors),
            OutputFormat::Json,
        );
        let value: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["valid"], false);
        assert_eq!(
            value["errors"],
            json!([{ "field": "email", "reason": "required-field-missing" }])
        );
    }

    #[test]
    fn pretty_and_table_mention_each_field() {
        let record = add_request(json!({ "name": "Lathe-1", "email": "a@b.com", "number": "123" }));

        let pretty = render_outcome(&Outcome::valid(&record), OutputFormat::Pretty);
        assert!(pretty.starts_with("add-machine: valid"));
        assert!(pretty.contains("name=Lathe-1"));
        assert!(pretty.contains("location=-"));

        let table = render_outcome(&Outcome::valid(&record), OutputFormat::Table);
        for field in ["name", "location", "email", "number", "enum"] {
            assert!(table.contains(field), "missing {field} in table");
        }
    }

    #[test]
    fn record_rows_follow_declared_field_order() {
        let record = add_request(json!({ "enum": "on", "number": "9", "email": "a@b.com" }));

        let pretty = render_outcome(&Outcome::valid(&record), OutputFormat::Pretty);
        let fields: Vec<&str> = pretty
            .lines()
            .skip(1)
            .filter_map(|line| line.trim().split_once('=').map(|(field, _)| field))
            .collect();
        assert_eq!(fields, vec!["name", "location", "email", "number", "enum"]);

        let table = render_outcome(&Outcome::valid(&record), OutputFormat::Table);
        let positions: Vec<usize> = ["name", "location", "email", "number", "enum"]
            .iter()
            .map(|field| table.find(&format!(" {field} ")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{table}");
    }

    #[test]
    fn schema_table_shows_required_and_defaults() {
        let schema = json_schema(RequestKind::AddMachine, &ValidatorConfig::default());
        let table = render_schema(RequestKind::AddMachine, &schema, OutputFormat::Table);

        assert!(table.starts_with("AddMachineRequest"));
        assert!(table.contains("Machine email"));
        assert!(table.contains("string | null"));
        assert!(table.contains("true"));
    }
}
