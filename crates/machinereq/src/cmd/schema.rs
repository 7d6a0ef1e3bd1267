use machinereq_schema::{RequestError, RequestKind, RequestRegistry, ValidatorConfig};

use crate::cmd::SchemaArgs;
use crate::exit::{request_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_schema, print_schema_check, OutputFormat};

pub fn run(args: SchemaArgs, format: OutputFormat) -> CliResult<i32> {
    let config = ValidatorConfig {
        strict_mode: args.strict,
        ..ValidatorConfig::default()
    };
    let registry = RequestRegistry::with_config(config)
        .map_err(|err| request_error("registry setup failed", err))?;
    let kind = RequestKind::from(args.kind);

    let Some(source) = args.check_payload() else {
        print_schema(kind, &registry.schema(kind), format);
        return Ok(SUCCESS);
    };

    let payload = source.read()?;
    match registry.check_schema(kind, &payload) {
        Ok(()) => {
            print_schema_check(kind, None, format);
            Ok(SUCCESS)
        }
        Err(RequestError::SchemaMismatch { message, .. }) => {
            tracing::info!(%kind, "payload does not conform to schema");
            print_schema_check(kind, Some(&message), format);
            Ok(DATA_INVALID)
        }
        Err(err) => Err(request_error("schema check failed", err)),
    }
}
