use machinereq_schema::{RequestError, RequestKind, RequestRegistry, ValidatorConfig};

use crate::cmd::ValidateArgs;
use crate::exit::{request_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_outcome, Outcome, OutputFormat};

pub fn run(args: ValidateArgs, format: OutputFormat) -> CliResult<i32> {
    let config = ValidatorConfig {
        strict_mode: args.strict,
        ..ValidatorConfig::default()
    };
    let registry = RequestRegistry::with_config(config)
        .map_err(|err| request_error("registry setup failed", err))?;
    let kind = RequestKind::from(args.kind);
    let payload = args.payload.read()?;

    tracing::debug!(%kind, bytes = payload.len(), strict = args.strict, "validating payload");

    match registry.validate(kind, &payload) {
        Ok(record) => {
            print_outcome(&Outcome::valid(&record), format);
            Ok(SUCCESS)
        }
        Err(RequestError::Invalid(errors)) => {
            tracing::info!(%kind, problems = errors.len(), "payload rejected");
            print_outcome(&Outcome::invalid(kind, &errors), format);
            Ok(DATA_INVALID)
        }
        Err(err) => Err(request_error("validation failed", err)),
    }
}
