//! Request validation for the machine-management API.
//!
//! Turn untyped request bodies into validated, fully defaulted records, or
//! into a complete list of field diagnostics a caller can return in one
//! response.
//!
//! Two independent request types are provided: [`AddMachineRequest`] for
//! registering a machine and [`UpdateMachineRequest`] for changing its
//! display metadata. [`RequestRegistry`] dispatches raw payloads by
//! [`RequestKind`] and exports each request's JSON Schema.

pub mod add_machine;
pub mod config;
pub mod error;
pub mod field;
mod payload;
pub mod registry;
pub mod schema;
#[cfg(test)]
mod strategies;
pub mod update_machine;
mod validator;

pub use add_machine::AddMachineRequest;
pub use config::ValidatorConfig;
pub use error::{FieldError, FieldErrorKind, RequestError, Result, ValidationErrors};
pub use field::{DefaultValue, FieldSpec, FieldType, Presence, DEFAULT_MACHINE_NAME};
pub use registry::{MachineRequest, RequestKind, RequestRegistry};
pub use schema::json_schema;
pub use update_machine::UpdateMachineRequest;
