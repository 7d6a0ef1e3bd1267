//! Validation for machine-management API request bodies.
//!
//! This crate re-exports [`machinereq_schema`] and ships the `machinereq`
//! command-line tool (behind the default `cli` feature) for checking request
//! payloads and printing their JSON Schemas.
//!
//! ```
//! use machinereq::{AddMachineRequest, RequestError};
//!
//! let body = serde_json::json!({ "email": "a@b.com", "number": "123" });
//! let request = AddMachineRequest::validate(&body)?;
//! assert_eq!(request.name(), "Machine");
//! # Ok::<(), RequestError>(())
//! ```

pub use machinereq_schema::*;
