use serde_json::Value;

use crate::config::ValidatorConfig;
use crate::error::{RequestError, Result};

/// Parse a raw request body, enforcing the configured size limit first.
pub(crate) fn parse_payload(payload: &[u8], config: &ValidatorConfig) -> Result<Value> {
    if payload.len() > config.max_payload_size {
        return Err(RequestError::PayloadTooLarge {
            size: payload.len(),
            limit: config.max_payload_size,
        });
    }

    Ok(serde_json::from_slice(payload)?)
}
