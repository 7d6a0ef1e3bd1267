/// Controls request validation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// When true, keys outside a request's declared fields are reported as
    /// `unknown-field` diagnostics and exported schemas forbid them.
    pub strict_mode: bool,
    /// Maximum bytes accepted by the `from_slice` entry points.
    pub max_payload_size: usize,
}

impl ValidatorConfig {
    /// Default config with strict mode switched on.
    pub fn strict() -> Self {
        Self {
            strict_mode: true,
            ..Self::default()
        }
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            max_payload_size: 64 * 1024,
        }
    }
}
