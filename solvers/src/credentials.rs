//! Provider credential discovery
//!
//! Tokens are read from the environment once per solve and passed into the
//! factory; adapters never consult globals themselves.

/// Environment variable holding the D-Wave token
pub const DWAVE_TOKEN_VAR: &str = "D-WAVE_API_TOKEN";

/// Environment variable holding the IBM Quantum token
pub const IBMQ_TOKEN_VAR: &str = "IBMQ_API_TOKEN";

/// API tokens discovered for the quantum providers
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub dwave_token: Option<String>,
    pub ibmq_token: Option<String>,
}

impl Credentials {
    /// Read tokens from the canonical environment variables
    pub fn from_env() -> Self {
        Self {
            dwave_token: std::env::var(DWAVE_TOKEN_VAR).ok(),
            ibmq_token: std::env::var(IBMQ_TOKEN_VAR).ok(),
        }
    }

    /// Construct explicitly, for embedding applications and tests
    pub fn new(dwave_token: Option<String>, ibmq_token: Option<String>) -> Self {
        Self { dwave_token, ibmq_token }
    }
}
