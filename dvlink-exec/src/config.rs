use std::time::Duration;

/// Runtime limits shared by the token call and the entity call.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Per-request timeout, covering connect through body read.
    pub request_timeout: Duration,
    /// Upper bound on an accepted response body; larger bodies fail the call.
    pub max_response_bytes: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_response_bytes: 4 * 1024 * 1024,
        }
    }
}
