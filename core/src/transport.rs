//! Executes `HttpRequest` values against the network.
//!
//! The core never does I/O on its own; a `Transport` is handed in by whoever
//! owns the connection. Tests inject scripted transports, Rust hosts use
//! `UreqTransport`, and C hosts skip this module and perform the round-trip
//! themselves.

use crate::error::FetchError;
use crate::http::{HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
///
/// Non-2xx statuses are returned as data, not errors; status interpretation
/// belongs to `CharacterClient`.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError>;
}

#[cfg(feature = "ureq-transport")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq-transport")]
mod blocking {
    use std::time::Duration;

    use super::Transport;
    use crate::error::FetchError;
    use crate::http::{HttpRequest, HttpResponse};

    /// Blocking transport backed by a shared `ureq::Agent`.
    ///
    /// No timeout is configured unless `with_timeout` is used, so a hung
    /// server keeps the caller waiting.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl UreqTransport {
        pub fn new() -> Self {
            Self::with_timeout(None)
        }

        pub fn with_timeout(timeout: Option<Duration>) -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(timeout)
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
            let url = request.url()?;
            let mut builder = self.agent.get(url.as_str());
            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            let mut response = builder
                .call()
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            Ok(HttpResponse { status, headers, body })
        }
    }
}
