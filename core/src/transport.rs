//! The I/O seam between request building and response decoding.
//!
//! `RequestSpec::send` hands a fully built `HttpRequest` to a `Transport`
//! and decodes whatever `HttpResponse` comes back. Tests substitute a fake
//! transport; `UreqTransport` performs real blocking I/O.

use crate::error::BoxError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes exactly one HTTP round-trip.
///
/// Non-2xx statuses must be returned as `Ok` responses; status handling
/// belongs to the caller. `Err` is reserved for failures where no response
/// was received at all.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError>;
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use ureq::Agent;

    use super::Transport;
    use crate::error::BoxError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Blocking transport backed by a `ureq::Agent`.
    ///
    /// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
    /// responses are returned as data rather than `Err`. Response bodies are
    /// read in full unless a limit is set with `with_body_limit`.
    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: Agent,
        body_limit: u64,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            let agent = Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self::with_agent(agent)
        }

        /// Use a preconfigured agent, e.g. one with timeouts or a proxy.
        /// The agent should have `http_status_as_error(false)`.
        ///
        /// ```no_run
        /// use std::time::Duration;
        /// use rest_request::UreqTransport;
        ///
        /// let agent = ureq::Agent::config_builder()
        ///     .http_status_as_error(false)
        ///     .timeout_global(Some(Duration::from_secs(30)))
        ///     .build()
        ///     .new_agent();
        /// let transport = UreqTransport::with_agent(agent);
        /// ```
        pub fn with_agent(agent: Agent) -> Self {
            Self {
                agent,
                body_limit: u64::MAX,
            }
        }

        /// Fail with a transport error when a response body exceeds
        /// `limit` bytes. Unlimited by default.
        pub fn with_body_limit(mut self, limit: u64) -> Self {
            self.body_limit = limit;
            self
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    macro_rules! with_headers {
        ($builder:expr, $headers:expr) => {{
            let mut builder = $builder;
            for (name, value) in $headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder
        }};
    }

    impl Transport for UreqTransport {
        fn execute(&self, req: HttpRequest) -> Result<HttpResponse, BoxError> {
            if let Some(label) = req.version.and_then(|v| v.label()) {
                tracing::trace!(version = label, "transport speaks HTTP/1.1 only, version pin ignored");
            }

            let url = req.url.as_str();
            let headers = &req.headers;
            let mut response = match (req.method, req.body) {
                (HttpMethod::Get, _) => with_headers!(self.agent.get(url), headers).call(),
                (HttpMethod::Head, _) => with_headers!(self.agent.head(url), headers).call(),
                (HttpMethod::Delete, _) => with_headers!(self.agent.delete(url), headers).call(),
                (HttpMethod::Options, _) => with_headers!(self.agent.options(url), headers).call(),
                (HttpMethod::Trace, _) => with_headers!(self.agent.trace(url), headers).call(),
                (HttpMethod::Connect, _) => with_headers!(self.agent.connect(url), headers).call(),
                (HttpMethod::Post, Some(body)) => {
                    with_headers!(self.agent.post(url), headers).send(body.as_bytes())
                }
                (HttpMethod::Post, None) => with_headers!(self.agent.post(url), headers).send_empty(),
                (HttpMethod::Put, Some(body)) => {
                    with_headers!(self.agent.put(url), headers).send(body.as_bytes())
                }
                (HttpMethod::Put, None) => with_headers!(self.agent.put(url), headers).send_empty(),
                (HttpMethod::Patch, Some(body)) => {
                    with_headers!(self.agent.patch(url), headers).send(body.as_bytes())
                }
                (HttpMethod::Patch, None) => {
                    with_headers!(self.agent.patch(url), headers).send_empty()
                }
            }?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .with_config()
                .limit(self.body_limit)
                .read_to_string()?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
