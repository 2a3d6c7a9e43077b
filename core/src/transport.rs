//! The network side of the client.
//!
//! `Transport` takes a resolved URL plus a request descriptor and returns the
//! response as data. Status codes never become errors here; only failures to
//! complete the exchange do. `UreqTransport` is the blocking implementation
//! used by the harness; tests substitute in-memory transports.

use std::fmt;
use std::time::Duration;

use ureq::Agent;

use crate::config::HarnessConfig;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport {
    /// Perform one HTTP exchange. `Err` carries a human-readable reason.
    fn send(&self, request: &HttpRequest, url: &str) -> Result<HttpResponse, String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest, url: &str) -> Result<HttpResponse, String> {
        (**self).send(request, url)
    }
}

/// Blocking transport over a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(config.timeout())
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::from_config(&HarnessConfig::default())
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest, url: &str) -> Result<HttpResponse, String> {
        let headers = &request.headers;
        let body = request.body.as_deref();

        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(url), headers).call(),
            HttpMethod::Post => send_with_body(with_headers(self.agent.post(url), headers), body),
            HttpMethod::Put => send_with_body(with_headers(self.agent.put(url), headers), body),
            HttpMethod::Patch => send_with_body(with_headers(self.agent.patch(url), headers), body),
        };
        let mut response = result.map_err(|e| e.to_string())?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| format!("failed to read response body: {e}"))?;

        Ok(HttpResponse { status, headers, body })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_with_body(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}
