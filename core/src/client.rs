//! Generic client bound to one base URL.
//!
//! # Design
//! `ApiClient` builds `HttpRequest` descriptors, hands them to a `Transport`
//! and turns the resulting `HttpResponse` into an `Envelope`. Decoding is a
//! pure function of the response (`decode_response`) so it can be tested
//! without I/O. Non-2xx responses are returned, not raised; scenarios assert
//! on `Envelope::status`.

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::HarnessConfig;
use crate::envelope::{body_preview, Envelope};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

const JSON: &str = "application/json";

/// Blocking JSON client for one base URL. Every request carries JSON
/// `Accept`/`Content-Type` headers and, when configured, a bearer credential.
#[derive(Debug, Clone)]
pub struct ApiClient<Tr = UreqTransport> {
    base_url: String,
    api_key: Option<String>,
    transport: Tr,
}

impl ApiClient<UreqTransport> {
    /// Client for `base_url` with the default timeout and no credential.
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::default())
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        let client = Self::with_transport(&config.base_url, UreqTransport::from_config(config));
        match &config.api_key {
            Some(key) => client.with_api_key(key.clone()),
            None => client,
        }
    }
}

impl<Tr: Transport> ApiClient<Tr> {
    pub fn with_transport(base_url: &str, transport: Tr) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            transport,
        }
    }

    /// Sends `Authorization: Bearer <key>` on every request.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn create_request(&self, path: &str, method: HttpMethod) -> HttpRequest {
        let mut request = HttpRequest::new(method, path)
            .with_header("Accept", JSON)
            .with_header("Content-Type", JSON);
        if let Some(key) = &self.api_key {
            request = request.with_header("Authorization", format!("Bearer {key}"));
        }
        debug!(%method, path, "built request");
        request
    }

    pub fn create_request_with_body<B>(
        &self,
        path: &str,
        method: HttpMethod,
        payload: &B,
    ) -> Result<HttpRequest, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialization {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let mut request = self.create_request(path, method);
        request.body = Some(body);
        Ok(request)
    }

    /// Absolute URL for `request`, query string included.
    pub fn resolve_url(&self, request: &HttpRequest) -> Result<String, ApiError> {
        let raw = format!("{}/{}", self.base_url, request.path.trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl {
            url: raw.clone(),
            message: e.to_string(),
        })?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url.into())
    }

    /// Sends `request` and decodes a 2xx JSON body into `T`.
    pub fn execute<T: DeserializeOwned>(
        &self,
        request: &HttpRequest,
    ) -> Result<Envelope<T>, ApiError> {
        let url = self.resolve_url(request)?;
        let started = Instant::now();
        let response = self
            .transport
            .send(request, &url)
            .map_err(|message| ApiError::Transport {
                method: request.method,
                url: url.clone(),
                message,
            })?;
        let elapsed = started.elapsed();

        info!(
            method = %request.method,
            url = %url,
            status = response.status,
            elapsed_ms = elapsed.as_millis() as u64,
            body = %body_preview(&response.body),
            "executed request"
        );

        Ok(decode_response(request.method, url, response, elapsed))
    }
}

/// Builds the envelope for one response. The body is decoded only for 2xx
/// responses with a JSON content type; a failed decode leaves `data` empty
/// and records the reason.
pub fn decode_response<T: DeserializeOwned>(
    method: HttpMethod,
    url: String,
    response: HttpResponse,
    elapsed: Duration,
) -> Envelope<T> {
    let mut data = None;
    let mut decode_error = None;

    if response.is_success() && response.is_json() {
        match serde_json::from_str::<T>(&response.body) {
            Ok(value) => data = Some(value),
            Err(e) => {
                warn!(
                    %method,
                    url = %url,
                    status = response.status,
                    error = %e,
                    "response body did not decode"
                );
                decode_error = Some(e.to_string());
            }
        }
    }

    Envelope {
        method,
        url,
        status: response.status,
        data,
        raw_body: response.body,
        elapsed,
        decode_error,
    }
}
