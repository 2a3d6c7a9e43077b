//! The uniform result of one executed request.

use std::time::Duration;

use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpMethod;

/// Characters of body kept in log lines and error messages.
pub const PREVIEW_CHARS: usize = 200;

/// First [`PREVIEW_CHARS`] characters of `body`, on a char boundary.
pub fn body_preview(body: &str) -> String {
    match body.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Status, decoded data and raw body of one HTTP exchange.
///
/// `data` is `Some` only when the response was 2xx, carried a JSON body and
/// decoded into `T`. When decoding was attempted and failed, the reason is
/// kept and surfaces through [`Envelope::data_or_err`].
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    pub method: HttpMethod,
    pub url: String,
    pub status: u16,
    pub data: Option<T>,
    pub raw_body: String,
    pub elapsed: Duration,
    pub(crate) decode_error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Why the body did not decode, if decoding was attempted and failed.
    pub fn decode_error(&self) -> Option<&str> {
        self.decode_error.as_deref()
    }

    pub fn preview(&self) -> String {
        body_preview(&self.raw_body)
    }

    /// Fails unless the response status is `expected`.
    pub fn assert_status(&self, expected: u16) -> Result<&Self, ApiError> {
        if self.status == expected {
            return Ok(self);
        }
        Err(ApiError::Assertion {
            expected: expected.to_string(),
            actual: self.status.to_string(),
            message: format!(
                "unexpected status for {} {}; response: {}",
                self.method,
                self.url,
                self.preview()
            ),
        })
    }

    pub fn data_or_err(&self) -> Result<&T, ApiError> {
        match (&self.data, &self.decode_error) {
            (Some(data), _) => Ok(data),
            (None, Some(reason)) => Err(self.decode_failure(reason)),
            (None, None) => Err(self.missing_data()),
        }
    }

    pub fn into_data(mut self) -> Result<T, ApiError> {
        if let Some(reason) = &self.decode_error {
            return Err(self.decode_failure(reason));
        }
        match self.data.take() {
            Some(data) => Ok(data),
            None => Err(self.missing_data()),
        }
    }

    /// The raw body parsed as untyped JSON.
    pub fn json_value(&self) -> Result<Value, ApiError> {
        serde_json::from_str(&self.raw_body)
            .map_err(|e| self.decode_failure(&e.to_string()))
    }

    /// True when the body is a JSON object with a top-level `name` key.
    pub fn has_property(&self, name: &str) -> bool {
        self.json_value()
            .ok()
            .and_then(|value| value.get(name).cloned())
            .is_some()
    }

    /// Value at a JSON pointer (`/address/geo/lat`) in the raw body.
    pub fn value_at(&self, pointer: &str) -> Option<Value> {
        self.json_value().ok()?.pointer(pointer).cloned()
    }

    fn decode_failure(&self, reason: &str) -> ApiError {
        ApiError::Decode {
            method: self.method,
            url: self.url.clone(),
            status: self.status,
            message: reason.to_string(),
            preview: self.preview(),
        }
    }

    fn missing_data(&self) -> ApiError {
        ApiError::Assertion {
            expected: "a decoded body".to_string(),
            actual: format!("no data (HTTP {})", self.status),
            message: format!("{} {} returned nothing to decode", self.method, self.url),
        }
    }
}
