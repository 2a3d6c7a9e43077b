//! Error types for the harness.
//!
//! # Design
//! A non-2xx status is not an error: it comes back inside the `Envelope` and
//! scenarios assert on it. `ApiError` covers what aborts a scenario: the
//! request never completed, the payload could not be encoded, the body did
//! not match the declared shape, or an assertion on the envelope failed.

use thiserror::Error;

use crate::http::HttpMethod;

/// Errors raised by `ApiClient`, the resource wrappers and envelope checks.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout or a broken body stream.
    #[error("transport failure on {method} {url}: {message}")]
    Transport {
        method: HttpMethod,
        url: String,
        message: String,
    },

    /// The response body could not be decoded into the expected type.
    #[error("could not decode {method} {url} (HTTP {status}): {message}; body: {preview}")]
    Decode {
        method: HttpMethod,
        url: String,
        status: u16,
        message: String,
        preview: String,
    },

    /// The request payload could not be serialized to JSON.
    #[error("could not serialize request body for {path}: {message}")]
    Serialization { path: String, message: String },

    /// The base URL and request path do not form a valid URL.
    #[error("invalid request URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// An expectation on an envelope did not hold.
    #[error("{message}: expected {expected}, got {actual}")]
    Assertion {
        expected: String,
        actual: String,
        message: String,
    },
}

/// Errors produced while loading `HarnessConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("config file {path} is malformed: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("environment variable {name}={value:?} is invalid: {reason}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("config file {path} has an invalid {key}: {reason}")]
    InvalidFile {
        path: String,
        key: &'static str,
        reason: String,
    },
}
