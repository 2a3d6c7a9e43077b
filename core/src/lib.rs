//! Typed test harness for a JSONPlaceholder-style REST service.
//!
//! # Overview
//! Scenarios call a `ResourceService` (one generic wrapper for users, posts,
//! comments, albums, photos and todos). The wrapper builds an `HttpRequest`,
//! the `ApiClient` sends it through a `Transport`, and the response comes
//! back as an `Envelope` holding the status, decoded data and raw body.
//!
//! # Design
//! - Requests and responses are plain data; only the `Transport` does I/O.
//! - Non-2xx responses are results, not errors. `ApiError` is reserved for
//!   transport failures, encode/decode failures and failed assertions.
//! - The client is blocking. Scenarios own their client, so they can run in
//!   parallel with no shared state.
//! - DTOs are defined independently from the fixture-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod generator;
pub mod http;
pub mod resource;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use client::ApiClient;
pub use config::HarnessConfig;
pub use envelope::Envelope;
pub use error::{ApiError, ConfigError};
pub use generator::TestDataGenerator;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resource::{
    AlbumService, BelongsTo, CommentService, HasMany, PhotoService, PostService, Resource,
    ResourceService, TodoService, UserService,
};
pub use transport::{Transport, UreqTransport};
pub use types::{Address, Album, Comment, Company, Empty, Geo, Photo, Post, PostPatch, Todo, User};
