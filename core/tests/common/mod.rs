//! Shared setup for the scenario suites: a fixture server per test on a
//! random port, a tracing subscriber wired to the test writer, and the
//! assertion patterns the suites share.
#![allow(dead_code)]

use placeholder_core::{ApiClient, Resource, ResourceService};
use regex::Regex;
use tracing_subscriber::EnvFilter;

pub const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
pub const URL_PATTERN: &str = r"^https?://";
pub const MISSING_ID: u64 = 99999;

/// Starts the fixture server on a random port and returns its base URL.
pub fn start_server() -> String {
    init_tracing();

    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            fixture_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn service<R: Resource>(base_url: &str) -> ResourceService<R> {
    ResourceService::new(ApiClient::new(base_url))
}

pub fn email_regex() -> Regex {
    Regex::new(EMAIL_PATTERN).unwrap()
}
