use std::cell::RefCell;

use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// In-memory transport that records every request and replies with a fixed
/// response (or a fixed failure).
#[derive(Debug)]
pub(crate) struct StubTransport {
    reply: Result<HttpResponse, String>,
    sent: RefCell<Vec<(HttpRequest, String)>>,
}

impl Default for StubTransport {
    fn default() -> Self {
        Self::replying(HttpResponse {
            status: 200,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: "{}".to_string(),
        })
    }
}

impl StubTransport {
    pub(crate) fn replying(response: HttpResponse) -> Self {
        Self {
            reply: Ok(response),
            sent: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            sent: RefCell::new(Vec::new()),
        }
    }

    /// Requests seen so far, with the resolved URL each was sent to.
    pub(crate) fn sent(&self) -> Vec<(HttpRequest, String)> {
        self.sent.borrow().clone()
    }
}

impl Transport for StubTransport {
    fn send(&self, request: &HttpRequest, url: &str) -> Result<HttpResponse, String> {
        self.sent.borrow_mut().push((request.clone(), url.to_string()));
        self.reply.clone()
    }
}
