//! The list-fetch transport.
//!
//! One endpoint, one shape of request: the widget POSTs the requested page
//! number and the page-size control's current value as a form body against
//! `?action=tasks_html`, and the server answers with a pre-rendered HTML
//! fragment. The fragment is opaque to the widget.
//!
//! [`TaskListClient::fetch`] packages the round trip as a
//! [`bubbletea_rs::Cmd`]: it returns immediately and the outcome arrives
//! later on the event loop as either a [`TasksHtmlMsg`] or a
//! [`TasksFetchFailedMsg`]. There is no retry and no cancellation; if two
//! fetches overlap, both complete and the last message to arrive wins.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tasklist_widget::fetch::{PageRequest, TaskListClient};
//!
//! let client = TaskListClient::new("http://localhost:8080/tasks");
//! let cmd = client.fetch(PageRequest::new(3, "20"));
//! // Hand `cmd` back to the bubbletea-rs runtime; the response arrives
//! // as a TasksHtmlMsg or TasksFetchFailedMsg.
//! ```

use bubbletea_rs::{Cmd, Msg};
use serde::Serialize;
use thiserror::Error;

/// The action name the endpoint dispatches on.
pub const TASKS_HTML_ACTION: &str = "tasks_html";

/// Why a list fetch failed.
///
/// The user-facing treatment makes no distinction between these; the
/// variants exist so the boundary can be tested precisely.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never completed (connection, DNS, body read).
    #[error("task list request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("task list request returned {0}")]
    Status(reqwest::StatusCode),
}

/// One refresh's worth of request parameters.
///
/// Created per refresh and discarded once the request resolves. The
/// per-page value is carried as a string, exactly as read from the
/// page-size control, and serialized unvalidated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    /// The requested page number.
    pub tasks_page_nb: u64,
    /// The page-size control's value at request time.
    pub tasks_per_page: String,
}

impl PageRequest {
    /// Builds the parameters for one refresh.
    pub fn new(tasks_page_nb: u64, tasks_per_page: impl Into<String>) -> Self {
        Self {
            tasks_page_nb,
            tasks_per_page: tasks_per_page.into(),
        }
    }
}

/// Successful fetch: the server-rendered list markup, verbatim.
#[derive(Debug, Clone)]
pub struct TasksHtmlMsg {
    /// The HTML fragment to inject into the view target.
    pub html: String,
}

/// Failed fetch. Terminal for this refresh; reported, never retried.
#[derive(Debug)]
pub struct TasksFetchFailedMsg {
    /// What went wrong at the boundary.
    pub error: FetchError,
}

/// HTTP client for the task-list endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TaskListClient {
    http: reqwest::Client,
    endpoint: String,
}

impl TaskListClient {
    /// Creates a client for the given endpoint URL (without the `action`
    /// query parameter, which the client appends itself).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Swaps in a pre-configured `reqwest` client (builder pattern), for
    /// hosts that need custom TLS or proxy settings.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// The configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Performs one fetch attempt.
    ///
    /// No timeout is applied beyond the transport default, and a failure
    /// is final: the caller reports it and moves on.
    pub async fn send(&self, request: &PageRequest) -> Result<String, FetchError> {
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("action", TASKS_HTML_ACTION)])
            .form(request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.text().await?)
    }

    /// Packages [`send`](Self::send) as a command for the event loop.
    ///
    /// Returns immediately; the continuation runs when the runtime polls
    /// the command and delivers the resulting message.
    pub fn fetch(&self, request: PageRequest) -> Cmd {
        let client = self.clone();
        Box::pin(async move {
            let msg: Msg = match client.send(&request).await {
                Ok(html) => Box::new(TasksHtmlMsg { html }),
                Err(error) => Box::new(TasksFetchFailedMsg { error }),
            };
            Some(msg)
        })
    }
}

/// One-shot HTTP server for exercising fetch commands in tests.
#[cfg(test)]
pub(crate) mod test_server {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn find_blank_line(buf: &[u8]) -> Option<usize> {
        buf.windows(4).position(|w| w == b"\r\n\r\n")
    }

    /// Accepts one connection, reads one request, answers with `status`
    /// and `body`, and returns the raw request head and body.
    pub(crate) async fn serve_once(
        listener: TcpListener,
        status: &str,
        body: &str,
    ) -> (String, String) {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        loop {
            let mut chunk = [0u8; 1024];
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending a full request");
            buf.extend_from_slice(&chunk[..n]);

            let Some(head_end) = find_blank_line(&buf) else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|line| {
                    line.to_ascii_lowercase()
                        .strip_prefix("content-length:")
                        .map(|v| v.trim().parse::<usize>().unwrap())
                })
                .unwrap_or(0);
            if buf.len() < head_end + 4 + content_length {
                continue;
            }

            let request_body =
                String::from_utf8_lossy(&buf[head_end + 4..head_end + 4 + content_length])
                    .to_string();
            let reply = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(reply.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            return (head, request_body);
        }
    }
}
