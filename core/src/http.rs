//! HTTP request executor.
//!
//! Sweep hits are handed to a [`RequestExecutor`] for follow-up requests. The
//! executor takes the full target URL on every call and keeps no per-target state.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::instrument;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Every request claims to come from loopback; the services behind sweep hits
/// expect it.
const REMOTE_ADDR_HEADER: &str = "remote-addr";
const REMOTE_ADDR_VALUE: &str = "127.0.0.1";

/// Default upper bound for a whole request, body included.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// Why a request produced no body. `Display` is the diagnostic shown to users.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("parse URL {url} failed: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("cannot connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read response from {url}: {source}")]
    Read {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Sends one request and returns the response body with line breaks removed.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, url: &str, form_body: &str, method: Method) -> Result<String, HttpError>;
}

/// [`RequestExecutor`] backed by a shared [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    #[instrument(skip(self, form_body), level = "debug")]
    async fn execute(&self, url: &str, form_body: &str, method: Method) -> Result<String, HttpError> {
        let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let mut request = self
            .client
            .request(method.into(), parsed)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(REMOTE_ADDR_HEADER, REMOTE_ADDR_VALUE);
        if !form_body.is_empty() {
            request = request.body(form_body.to_string());
        }

        let response = request.send().await.map_err(|source| HttpError::Connect {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(HttpError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| HttpError::Read {
            url: url.to_string(),
            source,
        })?;

        Ok(strip_line_breaks(&body))
    }
}

fn strip_line_breaks(body: &str) -> String {
    body.replace(['\r', '\n'], "")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves `response` verbatim to every connection and returns the base URL.
    async fn canned_server(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        format!("http://{addr}/")
    }

    /// Answers one request with an empty 200 and hands back the raw request it read.
    async fn recording_server() -> (String, tokio::sync::oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel();
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let read = stream.read(&mut buf).await.unwrap_or(0);
                let _ = tx.send(String::from_utf8_lossy(&buf[..read]).into_owned());
                let _ = stream
                    .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                    .await;
                let _ = stream.shutdown().await;
            }
        });
        (format!("http://{addr}/"), rx)
    }

    fn executor() -> HttpExecutor {
        HttpExecutor::new(Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn execute_strips_line_breaks_from_body() {
        let url = canned_server(
            "HTTP/1.1 200 OK\r\nContent-Length: 12\r\nConnection: close\r\n\r\nhello\nworld\n",
        )
        .await;
        let body = executor().execute(&url, "", Method::Get).await.unwrap();
        assert_eq!(body, "helloworld");
    }

    #[tokio::test]
    async fn execute_sends_form_body_on_post() {
        let url = canned_server("HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok").await;
        let body = executor()
            .execute(&url, "a=1&b=2", Method::Post)
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn execute_sends_loopback_remote_addr_header() {
        let (url, request) = recording_server().await;
        executor().execute(&url, "", Method::Get).await.unwrap();

        let request = request.await.unwrap().to_ascii_lowercase();
        assert!(request.contains("remote-addr: 127.0.0.1\r\n"));
        assert!(request.contains("content-type: application/x-www-form-urlencoded\r\n"));
    }

    #[tokio::test]
    async fn execute_reports_error_status() {
        let url = canned_server("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
        let err = executor().execute(&url, "", Method::Get).await.unwrap_err();
        assert!(matches!(err, HttpError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn execute_reports_connection_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = executor()
            .execute(&format!("http://{addr}/"), "", Method::Get)
            .await
            .unwrap_err();
        assert!(matches!(err, HttpError::Connect { .. }));
        assert!(err.to_string().starts_with("cannot connect to"));
    }

    #[tokio::test]
    async fn execute_rejects_invalid_url() {
        let err = executor().execute("not a url", "", Method::Get).await.unwrap_err();
        assert!(matches!(err, HttpError::InvalidUrl { .. }));
    }

    #[test]
    fn strip_line_breaks_handles_crlf() {
        assert_eq!(strip_line_breaks("a\r\nb\nc"), "abc");
        assert_eq!(Method::Post.to_string(), "POST");
    }
}
