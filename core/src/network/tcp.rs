//! TCP reachability probe.
//!
//! One probe is one connection attempt bounded by a timeout. The socket is owned by
//! the probe and shut down before it returns, whatever the outcome.

use std::fmt;
use std::future::Future;
use std::io;
use std::time::Duration;

use netsweep_common::{debug, warn};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// How a single connection attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The handshake completed.
    Open,
    /// The host answered with a reset.
    Refused,
    /// Nothing came back before the deadline.
    TimedOut,
    /// No route to the host or its network.
    Unreachable,
    /// Any other I/O failure, name resolution included.
    Failed(io::ErrorKind),
}

impl ProbeOutcome {
    pub fn is_open(&self) -> bool {
        matches!(self, ProbeOutcome::Open)
    }
}

impl From<&io::Error> for ProbeOutcome {
    fn from(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => ProbeOutcome::Refused,
            io::ErrorKind::TimedOut => ProbeOutcome::TimedOut,
            io::ErrorKind::HostUnreachable | io::ErrorKind::NetworkUnreachable => {
                ProbeOutcome::Unreachable
            }
            kind => ProbeOutcome::Failed(kind),
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Open => f.write_str("open"),
            ProbeOutcome::Refused => f.write_str("refused"),
            ProbeOutcome::TimedOut => f.write_str("timed out"),
            ProbeOutcome::Unreachable => f.write_str("unreachable"),
            ProbeOutcome::Failed(kind) => write!(f, "failed ({kind})"),
        }
    }
}

/// Attempts one connection to `host:port` and reports how it ended.
///
/// `host` may be an IP literal or a name; resolution counts against `probe_timeout`.
pub async fn probe(host: &str, port: u16, probe_timeout: Duration) -> ProbeOutcome {
    let outcome = connect_within(TcpStream::connect((host, port)), probe_timeout, host, port).await;

    debug!(host, port, %outcome, "probe finished");
    outcome
}

/// Drives `connect` until it settles or `probe_timeout` runs out.
async fn connect_within<F>(connect: F, probe_timeout: Duration, host: &str, port: u16) -> ProbeOutcome
where
    F: Future<Output = io::Result<TcpStream>>,
{
    match timeout(probe_timeout, connect).await {
        Ok(Ok(stream)) => {
            release(stream, host, port).await;
            ProbeOutcome::Open
        }
        Ok(Err(err)) => ProbeOutcome::from(&err),
        Err(_elapsed) => ProbeOutcome::TimedOut,
    }
}

/// `true` when a connection to `host:port` completes within `probe_timeout`.
///
/// Every failure, refused, timed out or unresolvable, is reported as `false`.
pub async fn is_reachable(host: &str, port: u16, probe_timeout: Duration) -> bool {
    probe(host, port, probe_timeout).await.is_open()
}

/// Closes our side of the connection. A failed shutdown is only logged.
async fn release(mut stream: TcpStream, host: &str, port: u16) {
    if let Err(err) = stream.shutdown().await {
        warn!("Failed to close connection to {host}:{port}: {err}");
    }
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
    use std::time::Instant;
    use tokio::net::TcpListener;

    const TIMEOUT: Duration = Duration::from_millis(500);

    async fn accepting_listener() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                drop(stream);
            }
        });
        port
    }

    async fn closed_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    }

    #[tokio::test]
    async fn probe_should_report_open_listener() {
        let port = accepting_listener().await;
        assert_eq!(probe("127.0.0.1", port, TIMEOUT).await, ProbeOutcome::Open);
        assert!(is_reachable("127.0.0.1", port, TIMEOUT).await);
    }

    #[tokio::test]
    async fn probe_should_resolve_hostnames() {
        let port = accepting_listener().await;
        assert!(is_reachable("localhost", port, TIMEOUT).await);
    }

    #[tokio::test]
    async fn probe_should_report_refused_port() {
        let port = closed_port().await;
        let started = Instant::now();
        assert_eq!(probe("127.0.0.1", port, TIMEOUT).await, ProbeOutcome::Refused);
        assert!(!is_reachable("127.0.0.1", port, TIMEOUT).await);
        assert!(started.elapsed() < TIMEOUT * 4);
    }

    #[tokio::test]
    async fn probe_should_collapse_resolution_failure() {
        let outcome = probe("no-such-host.invalid", 80, TIMEOUT).await;
        assert!(!outcome.is_open());
    }

    #[tokio::test]
    async fn repeated_probes_do_not_exhaust_sockets() {
        let port = accepting_listener().await;
        for _ in 0..256 {
            assert!(is_reachable("127.0.0.1", port, TIMEOUT).await);
        }
    }

    #[tokio::test]
    async fn connect_within_should_time_out_silent_peer() {
        let deadline = Duration::from_millis(200);
        let started = Instant::now();
        let outcome = connect_within(
            std::future::pending::<io::Result<TcpStream>>(),
            deadline,
            "192.0.2.1",
            40310,
        )
        .await;
        let elapsed = started.elapsed();

        assert_eq!(outcome, ProbeOutcome::TimedOut);
        assert!(!outcome.is_open());
        assert!(elapsed >= deadline);
        assert!(elapsed < deadline + Duration::from_millis(250));
    }

    #[tokio::test]
    async fn connect_within_should_map_connect_errors() {
        let refused = async { Err::<TcpStream, _>(io::Error::from(io::ErrorKind::ConnectionRefused)) };
        assert_eq!(
            connect_within(refused, TIMEOUT, "127.0.0.1", 1).await,
            ProbeOutcome::Refused
        );
    }

    #[tokio::test]
    #[ignore]
    async fn probe_should_timeout_on_unreachable_ip() {
        let started = Instant::now();
        let outcome = probe("203.0.113.1", 40310, TIMEOUT).await;
        assert!(!outcome.is_open());
        assert!(started.elapsed() < TIMEOUT + Duration::from_millis(250));
    }

    #[test]
    fn outcome_from_io_error_kinds() {
        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        assert_eq!(ProbeOutcome::from(&refused), ProbeOutcome::Refused);

        let unreachable = io::Error::from(io::ErrorKind::HostUnreachable);
        assert_eq!(ProbeOutcome::from(&unreachable), ProbeOutcome::Unreachable);

        let other = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(
            ProbeOutcome::from(&other),
            ProbeOutcome::Failed(io::ErrorKind::PermissionDenied)
        );
        assert_eq!(ProbeOutcome::TimedOut.to_string(), "timed out");
    }
}
