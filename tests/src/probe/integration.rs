#![cfg(test)]
use std::time::{Duration, Instant};

use netsweep_core::network::tcp::{self, ProbeOutcome};
use netsweep_integration_tests::{accepting_listener, closed_port, saturated_listener};

const TIMEOUT: Duration = Duration::from_millis(500);

#[tokio::test]
async fn reachable_listener_answers_promptly() {
    let addr = accepting_listener().await.unwrap();

    let started = Instant::now();
    assert!(tcp::is_reachable("127.0.0.1", addr.port(), TIMEOUT).await);
    assert!(started.elapsed() < TIMEOUT);
}

#[tokio::test]
async fn closed_port_collapses_to_false_within_timeout() {
    let port = closed_port().await.unwrap();

    let started = Instant::now();
    assert!(!tcp::is_reachable("127.0.0.1", port, TIMEOUT).await);
    assert!(started.elapsed() <= TIMEOUT + Duration::from_millis(250));
}

#[tokio::test]
async fn repeat_probes_open_fresh_connections() {
    let addr = accepting_listener().await.unwrap();

    let outcomes: Vec<ProbeOutcome> = {
        let mut outcomes = Vec::new();
        for _ in 0..500 {
            outcomes.push(tcp::probe("127.0.0.1", addr.port(), TIMEOUT).await);
        }
        outcomes
    };
    assert!(outcomes.iter().all(ProbeOutcome::is_open));
}

/// Once the accept queue is full Linux drops new SYNs, so the peer never answers and
/// the attempt can only end on the deadline.
#[tokio::test]
#[cfg(target_os = "linux")]
async fn silent_peer_times_out_near_the_deadline() {
    let (addr, _listener, _held) = saturated_listener().await.unwrap();

    let started = Instant::now();
    let outcome = tcp::probe("127.0.0.1", addr.port(), TIMEOUT).await;
    let elapsed = started.elapsed();

    assert_eq!(outcome, ProbeOutcome::TimedOut);
    assert!(elapsed >= TIMEOUT);
    assert!(elapsed <= TIMEOUT + Duration::from_millis(250));
}
