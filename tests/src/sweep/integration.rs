#![cfg(test)]
use std::str::FromStr;
use std::time::Duration;

use netsweep_common::config::ProbeConfig;
use netsweep_common::network::target::Target;
use netsweep_core::http::HttpExecutor;
use netsweep_core::scanner::{self, ScanHit};
use netsweep_core::service;
use netsweep_integration_tests::{accepting_listener, closed_port, http_listener};

fn probe_cfg(ports: Vec<u16>, concurrency: usize) -> ProbeConfig {
    ProbeConfig {
        timeout: Duration::from_millis(500),
        ports,
        concurrency,
        max_hosts: None,
    }
}

/// Sweeps 127.0.0.0/29. Linux routes the whole 127/8 block to loopback, so every
/// candidate gets a prompt refusal except the one the listener is bound to.
#[tokio::test]
#[cfg(target_os = "linux")]
async fn sweep_loopback_block() {
    let open = accepting_listener().await.unwrap();
    let closed = closed_port().await.unwrap();

    let target = Target::from_str("127.0.0.1/255.255.255.248").unwrap();
    let report = scanner::sweep_target(&target, &probe_cfg(vec![closed, open.port()], 4), None)
        .await
        .unwrap();

    assert_eq!(report.probed, 12);
    assert_eq!(report.hits, vec![ScanHit::new("127.0.0.1", open.port())]);
}

#[tokio::test]
async fn sweep_single_host_target() {
    let open = accepting_listener().await.unwrap();

    let target = Target::from_str("127.0.0.1").unwrap();
    let report = scanner::sweep_target(&target, &probe_cfg(vec![open.port()], 1), None)
        .await
        .unwrap();

    assert_eq!(report.hits, vec![ScanHit::new("127.0.0.1", open.port())]);
}

#[tokio::test]
async fn sweep_hits_are_handed_to_the_executor() {
    let http = http_listener("HTTP/1.1 200 OK\r\nContent-Length: 9\r\nConnection: close\r\n\r\ncallback1")
        .await
        .unwrap();
    let silent = accepting_listener().await.unwrap();

    let candidates = vec!["127.0.0.1".to_string()];
    let report = scanner::sweep(candidates, &probe_cfg(vec![http.port(), silent.port()], 2), None)
        .await
        .unwrap();
    assert_eq!(report.hits.len(), 2);

    let executor = HttpExecutor::new(Duration::from_secs(2)).unwrap();
    let services = service::check_services(&executor, &report.hits).await;

    assert_eq!(services[0].body.as_deref(), Some("callback1"));
    assert!(!services[1].responded());
}
