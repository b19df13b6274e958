//! Sweeps candidate hosts through the reachability probe.
//!
//! Every (host, port) pair gets its own probe and its own socket. At most
//! `ProbeConfig::concurrency` probes are in flight; with the default of 1 the sweep
//! is strictly sequential. Candidates are pulled one at a time as permits free up,
//! so a large block is never expanded up front. Results come back through the task
//! handles, so probes never share mutable state.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use netsweep_common::config::ProbeConfig;
use netsweep_common::network::target::Target;
use netsweep_common::{debug, info, success, warn};
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

use crate::network::tcp::{self, ProbeOutcome};

/// Called with the running number of hits each time a probe succeeds.
pub type HitCallback = Box<dyn Fn(usize) + Send + Sync>;

/// A (host, port) pair that accepted a connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanHit {
    pub host: String,
    pub port: u16,
}

impl ScanHit {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Root URL of the service behind this hit.
    pub fn url(&self) -> String {
        if self.host.contains(':') {
            format!("http://[{}]:{}/", self.host, self.port)
        } else {
            format!("http://{}:{}/", self.host, self.port)
        }
    }
}

/// Summary of a finished sweep.
#[derive(Debug, Clone)]
pub struct SweepReport {
    pub hits: Vec<ScanHit>,
    pub probed: usize,
    pub elapsed: Duration,
}

/// Expands `target` and sweeps its candidates with the TCP probe.
pub async fn sweep_target(
    target: &Target,
    cfg: &ProbeConfig,
    on_hit: Option<HitCallback>,
) -> anyhow::Result<SweepReport> {
    let candidates = target.candidates(cfg.max_hosts);
    info!(
        "Sweeping {} hosts on {} port(s)",
        candidates.len(),
        cfg.ports.len()
    );
    sweep(candidates, cfg, on_hit).await
}

/// Probes every candidate on every configured port.
pub async fn sweep<I>(
    candidates: I,
    cfg: &ProbeConfig,
    on_hit: Option<HitCallback>,
) -> anyhow::Result<SweepReport>
where
    I: IntoIterator<Item = String>,
{
    sweep_with(candidates, cfg, on_hit, |host: String, port, probe_timeout| async move {
        tcp::probe(&host, port, probe_timeout).await
    })
    .await
}

/// Same as [`sweep`] with a caller-supplied probe.
///
/// Hits are returned in candidate order, then in the order of `cfg.ports`.
pub async fn sweep_with<I, F, Fut>(
    candidates: I,
    cfg: &ProbeConfig,
    on_hit: Option<HitCallback>,
    prober: F,
) -> anyhow::Result<SweepReport>
where
    I: IntoIterator<Item = String>,
    F: Fn(String, u16, Duration) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ProbeOutcome> + Send + 'static,
{
    cfg.validate()?;

    let start_time: Instant = Instant::now();
    let prober = Arc::new(prober);
    let semaphore = Arc::new(Semaphore::new(cfg.concurrency));
    let mut tasks: JoinSet<Probed> = JoinSet::new();
    let mut collector = Collector::new(on_hit);

    for (host_idx, host) in candidates.into_iter().enumerate() {
        for (port_idx, &port) in cfg.ports.iter().enumerate() {
            let permit = semaphore.clone().acquire_owned().await?;
            let prober = prober.clone();
            let host = host.clone();
            let probe_timeout = cfg.timeout;

            tasks.spawn(async move {
                let _permit = permit;
                let outcome = prober(host.clone(), port, probe_timeout).await;
                Probed {
                    order: (host_idx, port_idx),
                    hit: ScanHit { host, port },
                    outcome,
                }
            });

            while let Some(joined) = tasks.try_join_next() {
                collector.take(joined);
            }
        }
    }

    while let Some(joined) = tasks.join_next().await {
        collector.take(joined);
    }

    let report = collector.finish(start_time.elapsed());
    info!(
        "Sweep finished: {} of {} probes answered in {:.2}s",
        report.hits.len(),
        report.probed,
        report.elapsed.as_secs_f64()
    );
    Ok(report)
}

struct Probed {
    order: (usize, usize),
    hit: ScanHit,
    outcome: ProbeOutcome,
}

struct Collector {
    hits: Vec<((usize, usize), ScanHit)>,
    probed: usize,
    on_hit: Option<HitCallback>,
}

impl Collector {
    fn new(on_hit: Option<HitCallback>) -> Self {
        Self {
            hits: Vec::new(),
            probed: 0,
            on_hit,
        }
    }

    fn take(&mut self, joined: Result<Probed, JoinError>) {
        let probed = match joined {
            Ok(probed) => probed,
            Err(e) => {
                warn!("Probe task failed: {e}");
                return;
            }
        };
        self.probed += 1;

        if !probed.outcome.is_open() {
            debug!("{}:{} {}", probed.hit.host, probed.hit.port, probed.outcome);
            return;
        }

        success!("{}:{} is open", probed.hit.host, probed.hit.port);
        self.hits.push((probed.order, probed.hit));
        if let Some(cb) = &self.on_hit {
            cb(self.hits.len());
        }
    }

    fn finish(mut self, elapsed: Duration) -> SweepReport {
        self.hits.sort_by_key(|(order, _)| *order);
        SweepReport {
            hits: self.hits.into_iter().map(|(_, hit)| hit).collect(),
            probed: self.probed,
            elapsed,
        }
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
