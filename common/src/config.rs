use std::time::Duration;

/// Presentation and follow-up options for a run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Skips the banner line at startup.
    pub no_banner: bool,
    /// 0 prints everything, 1 drops headers, 2 also drops the per-host trees.
    pub quiet: u8,
    /// Hands every sweep hit to the HTTP executor for a follow-up request.
    pub check_service: bool,
}

/// Default connection timeout for a single reachability probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Ports probed when none are given.
pub const DEFAULT_PORTS: [u16; 2] = [40310, 6259];

/// Options handed to every probing routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Upper bound on one connection attempt.
    pub timeout: Duration,
    /// Ports probed on each candidate, in order.
    pub ports: Vec<u16>,
    /// How many probes may be in flight at once. 1 means strictly sequential.
    pub concurrency: usize,
    /// Caps the number of candidates taken from a block. `None` means every host.
    pub max_hosts: Option<u64>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PROBE_TIMEOUT,
            ports: DEFAULT_PORTS.to_vec(),
            concurrency: 1,
            max_hosts: None,
        }
    }
}

impl ProbeConfig {
    /// Rejects settings that would make a sweep meaningless or stall it.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.ports.is_empty(), "at least one port must be probed");
        anyhow::ensure!(!self.timeout.is_zero(), "probe timeout must be greater than zero");
        anyhow::ensure!(self.concurrency > 0, "concurrency must be at least 1");
        Ok(())
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
