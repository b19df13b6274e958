use std::process::ExitCode;
use std::time::Duration;

use netsweep_common::config::Config;
use netsweep_common::{success, warn};
use netsweep_core::network::tcp::{self, ProbeOutcome};

use crate::terminal::print;

pub async fn probe(
    host: &str,
    port: u16,
    timeout_ms: u64,
    cfg: &Config,
) -> anyhow::Result<ProbeOutcome> {
    anyhow::ensure!(timeout_ms > 0, "probe timeout must be greater than zero");

    print::header("reachability probe", cfg.quiet);
    let outcome = tcp::probe(host, port, Duration::from_millis(timeout_ms)).await;

    if outcome.is_open() {
        success!("{host}:{port} is open");
    } else {
        warn!("{host}:{port} is not reachable ({outcome})");
    }
    Ok(outcome)
}

/// 0 when the port answered, 1 otherwise, so scripts can branch on the result.
pub fn exit_status(outcome: ProbeOutcome) -> u8 {
    if outcome.is_open() { 0 } else { 1 }
}

pub fn exit_code(outcome: ProbeOutcome) -> ExitCode {
    ExitCode::from(exit_status(outcome))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
