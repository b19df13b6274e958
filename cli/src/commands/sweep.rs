use std::time::Duration;

use anyhow::Context;
use colored::*;

use crate::{mprint, terminal::{colors, format, print, spinner}};
use netsweep_common::config::{Config, ProbeConfig};
use netsweep_common::network::target::Target;
use netsweep_common::success;
use netsweep_core::http::{DEFAULT_REQUEST_TIMEOUT, HttpExecutor};
use netsweep_core::scanner::{self, HitCallback, SweepReport};
use netsweep_core::service::{self, ServiceReport};

pub async fn sweep(target: Target, probe_cfg: &ProbeConfig, cfg: &Config) -> anyhow::Result<()> {
    probe_cfg.validate()?;

    let candidates: usize = target.len(probe_cfg.max_hosts);
    let spinner_handle = spinner::start_sweep_spinner(candidates, probe_cfg.ports.len());
    let progress = spinner_handle.sender();
    let on_hit: HitCallback = Box::new(move |count| {
        let _ = progress.send(spinner::hit_progress_message(count));
    });

    let report = scanner::sweep_target(&target, probe_cfg, Some(on_hit)).await;
    spinner_handle.finish_and_clear();
    let report: SweepReport = report?;

    let services: Vec<ServiceReport> = if cfg.check_service && !report.hits.is_empty() {
        print::header("service check", cfg.quiet);
        let executor = HttpExecutor::new(DEFAULT_REQUEST_TIMEOUT)
            .context("failed to build the HTTP client")?;
        service::check_services(&executor, &report.hits).await
    } else {
        Vec::new()
    };

    sweep_ends(&report, &services, cfg);
    Ok(())
}

fn sweep_ends(report: &SweepReport, services: &[ServiceReport], cfg: &Config) {
    if report.hits.is_empty() {
        no_hits_found(cfg);
        return;
    }

    if cfg.quiet > 0 {
        mprint!();
    }

    print::header("Sweep Results", cfg.quiet);
    let grouped = format::group_hits(&report.hits, services);
    print_hosts(&grouped, cfg);
    print_summary(grouped.len(), report.hits.len(), report.elapsed, cfg);
}

fn no_hits_found(cfg: &Config) {
    print::header("ZERO OPEN PORTS", cfg.quiet);
    if cfg.quiet < 2 {
        print::no_results();
    }
}

fn print_hosts(grouped: &[(String, format::HostSummary)], cfg: &Config) {
    if cfg.quiet >= 2 {
        return;
    }
    for (idx, (host, summary)) in grouped.iter().enumerate() {
        print::tree_head(idx, host);
        print::as_tree_one_level(format::host_to_details(summary));
        if idx + 1 != grouped.len() {
            mprint!();
        }
    }
}

fn print_summary(hosts: usize, open_ports: usize, total_time: Duration, cfg: &Config) {
    let live_hosts: ColoredString = format!("{hosts} live hosts").bold().green();
    let ports: ColoredString = format!("{open_ports} open ports").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: &ColoredString =
        &format!("Sweep Complete: {live_hosts} with {ports} in {total_time}")
            .color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(output);
        }
        _ => {
            mprint!();
            success!("{}", output)
        }
    }
}
