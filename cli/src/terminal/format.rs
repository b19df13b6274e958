use std::collections::BTreeMap;

use colored::*;
use netsweep_core::scanner::ScanHit;
use netsweep_core::service::ServiceReport;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

/// Ports found open on one host, with the service check result when one ran.
#[derive(Debug, Default)]
pub struct HostSummary {
    pub ports: Vec<u16>,
    pub services: BTreeMap<u16, bool>,
}

/// Groups hits per host, keeping the order hosts were first seen in.
pub fn group_hits(hits: &[ScanHit], services: &[ServiceReport]) -> Vec<(String, HostSummary)> {
    let mut grouped: Vec<(String, HostSummary)> = Vec::new();
    for hit in hits {
        let idx = match grouped.iter().position(|(host, _)| *host == hit.host) {
            Some(idx) => idx,
            None => {
                grouped.push((hit.host.clone(), HostSummary::default()));
                grouped.len() - 1
            }
        };
        grouped[idx].1.ports.push(hit.port);
    }

    for report in services {
        if let Some((_, summary)) = grouped.iter_mut().find(|(host, _)| *host == report.hit.host) {
            summary.services.insert(report.hit.port, report.responded());
        }
    }
    grouped
}

pub fn host_to_details(summary: &HostSummary) -> Vec<Detail> {
    let mut details: Vec<Detail> = Vec::new();
    for port in &summary.ports {
        details.push(("Port".to_string(), port_value(*port)));
        if let Some(responded) = summary.services.get(port) {
            details.push(("HTTP".to_string(), service_value(*responded)));
        }
    }
    details
}

pub fn port_value(port: u16) -> ColoredString {
    format!("{} {}", port.to_string().color(colors::PORT), "open".color(colors::OPEN)).normal()
}

pub fn service_value(responded: bool) -> ColoredString {
    if responded {
        "service responded".color(colors::OPEN)
    } else {
        "no response".color(colors::CLOSED)
    }
}

pub fn cidr_value(network: &str, prefix: u8) -> ColoredString {
    let address: ColoredString = network.color(colors::IPV4_ADDR);
    let prefix: ColoredString = prefix.to_string().color(colors::IPV4_PREFIX);
    format!("{address}/{prefix}").color(colors::SEPARATOR)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
