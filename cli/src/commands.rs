pub mod block;
pub mod probe;
pub mod sweep;

use clap::{ArgAction, Parser, Subcommand};
use netsweep_common::config::DEFAULT_PORTS;
use netsweep_common::network::target::Target;

#[derive(Parser)]
#[command(name = "netsweep")]
#[command(about = "Subnet enumeration and TCP reachability sweeps.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce output (-q drops headers, -qq only prints the summary)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the network, prefix and candidate hosts of an address block
    #[command(alias = "b")]
    Block {
        /// Base address, e.g. 10.4.20.1
        address: String,
        /// Dotted netmask, e.g. 255.255.254.0
        netmask: String,
        /// Print every candidate host
        #[arg(long)]
        list: bool,
        /// Stop listing after this many hosts
        #[arg(long)]
        max: Option<u64>,
    },
    /// Check whether a single host accepts connections on a port
    #[command(alias = "p")]
    Probe {
        host: String,
        port: u16,
        /// Connection timeout in milliseconds
        #[arg(long, default_value_t = 500)]
        timeout: u64,
    },
    /// Probe every candidate host of a target on one or more ports
    #[command(alias = "s")]
    Sweep {
        /// Host, ADDRESS/NETMASK or ADDRESS/PREFIX
        target: Target,
        /// Comma-separated ports to probe on each host
        #[arg(short, long, value_delimiter = ',', default_values_t = DEFAULT_PORTS)]
        ports: Vec<u16>,
        /// Connection timeout in milliseconds
        #[arg(long, default_value_t = 500)]
        timeout: u64,
        /// Probes allowed in flight at once
        #[arg(short, long, default_value_t = 1)]
        concurrency: usize,
        /// Probe at most this many hosts of a block
        #[arg(long)]
        max: Option<u64>,
        /// Send an HTTP request to every open port found
        #[arg(long)]
        check_service: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
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
    use clap::CommandFactory;

    #[test]
    fn command_line_is_well_formed() {
        CommandLine::command().debug_assert();
    }

    #[test]
    fn sweep_defaults() {
        let cli = CommandLine::try_parse_from(["netsweep", "sweep", "10.4.20.1/23"]).unwrap();
        let Commands::Sweep { ports, timeout, concurrency, max, check_service, .. } = cli.command
        else {
            panic!("expected sweep");
        };
        assert_eq!(ports, vec![40310, 6259]);
        assert_eq!(timeout, 500);
        assert_eq!(concurrency, 1);
        assert_eq!(max, None);
        assert!(!check_service);
    }

    #[test]
    fn sweep_parses_port_list_and_flags() {
        let cli = CommandLine::try_parse_from([
            "netsweep", "-q", "s", "10.0.0.1/255.255.255.0", "-p", "80,443", "-c", "16",
            "--check-service",
        ])
        .unwrap();
        assert_eq!(cli.quiet, 1);
        let Commands::Sweep { ports, concurrency, check_service, .. } = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!(ports, vec![80, 443]);
        assert_eq!(concurrency, 16);
        assert!(check_service);
    }

    #[test]
    fn sweep_rejects_invalid_target() {
        let parsed = CommandLine::try_parse_from(["netsweep", "sweep", "10.0.0.1/255.0.255.0"]);
        assert!(parsed.is_err());
    }
}
