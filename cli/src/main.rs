mod commands;
mod terminal;

use std::process::ExitCode;
use std::time::Duration;

use commands::{CommandLine, Commands, block, probe, sweep};
use netsweep_common::config::{Config, ProbeConfig};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose);

    let cfg = Config {
        no_banner: commands.no_banner,
        quiet: commands.quiet,
        check_service: false,
    };
    print::banner(cfg.no_banner, cfg.quiet);

    match commands.command {
        Commands::Block {
            address,
            netmask,
            list,
            max,
        } => block::block(&address, &netmask, list, max, &cfg).map(|()| ExitCode::SUCCESS),
        Commands::Probe {
            host,
            port,
            timeout,
        } => probe::probe(&host, port, timeout, &cfg)
            .await
            .map(probe::exit_code),
        Commands::Sweep {
            target,
            ports,
            timeout,
            concurrency,
            max,
            check_service,
        } => {
            print::header("getting ready for sweep", cfg.quiet);
            let probe_cfg = ProbeConfig {
                timeout: Duration::from_millis(timeout),
                ports,
                concurrency,
                max_hosts: max,
            };
            let cfg = Config {
                check_service,
                ..cfg
            };
            sweep::sweep(target, &probe_cfg, &cfg)
                .await
                .map(|()| ExitCode::SUCCESS)
        }
    }
}
