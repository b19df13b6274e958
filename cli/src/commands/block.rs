use anyhow::Context;
use colored::*;
use netsweep_common::config::Config;
use netsweep_common::network::block::AddressBlock;

use crate::terminal::{colors, format, print};

pub fn block(
    address: &str,
    netmask: &str,
    list: bool,
    max: Option<u64>,
    cfg: &Config,
) -> anyhow::Result<()> {
    let block = AddressBlock::new(address, netmask)
        .with_context(|| format!("cannot build a block from {address} {netmask}"))?;

    print::header("address block", cfg.quiet);
    print::set_key_width(["IP", "CIDR", "Netmask", "Network", "Candidates"]);
    print::aligned_line("IP", block.ip().color(colors::IPV4_ADDR));
    print::aligned_line(
        "CIDR",
        format::cidr_value(&block.network_address().to_string(), block.prefix_len()),
    );
    print::aligned_line("Netmask", block.netmask().to_string());
    print::aligned_line("Network", block.network_address().to_string());
    print::aligned_line(
        "Candidates",
        block.available_ips(None).len().to_string().bold(),
    );

    if list {
        print::header("candidate hosts", cfg.quiet);
        for addr in block.available_ips(max) {
            print::print_status(addr.to_string());
        }
    }

    print::end_of_program();
    Ok(())
}
