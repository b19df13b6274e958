//! # Address Block Model
//!
//! A base IPv4 address paired with a netmask, validated once at construction.
//!
//! The block keeps the address exactly as given (`10.4.20.1`, not `10.4.20.0`) and
//! derives everything else on demand: the network address, the prefix length, the
//! CIDR rendering and the candidate hosts inside the block.

use std::fmt;
use std::iter::FusedIterator;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::{Field, FormatError};
use crate::network::octets::{self, to_dotted};

/// Smallest accepted value for the first netmask octet.
const NETMASK_LEADING_OCTET: i64 = 255;

/// An immutable IPv4 subnet definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressBlock {
    base: u32,
    netmask: u32,
}

impl AddressBlock {
    /// Builds a block from a dotted address and a dotted netmask.
    ///
    /// Fails when either string is not four decimal octets in `0..=255`, when the
    /// netmask starts with an octet below 255, or when its 1 bits are not one
    /// contiguous run starting at the most significant bit.
    pub fn new(address: &str, netmask: &str) -> Result<Self, FormatError> {
        let base = octets::parse_dotted(address, Field::Address)?;
        let netmask = parse_netmask(netmask)?;
        Ok(Self { base, netmask })
    }

    /// Builds a block from a dotted address and a prefix length.
    ///
    /// The prefix is turned into a netmask and goes through the same checks, so
    /// prefixes shorter than `/8` are rejected.
    pub fn with_prefix(address: &str, prefix: u8) -> Result<Self, FormatError> {
        if prefix > 32 {
            return Err(FormatError::PrefixLength {
                input: prefix.to_string(),
            });
        }
        let base = octets::parse_dotted(address, Field::Address)?;
        let netmask = mask_from_prefix(prefix);
        check_netmask_bits(netmask, &to_dotted(netmask))?;
        Ok(Self { base, netmask })
    }

    /// The base address as it was given.
    pub fn ip(&self) -> String {
        to_dotted(self.base)
    }

    /// `<network address>/<prefix length>`.
    pub fn cidr(&self) -> String {
        format!("{}/{}", to_dotted(self.base & self.netmask), self.prefix_len())
    }

    /// Number of leading 1 bits in the netmask.
    pub fn prefix_len(&self) -> u8 {
        let mut shifts: u32 = 0;
        while shifts < 32 && (self.netmask << shifts) != 0 {
            shifts += 1;
        }
        shifts as u8
    }

    pub fn base_address(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.base)
    }

    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.netmask)
    }

    pub fn network_address(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.base & self.netmask)
    }

    /// `2^(32 - prefix) - 1`, the largest host offset inside the block.
    ///
    /// Computed in 64 bits so `/0` does not overflow.
    pub fn host_count(&self) -> u64 {
        let host_bits = 32 - u32::from(self.prefix_len());
        (1u64 << host_bits) - 1
    }

    /// Lazily walks the candidate hosts of the block in ascending order.
    ///
    /// Offsets run from 1 (the network address itself is skipped) up to
    /// `host_count() - 1`, stopping early after `limit` addresses when a limit
    /// is given. `/31` and `/32` blocks yield nothing.
    pub fn available_ips(&self, limit: Option<u64>) -> AvailableIps {
        let mut last = self.host_count().saturating_sub(1);
        if let Some(limit) = limit {
            last = last.min(limit);
        }
        AvailableIps {
            network: self.base & self.netmask,
            front: 1,
            back: last,
        }
    }

    /// Same as [`AddressBlock::available_ips`], rendered as dotted strings.
    pub fn available_ip_strings(&self, limit: Option<u64>) -> Vec<String> {
        self.available_ips(limit)
            .map(|addr| addr.to_string())
            .collect()
    }

    /// The block as a `pnet` network, for callers that need containment checks.
    pub fn to_ipv4_network(&self) -> anyhow::Result<Ipv4Network> {
        let network = Ipv4Network::new(self.network_address(), self.prefix_len())?;
        Ok(network)
    }
}

impl fmt::Display for AddressBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cidr())
    }
}

impl FromStr for AddressBlock {
    type Err = FormatError;

    /// Parses `ADDRESS/NETMASK` (`10.0.0.1/255.255.255.0`) or `ADDRESS/PREFIX`
    /// (`10.0.0.1/24`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((address, mask)) = s.split_once('/') else {
            return Err(FormatError::MissingNetmask {
                input: s.to_string(),
            });
        };

        if mask.contains('.') {
            return AddressBlock::new(address, mask);
        }

        let prefix = mask
            .parse::<u8>()
            .map_err(|_| FormatError::PrefixLength {
                input: mask.to_string(),
            })?;
        AddressBlock::with_prefix(address, prefix)
    }
}

/// Iterator over the candidate hosts of an [`AddressBlock`].
#[derive(Debug, Clone)]
pub struct AvailableIps {
    network: u32,
    front: u64,
    back: u64,
}

impl AvailableIps {
    fn at(&self, offset: u64) -> Ipv4Addr {
        Ipv4Addr::from(self.network + offset as u32)
    }
}

impl Iterator for AvailableIps {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front > self.back {
            return None;
        }
        let addr = self.at(self.front);
        self.front += 1;
        Some(addr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.back + 1).saturating_sub(self.front) as usize;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for AvailableIps {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front > self.back {
            return None;
        }
        let addr = self.at(self.back);
        self.back -= 1;
        Some(addr)
    }
}

impl ExactSizeIterator for AvailableIps {}

impl FusedIterator for AvailableIps {}

fn parse_netmask(input: &str) -> Result<u32, FormatError> {
    let segments = octets::split_octets(input, Field::Netmask)?;

    let leading = octets::parse_segment(segments[0], input, Field::Netmask)?;
    if leading < NETMASK_LEADING_OCTET {
        return Err(FormatError::ShortNetmask {
            input: input.to_string(),
        });
    }

    let mut values = [0u8; 4];
    for (slot, segment) in values.iter_mut().zip(segments) {
        let value = octets::parse_segment(segment, input, Field::Netmask)?;
        *slot = octets::check_octet(value, input, Field::Netmask)?;
    }

    let netmask = octets::assemble(values);
    check_netmask_bits(netmask, input)?;
    Ok(netmask)
}

/// The leading-octet rule plus the "no 0 bit between 1 bits" rule.
fn check_netmask_bits(netmask: u32, input: &str) -> Result<(), FormatError> {
    if i64::from(netmask >> 24) < NETMASK_LEADING_OCTET {
        return Err(FormatError::ShortNetmask {
            input: input.to_string(),
        });
    }
    if let Some(bit) = first_hole(netmask) {
        return Err(FormatError::NonContiguousNetmask {
            input: input.to_string(),
            bit,
        });
    }
    Ok(())
}

/// Scanning from the least significant bit, the 1-based position of the first 0 bit
/// that follows a 1 bit.
fn first_hole(netmask: u32) -> Option<u32> {
    if netmask == 0 {
        return None;
    }
    let lowest_one = netmask.trailing_zeros();
    let zero_at = lowest_one + (netmask >> lowest_one).trailing_ones();
    (zero_at < 32).then_some(zero_at + 1)
}

fn mask_from_prefix(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
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
