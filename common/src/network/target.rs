//! # Scan Target Model
//!
//! Defines the possible inputs for a sweep.
//!
//! A target is either:
//! * A single host, given as an IPv4/IPv6 address or a hostname.
//! * An address block with a dotted netmask (e.g., `10.4.20.1/255.255.254.0`).
//! * An address block with a prefix length (e.g., `192.168.1.0/24`).

use std::iter::{self, FusedIterator, Once};
use std::net::IpAddr;
use std::str::FromStr;

use crate::error::FormatError;
use crate::network::block::{AddressBlock, AvailableIps};

/// Represents a distinct target to be swept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// Probe one host as-is.
    Host { host: String },
    /// Probe the candidate hosts of a block.
    Block { block: AddressBlock },
}

impl FromStr for Target {
    type Err = FormatError;

    /// Parses a string into a `Target`.
    ///
    /// Anything containing `/` must be a valid block. Otherwise the input is taken
    /// as an IP literal or, failing that, a hostname.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.contains('/') {
            let block = s.parse::<AddressBlock>()?;
            return Ok(Target::Block { block });
        }

        if let Ok(addr) = s.parse::<IpAddr>() {
            return Ok(Target::Host {
                host: addr.to_string(),
            });
        }

        if is_hostname(s) {
            return Ok(Target::Host {
                host: s.to_ascii_lowercase(),
            });
        }

        // Dotted numeric input that is not an IP literal gets the octet diagnostics.
        AddressBlock::new(s, "255.255.255.255").map(|block| Target::Host { host: block.ip() })
    }
}

impl Target {
    /// Walks the hosts to probe, in order, rendering each one only when asked for it.
    ///
    /// `limit` caps how many candidates a block contributes.
    pub fn candidates(&self, limit: Option<u64>) -> Candidates {
        match self {
            Target::Host { host } => Candidates::Host(iter::once(host.clone())),
            Target::Block { block } => Candidates::Block(block.available_ips(limit)),
        }
    }

    /// How many hosts [`Target::candidates`] would yield.
    pub fn len(&self, limit: Option<u64>) -> usize {
        self.candidates(limit).len()
    }

    pub fn is_empty(&self, limit: Option<u64>) -> bool {
        self.len(limit) == 0
    }
}

/// Iterator returned by [`Target::candidates`].
#[derive(Debug, Clone)]
pub enum Candidates {
    Host(Once<String>),
    Block(AvailableIps),
}

impl Iterator for Candidates {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Candidates::Host(host) => host.next(),
            Candidates::Block(ips) => ips.next().map(|addr| addr.to_string()),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Candidates::Host(host) => host.size_hint(),
            Candidates::Block(ips) => ips.size_hint(),
        }
    }
}

impl DoubleEndedIterator for Candidates {
    fn next_back(&mut self) -> Option<Self::Item> {
        match self {
            Candidates::Host(host) => host.next_back(),
            Candidates::Block(ips) => ips.next_back().map(|addr| addr.to_string()),
        }
    }
}

impl ExactSizeIterator for Candidates {}

impl FusedIterator for Candidates {}

/// Loose RFC 1123 check: dot-separated labels of letters, digits and hyphens, with
/// at least one letter somewhere so `1.2.3` is not mistaken for a name.
fn is_hostname(s: &str) -> bool {
    if s.is_empty() || s.len() > 253 {
        return false;
    }
    let labels_ok = s.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    labels_ok && s.chars().any(|c| c.is_ascii_alphabetic())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
