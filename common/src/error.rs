//! Validation errors for dotted-decimal input.

use std::fmt;

use thiserror::Error;

/// Which half of an address/netmask pair failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Address,
    Netmask,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Address => f.write_str("IP address"),
            Field::Netmask => f.write_str("netmask"),
        }
    }
}

/// Malformed dotted-decimal address or netmask.
///
/// Raised only while an [`AddressBlock`](crate::network::block::AddressBlock) is being
/// built; a constructed block never produces one afterwards.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid {field} '{input}': expected 4 dot-separated octets, found {found}")]
    SegmentCount {
        field: Field,
        input: String,
        found: usize,
    },

    #[error("invalid {field} '{input}': '{segment}' is not a decimal number")]
    NotNumeric {
        field: Field,
        input: String,
        segment: String,
    },

    #[error("invalid {field} '{input}': octet {value} is outside 0-255")]
    OctetOutOfRange {
        field: Field,
        input: String,
        value: i64,
    },

    #[error("invalid netmask '{input}': the first octet can not be less than 255")]
    ShortNetmask { input: String },

    #[error("invalid netmask '{input}': 0 bit found between 1 bits (bit {bit})")]
    NonContiguousNetmask { input: String, bit: u32 },

    #[error("invalid prefix length '{input}': expected a number between 0 and 32")]
    PrefixLength { input: String },

    #[error("invalid block '{input}': expected ADDRESS/NETMASK or ADDRESS/PREFIX")]
    MissingNetmask { input: String },
}

impl FormatError {
    /// The input half that caused the failure.
    pub fn field(&self) -> Field {
        match self {
            FormatError::SegmentCount { field, .. }
            | FormatError::NotNumeric { field, .. }
            | FormatError::OctetOutOfRange { field, .. } => *field,
            FormatError::ShortNetmask { .. }
            | FormatError::NonContiguousNetmask { .. }
            | FormatError::PrefixLength { .. }
            | FormatError::MissingNetmask { .. } => Field::Netmask,
        }
    }
}
