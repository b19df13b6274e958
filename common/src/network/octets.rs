//! Dotted-decimal conversion between text and 32-bit values.
//!
//! The first octet lands in bits 31-24, the last one in bits 7-0.

use std::net::Ipv4Addr;

use crate::error::{Field, FormatError};

const OCTET_COUNT: usize = 4;

/// Splits `input` on `.` and checks that exactly four segments came out.
///
/// Empty segments count, so a trailing dot (`1.2.3.4.`) is a fifth segment.
pub(crate) fn split_octets(input: &str, field: Field) -> Result<Vec<&str>, FormatError> {
    let segments: Vec<&str> = input.split('.').collect();
    if segments.len() != OCTET_COUNT {
        return Err(FormatError::SegmentCount {
            field,
            input: input.to_string(),
            found: segments.len(),
        });
    }
    Ok(segments)
}

/// Parses one segment as a base-10 integer without checking its range.
pub(crate) fn parse_segment(segment: &str, input: &str, field: Field) -> Result<i64, FormatError> {
    segment.parse::<i64>().map_err(|_| FormatError::NotNumeric {
        field,
        input: input.to_string(),
        segment: segment.to_string(),
    })
}

/// Rejects any value that does not survive truncation to 8 bits.
pub(crate) fn check_octet(value: i64, input: &str, field: Field) -> Result<u8, FormatError> {
    if value != (value & 0xFF) {
        return Err(FormatError::OctetOutOfRange {
            field,
            input: input.to_string(),
            value,
        });
    }
    Ok(value as u8)
}

/// Packs validated octets into a big-endian `u32`.
pub(crate) fn assemble(octets: [u8; OCTET_COUNT]) -> u32 {
    octets
        .iter()
        .fold(0u32, |acc, &octet| (acc << 8) | u32::from(octet))
}

/// Parses `a.b.c.d` into its numeric form.
pub fn parse_dotted(input: &str, field: Field) -> Result<u32, FormatError> {
    let segments = split_octets(input, field)?;
    let mut octets = [0u8; OCTET_COUNT];
    for (slot, segment) in octets.iter_mut().zip(segments) {
        let value = parse_segment(segment, input, field)?;
        *slot = check_octet(value, input, field)?;
    }
    Ok(assemble(octets))
}

/// Renders a numeric address as `a.b.c.d`.
pub fn to_dotted(value: u32) -> String {
    Ipv4Addr::from(value).to_string()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
