//! Shared models for `netsweep`.
//!
//! * [`network`]: subnet arithmetic ([`network::block::AddressBlock`]) and scan targets.
//! * [`error`]: the validation errors raised while building those models.
//! * [`config`]: options handed explicitly to the probing routines.
//! * [`logging`]: `tracing` shorthands used across the workspace.

pub mod config;
pub mod error;
pub mod logging;
pub mod network;

#[doc(hidden)]
pub use tracing;
