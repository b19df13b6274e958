//! Probing engine for `netsweep`.
//!
//! * [`network::tcp`]: the single reachability probe.
//! * [`scanner`]: sweeps many candidates through that probe with bounded concurrency.
//! * [`http`]: the request executor hits are handed to.
//! * [`service`]: follow-up checks built on the executor.

pub mod http;
pub mod network;
pub mod scanner;
pub mod service;
