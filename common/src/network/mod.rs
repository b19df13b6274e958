pub mod block;
pub mod octets;
pub mod target;
