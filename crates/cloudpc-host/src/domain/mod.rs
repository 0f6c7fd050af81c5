//! Domain layer for the host agent.
//!
//! Holds plain configuration types with no I/O.  Session state, envelopes
//! and translation tables live in `cloudpc-core`.

pub mod config;

pub use config::HostConfig;
