//! Relay protocol: envelope types and the JSON text codec.

pub mod codec;
pub mod messages;
