//! Domain layer: pure host-session logic with no OS or network dependencies.
//!
//! - **`session`** – the Session State Machine (phase + host id).
//! - **`pointer`** – screen size and the guest → absolute pointer mapping.

pub mod pointer;
pub mod session;
