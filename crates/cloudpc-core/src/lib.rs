//! # cloudpc-core
//!
//! Shared, I/O-free building blocks of the RemoteCloudPC host agent.
//!
//! The host connects to a relay server, announces itself, and once a guest
//! attaches it streams its screen and replays the guest's pointer and
//! keyboard input.  This crate holds the parts of that job that are pure
//! logic and can be tested without a display, a network, or a subprocess:
//!
//! - **`protocol`** – the JSON envelopes exchanged with the relay and the
//!   codec that turns text frames into typed [`InboundEnvelope`] values.
//!
//! - **`domain`** – the Session State Machine ([`Session`]) and the Pointer
//!   Coordinate Mapper that scales guest pixels into the absolute
//!   `[0, 65535]` injection space.
//!
//! - **`keymap`** – the Key Translation Table that resolves DOM key names to
//!   Windows Virtual-Key strokes or literal text.

pub mod domain;
pub mod keymap;
pub mod protocol;

pub use domain::pointer::{map_to_absolute, AbsolutePoint, ScreenSize};
pub use domain::session::{Phase, Session, SessionError, SessionEvent};
pub use keymap::{translate, KeyAction, KeyMapError, ModifierSet, VirtualKeyCode};
pub use protocol::codec::{decode_inbound, encode_outbound, ProtocolError};
pub use protocol::messages::{HostId, InboundEnvelope, MouseButton, OutboundEnvelope};
