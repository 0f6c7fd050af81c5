//! cloudpc-host library crate.
//!
//! The host agent of RemoteCloudPC: it registers this machine with a relay
//! server, streams the screen to an attached guest through an external
//! capture process, and replays the guest's pointer and keyboard input.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Relay (JSON over WebSocket, port 8080)      Relay ingest (HTTP, port 8082)
//!         ↕                                              ↑
//! [cloudpc-host]                                         │ MPEG-1 stream
//!   ├── domain/           HostConfig                     │
//!   ├── application/      HostController, InputInjector, CaptureSupervisor
//!   └── infrastructure/
//!         ├── relay/            WebSocket session loop (tokio-tungstenite)
//!         ├── capture/          ffmpeg launcher ─────────┘
//!         ├── input_simulation/ SendInput (Windows)
//!         └── screen_info/      primary screen size
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O.
//! - `application` depends on `domain` and `cloudpc-core`; OS access goes
//!   through traits.
//! - `infrastructure` implements those traits and owns the network loop.

/// Domain layer: configuration types.
pub mod domain;

/// Application layer: dispatch, capture supervision and input injection.
pub mod application;

/// Infrastructure layer: relay transport and platform adapters.
pub mod infrastructure;
