//! Envelope types for the relay's JSON protocol.
//!
//! Every envelope is a JSON object whose `"type"` field names the variant;
//! the remaining fields sit next to it in the same object:
//!
//! ```json
//! {"type":"connect-host","screenWidth":1920,"screenHeight":1080}
//! {"type":"create-hostid","hostid":"42"}
//! {"type":"key-down","key":"Enter","shift":false,"ctrl":false,"alt":false}
//! ```
//!
//! Serde's `#[serde(tag = "type")]` handles the discriminator.  Inbound types
//! the host does not understand decode to [`InboundEnvelope::Unknown`] rather
//! than failing, so the relay can add message types without breaking hosts.
//!
//! The two directions are separate enums: the host never sends what it
//! receives and vice versa.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

// ── Host id ───────────────────────────────────────────────────────────────────

/// Opaque identifier the relay assigns to this host.
///
/// The relay may send it as a JSON string or a number; it is kept as text and
/// always written back as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HostId(String);

impl HostId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HostId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for HostId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HostId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawHostId {
            Text(String),
            Number(serde_json::Number),
        }

        let text = match RawHostId::deserialize(deserializer)? {
            RawHostId::Text(text) => text,
            RawHostId::Number(number) => number.to_string(),
        };
        if text.is_empty() {
            return Err(de::Error::custom("hostid must not be empty"));
        }
        Ok(Self(text))
    }
}

// ── Relay → host ──────────────────────────────────────────────────────────────

/// Mouse buttons the guest can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
}

/// Every envelope the relay can deliver to the host.
///
/// # Serde representation
///
/// ```json
/// {"type":"create-hostid","hostid":"42"}
/// {"type":"connect-guest"}
/// {"type":"mouse-move","x":960,"y":540}
/// {"type":"mouse-down","button":"left"}
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InboundEnvelope {
    /// The relay registered this host and assigned its id.
    #[serde(rename = "create-hostid")]
    CreateHostId {
        #[serde(rename = "hostid")]
        host_id: HostId,
    },

    /// A guest attached; start streaming the screen.
    ConnectGuest,

    /// The guest detached; stop streaming.
    DisconnectGuest,

    /// Pointer position in pixels of the host screen as the guest sees it.
    MouseMove { x: f64, y: f64 },

    MouseUp { button: MouseButton },

    MouseDown { button: MouseButton },

    /// A key press.  `key` is the DOM `KeyboardEvent.key` value.
    KeyDown {
        key: String,
        shift: bool,
        ctrl: bool,
        alt: bool,
    },

    /// Any `type` this host does not handle.
    #[serde(other)]
    Unknown,
}

impl InboundEnvelope {
    /// Returns the wire name of this envelope's type, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEnvelope::CreateHostId { .. } => "create-hostid",
            InboundEnvelope::ConnectGuest => "connect-guest",
            InboundEnvelope::DisconnectGuest => "disconnect-guest",
            InboundEnvelope::MouseMove { .. } => "mouse-move",
            InboundEnvelope::MouseUp { .. } => "mouse-up",
            InboundEnvelope::MouseDown { .. } => "mouse-down",
            InboundEnvelope::KeyDown { .. } => "key-down",
            InboundEnvelope::Unknown => "unknown",
        }
    }
}

// ── Host → relay ──────────────────────────────────────────────────────────────

/// Every envelope the host sends to the relay.
///
/// # Serde representation
///
/// ```json
/// {"type":"connect-host","screenWidth":1920,"screenHeight":1080}
/// {"type":"disconnect-host","hostid":"42"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundEnvelope {
    /// Announces the host and its physical screen size.
    ConnectHost {
        #[serde(rename = "screenWidth")]
        screen_width: u32,
        #[serde(rename = "screenHeight")]
        screen_height: u32,
    },

    /// Withdraws the host before the connection closes.
    DisconnectHost {
        #[serde(rename = "hostid")]
        host_id: HostId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> Result<InboundEnvelope, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_create_hostid_accepts_string() {
        let env = decode(json!({"type": "create-hostid", "hostid": "42"})).unwrap();
        assert_eq!(env, InboundEnvelope::CreateHostId { host_id: HostId::from("42") });
    }

    #[test]
    fn test_create_hostid_accepts_number() {
        let env = decode(json!({"type": "create-hostid", "hostid": 42})).unwrap();
        assert_eq!(env, InboundEnvelope::CreateHostId { host_id: HostId::from("42") });
    }

    #[test]
    fn test_create_hostid_rejects_empty_and_missing_id() {
        assert!(decode(json!({"type": "create-hostid", "hostid": ""})).is_err());
        assert!(decode(json!({"type": "create-hostid"})).is_err());
        assert!(decode(json!({"type": "create-hostid", "hostid": true})).is_err());
    }

    #[test]
    fn test_mouse_move_accepts_integers_and_floats() {
        let env = decode(json!({"type": "mouse-move", "x": 960, "y": 540.5})).unwrap();
        assert_eq!(env, InboundEnvelope::MouseMove { x: 960.0, y: 540.5 });
    }

    #[test]
    fn test_mouse_buttons() {
        let down = decode(json!({"type": "mouse-down", "button": "left"})).unwrap();
        let up = decode(json!({"type": "mouse-up", "button": "right"})).unwrap();
        assert_eq!(down, InboundEnvelope::MouseDown { button: MouseButton::Left });
        assert_eq!(up, InboundEnvelope::MouseUp { button: MouseButton::Right });
    }

    #[test]
    fn test_unsupported_button_is_rejected() {
        assert!(decode(json!({"type": "mouse-down", "button": "middle"})).is_err());
    }

    #[test]
    fn test_key_down_requires_all_modifier_flags() {
        assert!(decode(json!({"type": "key-down", "key": "a", "shift": false})).is_err());
    }

    #[test]
    fn test_unrecognised_type_is_unknown() {
        let env = decode(json!({"type": "ping"})).unwrap();
        assert_eq!(env, InboundEnvelope::Unknown);
        assert_eq!(env.kind(), "unknown");
    }

    #[test]
    fn test_missing_type_is_an_error() {
        assert!(decode(json!({"hostid": "42"})).is_err());
    }

    #[test]
    fn test_connect_host_wire_shape() {
        // Arrange
        let env = OutboundEnvelope::ConnectHost { screen_width: 1920, screen_height: 1080 };

        // Act
        let value = serde_json::to_value(&env).unwrap();

        // Assert
        assert_eq!(
            value,
            json!({"type": "connect-host", "screenWidth": 1920, "screenHeight": 1080})
        );
    }

    #[test]
    fn test_disconnect_host_wire_shape() {
        let env = OutboundEnvelope::DisconnectHost { host_id: HostId::from("42") };
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value, json!({"type": "disconnect-host", "hostid": "42"}));
    }
}
