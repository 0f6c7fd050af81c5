//! Text codec for relay envelopes.
//!
//! The relay channel carries one JSON object per WebSocket text frame, so
//! the codec is a thin, error-typed wrapper around `serde_json`.

use thiserror::Error;

use super::messages::{InboundEnvelope, OutboundEnvelope};

/// Errors from decoding or encoding an envelope.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The text is not JSON, lacks a `type`, or its fields do not match the
    /// declared type.
    #[error("malformed envelope: {0}")]
    Malformed(#[source] serde_json::Error),

    /// An outbound envelope could not be serialised.
    #[error("failed to encode envelope: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Decodes one inbound envelope from a text frame.
///
/// Unknown `type` values decode successfully to [`InboundEnvelope::Unknown`].
///
/// # Errors
///
/// Returns [`ProtocolError::Malformed`] for invalid JSON, a missing `type`,
/// or missing / mistyped fields.
pub fn decode_inbound(text: &str) -> Result<InboundEnvelope, ProtocolError> {
    serde_json::from_str(text).map_err(ProtocolError::Malformed)
}

/// Encodes one outbound envelope as a text frame.
///
/// # Errors
///
/// Returns [`ProtocolError::Encode`] if serialisation fails.
pub fn encode_outbound(envelope: &OutboundEnvelope) -> Result<String, ProtocolError> {
    serde_json::to_string(envelope).map_err(ProtocolError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::messages::HostId;

    #[test]
    fn test_decode_valid_text() {
        let env = decode_inbound(r#"{"type":"connect-guest"}"#).unwrap();
        assert_eq!(env, InboundEnvelope::ConnectGuest);
    }

    #[test]
    fn test_decode_non_json_is_malformed() {
        let result = decode_inbound("hello relay");
        assert!(matches!(result, Err(ProtocolError::Malformed(_))));
    }

    #[test]
    fn test_decode_non_object_is_malformed() {
        assert!(matches!(decode_inbound("[1,2,3]"), Err(ProtocolError::Malformed(_))));
        assert!(matches!(decode_inbound(""), Err(ProtocolError::Malformed(_))));
    }

    #[test]
    fn test_encode_disconnect_host() {
        let text = encode_outbound(&OutboundEnvelope::DisconnectHost {
            host_id: HostId::from("42"),
        })
        .unwrap();
        assert_eq!(text, r#"{"type":"disconnect-host","hostid":"42"}"#);
    }

    #[test]
    fn test_encode_connect_host_field_order() {
        let text = encode_outbound(&OutboundEnvelope::ConnectHost {
            screen_width: 1280,
            screen_height: 720,
        })
        .unwrap();
        assert_eq!(text, r#"{"type":"connect-host","screenWidth":1280,"screenHeight":720}"#);
    }
}
