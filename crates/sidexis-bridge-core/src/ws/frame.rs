//! WebSocket text-frame codec.
//!
//! Decoding handles masked client frames with all three payload length
//! encodings (7-bit, 16-bit, 64-bit). Encoding produces the one restricted
//! reply frame the bridge sends: an unmasked text frame with a single-byte
//! length, which caps the status payload at 125 bytes.

use super::{WsError, WsResult};

/// Longest status payload the single-byte length encoding can carry.
pub const MAX_STATUS_LEN: usize = 125;

/// Text frame opcode.
pub const OPCODE_TEXT: u8 = 0x1;

/// Protocol deviations observed while decoding a client frame.
///
/// Neither aborts the decode: the one known client has produced both and
/// its sessions survive them, so the codec stays permissive and leaves the
/// logging to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAnomaly {
    /// Payload length of zero.
    EmptyPayload,
    /// Client frame without the mask bit, forbidden by RFC 6455.
    Unmasked,
}

impl FrameAnomaly {
    /// Log-file wording for this anomaly.
    pub fn describe(&self) -> &'static str {
        match self {
            FrameAnomaly::EmptyPayload => "frame payload length is zero",
            FrameAnomaly::Unmasked => "client frame mask bit not set",
        }
    }
}

/// One decoded client text frame.
#[derive(Debug)]
pub struct DecodedFrame {
    /// FIN bit. Recorded but not interpreted; fragmentation is unsupported.
    pub fin: bool,
    /// Low nibble of the first byte. Only text (1) is meaningful here.
    pub opcode: u8,
    /// Unmasked UTF-8 payload; empty when an anomaly prevented extraction.
    pub text: String,
    /// Deviations encountered, for the caller to log.
    pub anomalies: Vec<FrameAnomaly>,
}

fn take(bytes: &[u8], offset: usize, count: usize) -> WsResult<&[u8]> {
    bytes.get(offset..offset + count).ok_or(WsError::Truncated {
        needed: offset + count,
        have: bytes.len(),
    })
}

/// Decode exactly one client-to-server frame.
///
/// Anomalous but recoverable frames (zero-length payload, missing mask bit)
/// return an empty-text [`DecodedFrame`] with the anomaly recorded.
/// Structurally broken frames (truncated header or payload) are errors.
pub fn decode_text_frame(bytes: &[u8]) -> WsResult<DecodedFrame> {
    let header = take(bytes, 0, 2)?;
    let fin = header[0] & 0x80 != 0;
    let opcode = header[0] & 0x0f;
    let masked = header[1] & 0x80 != 0;

    // Extended payload lengths are big-endian on the wire.
    let (payload_len, offset) = match header[1] & 0x7f {
        126 => {
            let ext = take(bytes, 2, 2)?;
            (u64::from(u16::from_be_bytes([ext[0], ext[1]])), 4)
        }
        127 => {
            let ext = take(bytes, 2, 8)?;
            let mut raw = [0u8; 8];
            raw.copy_from_slice(ext);
            (u64::from_be_bytes(raw), 10)
        }
        base => (u64::from(base), 2),
    };

    let mut anomalies = Vec::new();

    if payload_len == 0 {
        anomalies.push(FrameAnomaly::EmptyPayload);
        return Ok(DecodedFrame {
            fin,
            opcode,
            text: String::new(),
            anomalies,
        });
    }

    if !masked {
        anomalies.push(FrameAnomaly::Unmasked);
        return Ok(DecodedFrame {
            fin,
            opcode,
            text: String::new(),
            anomalies,
        });
    }

    let payload_len =
        usize::try_from(payload_len).map_err(|_| WsError::PayloadTooLarge(payload_len))?;

    let key_bytes = take(bytes, offset, 4)?;
    let key = [key_bytes[0], key_bytes[1], key_bytes[2], key_bytes[3]];

    let masked_payload = take(bytes, offset + 4, payload_len)?;
    let payload: Vec<u8> = masked_payload
        .iter()
        .enumerate()
        .map(|(i, byte)| byte ^ key[i % 4])
        .collect();

    Ok(DecodedFrame {
        fin,
        opcode,
        text: String::from_utf8(payload)?,
        anomalies,
    })
}

/// Encode the status reply as a single unmasked text frame.
///
/// Only the single-byte length form is implemented on the send side, so the
/// status is limited to [`MAX_STATUS_LEN`] bytes; longer input is rejected
/// before it can corrupt the length field. Whether the known client would
/// accept extended lengths is unverified, so the cap stays.
pub fn encode_status_frame(status: &str) -> WsResult<Vec<u8>> {
    let payload = status.as_bytes();
    if payload.len() > MAX_STATUS_LEN {
        return Err(WsError::StatusTooLong(payload.len()));
    }

    let mut frame = Vec::with_capacity(2 + payload.len());
    frame.push(0x80 | OPCODE_TEXT); // FIN set, text opcode
    frame.push(payload.len() as u8);
    frame.extend_from_slice(payload);
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masked(payload: &[u8], key: [u8; 4]) -> Vec<u8> {
        let mut frame = vec![0x80 | OPCODE_TEXT, 0x80 | payload.len() as u8];
        frame.extend_from_slice(&key);
        frame.extend(payload.iter().enumerate().map(|(i, b)| b ^ key[i % 4]));
        frame
    }

    #[test]
    fn decodes_small_masked_frame() {
        let frame = masked(b"Hello", [0x37, 0xfa, 0x21, 0x3d]);
        let decoded = decode_text_frame(&frame).unwrap();
        assert!(decoded.fin);
        assert_eq!(decoded.opcode, OPCODE_TEXT);
        assert_eq!(decoded.text, "Hello");
        assert!(decoded.anomalies.is_empty());
    }

    #[test]
    fn zero_length_payload_is_an_anomaly_not_an_error() {
        let decoded = decode_text_frame(&[0x81, 0x80, 1, 2, 3, 4]).unwrap();
        assert_eq!(decoded.text, "");
        assert_eq!(decoded.anomalies, vec![FrameAnomaly::EmptyPayload]);
    }

    #[test]
    fn unmasked_frame_is_an_anomaly_not_an_error() {
        let decoded = decode_text_frame(&[0x81, 0x02, b'h', b'i']).unwrap();
        assert_eq!(decoded.text, "");
        assert_eq!(decoded.anomalies, vec![FrameAnomaly::Unmasked]);
    }

    #[test]
    fn truncated_payload_is_an_error() {
        let mut frame = masked(b"Hello", [1, 2, 3, 4]);
        frame.truncate(frame.len() - 2);
        assert!(matches!(
            decode_text_frame(&frame),
            Err(WsError::Truncated { .. })
        ));
    }

    #[test]
    fn truncated_header_is_an_error() {
        assert!(matches!(
            decode_text_frame(&[0x81]),
            Err(WsError::Truncated { .. })
        ));
    }

    #[test]
    fn status_frame_layout() {
        let frame = encode_status_frame("ok").unwrap();
        assert_eq!(frame, vec![0x81, 0x02, b'o', b'k']);
    }

    #[test]
    fn status_frame_rejects_oversized_payload() {
        let status = "x".repeat(MAX_STATUS_LEN + 1);
        assert!(matches!(
            encode_status_frame(&status),
            Err(WsError::StatusTooLong(126))
        ));
        assert!(encode_status_frame(&"x".repeat(MAX_STATUS_LEN)).is_ok());
    }
}
