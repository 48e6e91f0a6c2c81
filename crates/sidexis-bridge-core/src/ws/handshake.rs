//! WebSocket upgrade handshake.

use base64::prelude::*;
use sha1::{Digest, Sha1};

use super::{WsError, WsResult};

/// Protocol GUID appended to the client key (RFC 6455 section 4.2.2).
const WEBSOCKET_GUID: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// True when the raw bytes look like the start of an HTTP GET, i.e. an
/// upgrade request rather than a data frame.
pub fn is_upgrade_request(text: &str) -> bool {
    text.as_bytes()
        .get(..3)
        .is_some_and(|start| start.eq_ignore_ascii_case(b"GET"))
}

/// Compute the Sec-WebSocket-Accept value for a client key.
pub fn accept_key(key: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(key.as_bytes());
    hasher.update(WEBSOCKET_GUID.as_bytes());
    BASE64_STANDARD.encode(hasher.finalize())
}

/// Extract the client key from the request headers. First match wins.
fn client_key(request: &str) -> Option<&str> {
    request.lines().find_map(|line| {
        let (header, value) = line.split_once(':')?;
        header
            .trim()
            .eq_ignore_ascii_case("sec-websocket-key")
            .then(|| value.trim())
    })
}

/// Build the `101 Switching Protocols` response for an upgrade request.
///
/// A request without a `Sec-WebSocket-Key` header cannot produce a valid
/// accept value and fails with [`WsError::MissingKey`]; no response with an
/// empty accept value is ever emitted.
pub fn upgrade_response(request: &str) -> WsResult<Vec<u8>> {
    let key = client_key(request).ok_or(WsError::MissingKey)?;
    let response = format!(
        "HTTP/1.1 101 Switching Protocols\r\n\
         Connection: Upgrade\r\n\
         Upgrade: websocket\r\n\
         Sec-WebSocket-Accept: {}\r\n\r\n",
        accept_key(key)
    );
    Ok(response.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sample key/accept pair from RFC 6455 section 1.3.
    const SAMPLE_KEY: &str = "dGhlIHNhbXBsZSBub25jZQ==";
    const SAMPLE_ACCEPT: &str = "s3pPLMBiTxaQ9kYGzzhZRbK+xOo=";

    fn sample_request() -> String {
        format!(
            "GET /chat HTTP/1.1\r\n\
             Host: 127.0.0.1:37319\r\n\
             Upgrade: websocket\r\n\
             Connection: Upgrade\r\n\
             Sec-WebSocket-Key: {SAMPLE_KEY}\r\n\
             Sec-WebSocket-Version: 13\r\n\r\n"
        )
    }

    #[test]
    fn accept_key_matches_rfc_vector() {
        assert_eq!(accept_key(SAMPLE_KEY), SAMPLE_ACCEPT);
    }

    #[test]
    fn upgrade_response_carries_accept_value() {
        let response = upgrade_response(&sample_request()).unwrap();
        let text = String::from_utf8(response).unwrap();
        assert!(text.starts_with("HTTP/1.1 101 Switching Protocols\r\n"));
        assert!(text.contains("Connection: Upgrade\r\n"));
        assert!(text.contains("Upgrade: websocket\r\n"));
        assert!(text.contains(&format!("Sec-WebSocket-Accept: {SAMPLE_ACCEPT}\r\n")));
        assert!(text.ends_with("\r\n\r\n"));
    }

    #[test]
    fn missing_key_is_an_error() {
        let request = "GET / HTTP/1.1\r\nHost: localhost\r\n\r\n";
        assert!(matches!(
            upgrade_response(request),
            Err(WsError::MissingKey)
        ));
    }

    #[test]
    fn key_header_value_is_trimmed() {
        let request = format!("GET / HTTP/1.1\r\nSec-WebSocket-Key:   {SAMPLE_KEY}  \r\n\r\n");
        let text = String::from_utf8(upgrade_response(&request).unwrap()).unwrap();
        assert!(text.contains(SAMPLE_ACCEPT));
    }

    #[test]
    fn upgrade_sniff_is_case_insensitive() {
        assert!(is_upgrade_request("GET / HTTP/1.1\r\n"));
        assert!(is_upgrade_request("get / HTTP/1.1\r\n"));
        assert!(!is_upgrade_request("PO"));
        assert!(!is_upgrade_request("\u{81}\u{85}junk"));
    }
}
