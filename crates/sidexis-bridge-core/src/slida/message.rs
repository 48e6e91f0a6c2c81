//! Binary token message layout.
//!
//! One message on the wire:
//!
//! ```text
//! ┌────────────┬────────┬──────┬─────────────────────────┬──────┐
//! │ length u16 │ token  │ 0x00 │ field bytes 0x00 ...    │ \r\n │
//! │ little-end │ letter │      │ (one 0x00 per field)    │      │
//! └────────────┴────────┴──────┴─────────────────────────┴──────┘
//! ```
//!
//! The leading length counts every byte of the message, header through
//! terminator inclusive.

/// Fixed overhead around the fields: length word, token header, CRLF.
const ENVELOPE_LEN: usize = 6;

/// Encode one token message for the mailslot.
///
/// Fields are expected to be normalized already; each is written as its
/// UTF-8 bytes followed by a null terminator.
pub fn encode_message(token: char, fields: &[String]) -> Vec<u8> {
    let total = ENVELOPE_LEN + fields.iter().map(|f| f.len() + 1).sum::<usize>();
    debug_assert!(total <= usize::from(u16::MAX), "message exceeds u16 length");

    let mut message = Vec::with_capacity(total);
    message.extend_from_slice(&(total as u16).to_le_bytes());
    message.push(token as u8);
    message.push(0);
    for field in fields {
        message.extend_from_slice(field.as_bytes());
        message.push(0);
    }
    message.extend_from_slice(b"\r\n");
    message
}
