/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! FIX message encoder.
//!
//! The encoder collects body fields in tag=value format and, on
//! [`Encoder::finish`], prepends BeginString (8) and BodyLength (9) and
//! appends CheckSum (10). BodyLength is the exact byte length of the segment
//! between the BodyLength field and the CheckSum field, trailing delimiters
//! included; the checksum covers every byte preceding the checksum field.
//!
//! Values are assumed to be pre-stringified by the caller. The encoder
//! performs no field validation.

use crate::checksum::{calculate_checksum, format_checksum};
use bytes::{BufMut, BytesMut};

/// SOH (Start of Header) delimiter used in FIX messages.
pub const SOH: u8 = 0x01;

/// FIX message encoder.
///
/// Body fields are appended in caller order, message type first by
/// convention.
#[derive(Debug)]
pub struct Encoder<'a> {
    /// Buffer for the message body (between BodyLength and CheckSum).
    body: BytesMut,
    /// The BeginString value (e.g., "FIX.4.2").
    begin_string: &'a str,
}

impl<'a> Encoder<'a> {
    /// Creates a new encoder with the specified BeginString.
    #[must_use]
    pub fn new(begin_string: &'a str) -> Self {
        Self {
            body: BytesMut::with_capacity(256),
            begin_string,
        }
    }

    /// Appends a field with a string value.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `value` - The field value
    #[inline]
    pub fn put_str(&mut self, tag: u32, value: &str) {
        self.put_raw(tag, value.as_bytes());
    }

    /// Appends a field with an unsigned integer value.
    #[inline]
    pub fn put_uint(&mut self, tag: u32, value: u64) {
        let mut buf = itoa::Buffer::new();
        self.put_raw(tag, buf.format(value).as_bytes());
    }

    /// Appends a field with raw bytes.
    #[inline]
    pub fn put_raw(&mut self, tag: u32, value: &[u8]) {
        let mut tag_buf = itoa::Buffer::new();
        self.body.put_slice(tag_buf.format(tag).as_bytes());
        self.body.put_u8(b'=');
        self.body.put_slice(value);
        self.body.put_u8(SOH);
    }

    /// Finalizes the message and returns the complete encoded bytes.
    #[must_use]
    pub fn finish(self) -> BytesMut {
        let mut message = BytesMut::with_capacity(self.body.len() + 32);

        message.put_slice(b"8=");
        message.put_slice(self.begin_string.as_bytes());
        message.put_u8(SOH);

        message.put_slice(b"9=");
        let mut len_buf = itoa::Buffer::new();
        message.put_slice(len_buf.format(self.body.len()).as_bytes());
        message.put_u8(SOH);

        message.put_slice(&self.body);

        let checksum = calculate_checksum(&message);
        message.put_slice(b"10=");
        message.put_slice(&format_checksum(checksum));
        message.put_u8(SOH);

        message
    }

    /// Returns the current body length in bytes.
    #[inline]
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::parse_checksum;

    #[test]
    fn test_encoder_layout() {
        let mut encoder = Encoder::new("FIX.4.2");
        encoder.put_str(35, "0");

        let message = encoder.finish();
        let msg_str = String::from_utf8_lossy(&message);

        assert!(msg_str.starts_with("8=FIX.4.2\x019="));
        assert!(msg_str.contains("35=0\x01"));
        assert!(msg_str.ends_with('\x01'));
    }

    #[test]
    fn test_encoder_body_length_exact() {
        let mut encoder = Encoder::new("FIX.4.2");
        encoder.put_str(35, "A");
        encoder.put_str(49, "SENDER");
        let body_len = encoder.body_len();

        let message = encoder.finish();
        let msg_str = String::from_utf8_lossy(&message);

        // BodyLength covers exactly the bytes between 9=N<SOH> and 10=.
        let declared: usize = msg_str
            .split('\x01')
            .find_map(|s| s.strip_prefix("9="))
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(declared, body_len);

        let body_start = msg_str.find(&format!("9={declared}\x01")).unwrap()
            + format!("9={declared}\x01").len();
        let body_end = msg_str.find("10=").unwrap();
        assert_eq!(body_end - body_start, declared);
    }

    #[test]
    fn test_encoder_checksum_matches() {
        let mut encoder = Encoder::new("FIX.4.2");
        encoder.put_str(35, "A");
        encoder.put_uint(34, 1);

        let message = encoder.finish();

        // Trailer is 10=XXX<SOH>, 7 bytes.
        let trailer_start = message.len() - 7;
        assert_eq!(&message[trailer_start..trailer_start + 3], b"10=");
        let declared = parse_checksum(&message[trailer_start + 3..trailer_start + 6]).unwrap();
        assert_eq!(calculate_checksum(&message[..trailer_start]), declared);
        assert_eq!(message[message.len() - 1], SOH);
    }

    #[test]
    fn test_encoder_field_order() {
        let mut encoder = Encoder::new("FIX.4.2");
        encoder.put_str(35, "A");
        encoder.put_str(49, "SENDER");
        encoder.put_str(56, "TARGET");
        encoder.put_uint(34, 1);

        let message = encoder.finish();
        let msg_str = String::from_utf8_lossy(&message);

        let p35 = msg_str.find("35=").unwrap();
        let p49 = msg_str.find("49=").unwrap();
        let p56 = msg_str.find("56=").unwrap();
        let p34 = msg_str.find("34=").unwrap();
        assert!(p35 < p49 && p49 < p56 && p56 < p34);
    }
}
