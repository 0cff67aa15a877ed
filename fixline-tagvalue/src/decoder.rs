/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! FIX frame decoder.
//!
//! Turns a raw delimited frame into an ordered [`FieldMap`]. The frame is
//! split on SOH; each segment is split on `=`. A segment that does not yield
//! exactly one integer tag and one value is dropped silently and the rest of
//! the message is still delivered. This is a documented quirk, not a
//! validation layer: a value that itself contains `=` is treated as
//! malformed and dropped.

use fixline_core::FieldMap;
use memchr::{memchr, memchr_iter};
use tracing::trace;

/// SOH (Start of Header) delimiter used in FIX messages.
const SOH: u8 = 0x01;

/// Equals sign separating tag and value.
const EQUALS: u8 = b'=';

/// Decodes a raw frame into an ordered field map.
///
/// Malformed segments are dropped; everything that parses is kept in wire
/// order. This never fails: a frame of garbage decodes to an empty map.
///
/// # Arguments
/// * `input` - The complete frame bytes, delimiters included
#[must_use]
pub fn decode_fields(input: &[u8]) -> FieldMap {
    let mut fields = FieldMap::new();
    let mut start = 0;

    for end in memchr_iter(SOH, input) {
        push_segment(&mut fields, &input[start..end]);
        start = end + 1;
    }
    // Trailing bytes without a final SOH still form a segment.
    if start < input.len() {
        push_segment(&mut fields, &input[start..]);
    }

    fields
}

/// Parses one tag=value segment, dropping it if malformed.
fn push_segment(fields: &mut FieldMap, segment: &[u8]) {
    if segment.is_empty() {
        return;
    }

    let Some(eq_pos) = memchr(EQUALS, segment) else {
        trace!(segment = %String::from_utf8_lossy(segment), "dropping segment without separator");
        return;
    };

    let (tag_bytes, rest) = (&segment[..eq_pos], &segment[eq_pos + 1..]);

    // Exactly one key and one value: a second separator disqualifies the pair.
    if memchr(EQUALS, rest).is_some() {
        trace!(segment = %String::from_utf8_lossy(segment), "dropping segment with extra separator");
        return;
    }

    let Some(tag) = parse_tag(tag_bytes) else {
        trace!(segment = %String::from_utf8_lossy(segment), "dropping segment with invalid tag");
        return;
    };

    let Ok(value) = std::str::from_utf8(rest) else {
        trace!(tag, "dropping segment with non-utf8 value");
        return;
    };

    fields.push(tag, value);
}

/// Parses a tag number from ASCII bytes.
#[inline]
fn parse_tag(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() || bytes.len() > 10 {
        return None;
    }

    let mut result: u32 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        result = result.checked_mul(10)?.checked_add((b - b'0') as u32)?;
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        assert_eq!(parse_tag(b"8"), Some(8));
        assert_eq!(parse_tag(b"35"), Some(35));
        assert_eq!(parse_tag(b"12345"), Some(12345));
        assert_eq!(parse_tag(b""), None);
        assert_eq!(parse_tag(b"abc"), None);
        assert_eq!(parse_tag(b"12a"), None);
    }

    #[test]
    fn test_decode_fields_basic() {
        let input = b"8=FIX.4.2\x019=20\x0135=0\x0149=CLIENT\x0110=123\x01";
        let fields = decode_fields(input);

        assert_eq!(fields.get(8), Some("FIX.4.2"));
        assert_eq!(fields.get(9), Some("20"));
        assert_eq!(fields.get(35), Some("0"));
        assert_eq!(fields.get(49), Some("CLIENT"));
        assert_eq!(fields.get(10), Some("123"));
        assert_eq!(fields.len(), 5);
    }

    #[test]
    fn test_decode_fields_preserves_wire_order() {
        let input = b"35=1\x01112=T1\x0134=2\x01";
        let fields = decode_fields(input);
        let tags: Vec<u32> = fields.iter().map(|f| f.tag).collect();
        assert_eq!(tags, vec![35, 112, 34]);
    }

    #[test]
    fn test_decode_fields_drops_malformed_pairs() {
        // No separator, bad tag, extra separator: all dropped, rest kept.
        let input = b"35=0\x01garbage\x01xx=1\x0158=a=b\x0134=9\x01";
        let fields = decode_fields(input);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get(35), Some("0"));
        assert_eq!(fields.get(34), Some("9"));
        assert_eq!(fields.get(58), None);
    }

    #[test]
    fn test_decode_fields_empty_value_kept() {
        let fields = decode_fields(b"112=\x01");
        assert_eq!(fields.get(112), Some(""));
    }

    #[test]
    fn test_decode_fields_trailing_segment_without_soh() {
        let fields = decode_fields(b"35=0\x0134=3");
        assert_eq!(fields.get(35), Some("0"));
        assert_eq!(fields.get(34), Some("3"));
    }

    #[test]
    fn test_decode_fields_garbage_yields_empty_map() {
        assert!(decode_fields(b"\x01\x01nonsense\x01").is_empty());
        assert!(decode_fields(b"").is_empty());
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        use crate::encoder::Encoder;

        let mut encoder = Encoder::new("FIX.4.2");
        encoder.put_str(35, "A");
        encoder.put_str(49, "SENDER");
        encoder.put_str(56, "TARGET");
        encoder.put_uint(34, 1);
        encoder.put_uint(108, 30);

        let message = encoder.finish();
        let fields = decode_fields(&message);

        assert_eq!(fields.get(8), Some("FIX.4.2"));
        assert_eq!(fields.get(35), Some("A"));
        assert_eq!(fields.get(49), Some("SENDER"));
        assert_eq!(fields.get(56), Some("TARGET"));
        assert_eq!(fields.get_u64(34), Some(1));
        assert_eq!(fields.get_u64(108), Some(30));
        assert!(fields.contains(10));
    }
}
