/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! FIX checksum calculation.
//!
//! The checksum (tag 10) is the sum of all bytes preceding the checksum field
//! modulo 256, formatted as a 3-digit zero-padded decimal string.

/// Calculates the FIX checksum for the given data.
///
/// # Arguments
/// * `data` - The message bytes to checksum (everything before the 10= field)
///
/// # Returns
/// The checksum value as a u8 (0-255).
#[inline]
#[must_use]
pub fn calculate_checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Formats a checksum value as 3 zero-padded ASCII digits.
///
/// # Arguments
/// * `checksum` - The checksum value (0-255)
#[inline]
#[must_use]
pub fn format_checksum(checksum: u8) -> [u8; 3] {
    [
        b'0' + (checksum / 100),
        b'0' + ((checksum / 10) % 10),
        b'0' + (checksum % 10),
    ]
}

/// Parses a 3-digit checksum string to a u8 value.
///
/// # Returns
/// `Some(checksum)` if the input is exactly 3 ASCII digits in [0, 255],
/// `None` otherwise.
#[inline]
#[must_use]
pub fn parse_checksum(bytes: &[u8]) -> Option<u8> {
    let [d0, d1, d2] = *bytes else {
        return None;
    };

    if !d0.is_ascii_digit() || !d1.is_ascii_digit() || !d2.is_ascii_digit() {
        return None;
    }

    let value = (d0 - b'0') as u16 * 100 + (d1 - b'0') as u16 * 10 + (d2 - b'0') as u16;
    u8::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_checksum_empty() {
        assert_eq!(calculate_checksum(b""), 0);
    }

    #[test]
    fn test_calculate_checksum_simple() {
        let expected = ((b'A' as u32 + b'B' as u32 + b'C' as u32) % 256) as u8;
        assert_eq!(calculate_checksum(b"ABC"), expected);
    }

    #[test]
    fn test_calculate_checksum_wraps() {
        let data = vec![255u8; 1000];
        let expected = ((255u32 * 1000) % 256) as u8;
        assert_eq!(calculate_checksum(&data), expected);
    }

    #[test]
    fn test_format_checksum() {
        assert_eq!(format_checksum(0), *b"000");
        assert_eq!(format_checksum(42), *b"042");
        assert_eq!(format_checksum(100), *b"100");
        assert_eq!(format_checksum(255), *b"255");
    }

    #[test]
    fn test_format_checksum_always_digits() {
        for i in 0..=255u8 {
            let formatted = format_checksum(i);
            assert!(formatted.iter().all(u8::is_ascii_digit));
        }
    }

    #[test]
    fn test_parse_checksum() {
        assert_eq!(parse_checksum(b"000"), Some(0));
        assert_eq!(parse_checksum(b"042"), Some(42));
        assert_eq!(parse_checksum(b"255"), Some(255));
    }

    #[test]
    fn test_parse_checksum_invalid() {
        assert_eq!(parse_checksum(b""), None);
        assert_eq!(parse_checksum(b"00"), None);
        assert_eq!(parse_checksum(b"0000"), None);
        assert_eq!(parse_checksum(b"abc"), None);
        assert_eq!(parse_checksum(b"12X"), None);
        assert_eq!(parse_checksum(b"300"), None);
    }

    #[test]
    fn test_roundtrip() {
        for i in 0..=255u8 {
            assert_eq!(parse_checksum(&format_checksum(i)), Some(i));
        }
    }
}
