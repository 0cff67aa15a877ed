/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! Tokio codec for FIX message framing.
//!
//! Frames are located deterministically from the declared BodyLength (tag 9):
//! the trailer `10=XXX<SOH>` starts exactly BodyLength bytes after the end of
//! the BodyLength field. This avoids scanning field values for a literal
//! checksum-tag pattern, which could close a frame early.
//!
//! Structural violations (bad BeginString, unparsable or misaligned
//! BodyLength, checksum mismatch) are fatal to the read loop; there is no
//! resynchronization. The frame size limit applies to incomplete input too:
//! a buffer that outgrows it without yielding a complete header is rejected
//! rather than accumulated.

use bytes::BytesMut;
use fixline_core::error::DecodeError;
use memchr::memchr;
use tokio_util::codec::Decoder;

/// SOH delimiter.
const SOH: u8 = 0x01;

/// Length of the `10=XXX<SOH>` trailer in bytes.
const TRAILER_LEN: usize = 7;

/// Tokio codec extracting whole FIX frames from a byte stream.
#[derive(Debug, Clone)]
pub struct FrameCodec {
    /// Maximum frame size in bytes.
    max_frame_size: usize,
    /// Whether to verify the trailing checksum of each frame.
    validate_checksum: bool,
}

impl FrameCodec {
    /// Creates a new codec with default settings (64 KiB frames, checksum on).
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_frame_size: 64 * 1024,
            validate_checksum: true,
        }
    }

    /// Sets the maximum frame size.
    #[must_use]
    pub const fn with_max_frame_size(mut self, size: usize) -> Self {
        self.max_frame_size = size;
        self
    }

    /// Sets whether to verify the trailing checksum.
    #[must_use]
    pub const fn with_checksum_validation(mut self, validate: bool) -> Self {
        self.validate_checksum = validate;
        self
    }

    /// Waits for more bytes, unless the buffer has already outgrown the
    /// frame limit without yielding a complete header.
    fn incomplete(&self, src: &BytesMut) -> Result<Option<BytesMut>, DecodeError> {
        if src.len() > self.max_frame_size {
            return Err(DecodeError::FrameTooLarge {
                size: src.len(),
                max_size: self.max_frame_size,
            });
        }
        Ok(None)
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for FrameCodec {
    type Item = BytesMut;
    type Error = DecodeError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // BeginString must open the frame.
        if src.len() < 2 {
            return self.incomplete(src);
        }
        if &src[0..2] != b"8=" {
            return Err(DecodeError::InvalidBeginString);
        }

        let Some(first_soh) = memchr(SOH, src) else {
            return self.incomplete(src);
        };

        // BodyLength must follow immediately.
        let len_field = first_soh + 1;
        if src.len() < len_field + 2 {
            return self.incomplete(src);
        }
        if &src[len_field..len_field + 2] != b"9=" {
            return Err(DecodeError::MissingBodyLength);
        }

        let Some(len_soh) = memchr(SOH, &src[len_field..]).map(|p| len_field + p) else {
            return self.incomplete(src);
        };
        let body_length = parse_body_length(&src[len_field + 2..len_soh])?;

        // BodyLength counts from after 9=N<SOH> up to the 10= trailer.
        let total_length = len_soh + 1 + body_length + TRAILER_LEN;
        if total_length > self.max_frame_size {
            return Err(DecodeError::FrameTooLarge {
                size: total_length,
                max_size: self.max_frame_size,
            });
        }

        if src.len() < total_length {
            src.reserve(total_length - src.len());
            return Ok(None);
        }

        // The declared length must land exactly on the trailer.
        let trailer = total_length - TRAILER_LEN;
        if &src[trailer..trailer + 3] != b"10=" || src[total_length - 1] != SOH {
            return Err(DecodeError::InvalidBodyLength);
        }

        if self.validate_checksum {
            verify_checksum(&src[..total_length], trailer)?;
        }

        Ok(Some(src.split_to(total_length)))
    }
}

/// Parses the BodyLength digits.
fn parse_body_length(bytes: &[u8]) -> Result<usize, DecodeError> {
    if bytes.is_empty() || bytes.len() > 9 {
        return Err(DecodeError::InvalidBodyLength);
    }
    let mut value: usize = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return Err(DecodeError::InvalidBodyLength);
        }
        value = value * 10 + (b - b'0') as usize;
    }
    Ok(value)
}

/// Verifies the declared trailer checksum against the preceding bytes.
fn verify_checksum(frame: &[u8], trailer: usize) -> Result<(), DecodeError> {
    let declared = parse_checksum_digits(&frame[trailer + 3..trailer + 6])
        .ok_or(DecodeError::InvalidBodyLength)?;
    let calculated = frame[..trailer]
        .iter()
        .fold(0u8, |acc, &b| acc.wrapping_add(b));

    if calculated != declared {
        return Err(DecodeError::ChecksumMismatch {
            calculated,
            declared,
        });
    }
    Ok(())
}

fn parse_checksum_digits(bytes: &[u8]) -> Option<u8> {
    let [d0, d1, d2] = *bytes else { return None };
    if !d0.is_ascii_digit() || !d1.is_ascii_digit() || !d2.is_ascii_digit() {
        return None;
    }
    let value = (d0 - b'0') as u16 * 100 + (d1 - b'0') as u16 * 10 + (d2 - b'0') as u16;
    u8::try_from(value).ok()
}
