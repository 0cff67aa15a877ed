/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! Error types for the FixLine session client.
//!
//! This module provides a unified error hierarchy using `thiserror` for typed,
//! domain-specific errors across all FixLine operations.
//!
//! Transport failures are fatal and terminate the session. Malformed field
//! pairs inside an otherwise well-framed message are recovered locally by the
//! tag=value decoder and never surface here.

use thiserror::Error;

/// Result type alias using [`FixError`] as the error type.
pub type Result<T> = std::result::Result<T, FixError>;

/// Top-level error type for all FixLine operations.
#[derive(Debug, Error)]
pub enum FixError {
    /// Error while framing or decoding an inbound message.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error in session layer operations.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// I/O error from the underlying transport.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while framing or decoding inbound messages.
///
/// These are structural failures of a whole frame. There is no
/// resynchronization machinery, so the read loop treats them as fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Invalid BeginString field (tag 8).
    #[error("invalid begin string: message must start with 8=")]
    InvalidBeginString,

    /// Missing BodyLength field (tag 9).
    #[error("missing body length field (tag 9)")]
    MissingBodyLength,

    /// Invalid BodyLength value.
    #[error("invalid body length value")]
    InvalidBodyLength,

    /// Checksum mismatch between calculated and declared values.
    #[error("checksum mismatch: calculated {calculated}, declared {declared}")]
    ChecksumMismatch {
        /// Calculated checksum value.
        calculated: u8,
        /// Declared checksum value in the message.
        declared: u8,
    },

    /// Frame exceeds the maximum allowed size.
    #[error("frame too large: {size} bytes exceeds maximum {max_size}")]
    FrameTooLarge {
        /// Actual frame size in bytes.
        size: usize,
        /// Maximum allowed size in bytes.
        max_size: usize,
    },

    /// Invalid UTF-8 in a field value.
    #[error("invalid utf-8 in field: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// I/O error surfaced through the framing codec.
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Errors in session layer operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session is not in the correct state for the operation.
    #[error("invalid session state: expected {expected}, current {current}")]
    InvalidState {
        /// Expected state for the operation.
        expected: String,
        /// Current session state.
        current: String,
    },

    /// Connection establishment or teardown failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// Session configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::ChecksumMismatch {
            calculated: 100,
            declared: 200,
        };
        assert_eq!(
            err.to_string(),
            "checksum mismatch: calculated 100, declared 200"
        );
    }

    #[test]
    fn test_fix_error_from_decode() {
        let decode_err = DecodeError::InvalidBeginString;
        let fix_err: FixError = decode_err.into();
        assert!(matches!(
            fix_err,
            FixError::Decode(DecodeError::InvalidBeginString)
        ));
    }

    #[test]
    fn test_session_error_display() {
        let err = SessionError::InvalidState {
            expected: "Disconnected".to_string(),
            current: "Active".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid session state: expected Disconnected, current Active"
        );
    }

    #[test]
    fn test_decode_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err: DecodeError = io_err.into();
        assert!(matches!(err, DecodeError::Io(_)));
    }
}
