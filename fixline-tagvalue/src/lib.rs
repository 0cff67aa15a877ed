/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! # FixLine Tag-Value
//!
//! FIX tag=value encoding and decoding for the FixLine session client.
//!
//! This crate provides serialization of outbound session messages and parsing
//! of inbound frames using the standard tag=value format with SOH (0x01)
//! delimiters.
//!
//! ## Features
//!
//! - **Encoder**: Assembles header, body, body length, and checksum
//! - **Decoder**: Turns a raw frame into an ordered [`fixline_core::FieldMap`]
//! - **Checksum**: Modulo-256 checksum computation and formatting

pub mod checksum;
pub mod decoder;
pub mod encoder;

pub use checksum::{calculate_checksum, format_checksum, parse_checksum};
pub use decoder::decode_fields;
pub use encoder::{Encoder, SOH};
