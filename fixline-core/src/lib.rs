/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! # FixLine Core
//!
//! Core types, fields, and error definitions for the FixLine session client.
//!
//! This crate provides the building blocks shared across the FixLine crates:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Field types**: Tag constants, `Field`, and the ordered `FieldMap`
//! - **Message types**: The `MsgType` session-level enumeration
//! - **Core types**: `SeqNum`, `CompId`, `Timestamp`

pub mod error;
pub mod field;
pub mod message;
pub mod types;

pub use error::{DecodeError, FixError, Result, SessionError};
pub use field::{Field, FieldMap, tags};
pub use message::MsgType;
pub use types::{CompId, SeqNum, Timestamp};
