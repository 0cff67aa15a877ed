/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! # FixLine
//!
//! A session-level FIX initiator client for Rust.
//!
//! FixLine opens a TCP connection to a counterparty, performs the Logon
//! handshake, keeps the session alive with periodic Heartbeat/TestRequest
//! exchange, and tears it down on Logout. It models no business messages:
//! the session layer is the product.
//!
//! ## Example
//!
//! ```no_run
//! use fixline::{CompId, Initiator, SessionConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> fixline::Result<()> {
//!     let config = SessionConfig::new(
//!         "127.0.0.1",
//!         5000,
//!         CompId::new("CLIENT").unwrap(),
//!         CompId::new("MINIFIX").unwrap(),
//!     )
//!     .with_heartbeat_interval(Duration::from_secs(30));
//!
//!     Initiator::new(config).start().await
//! }
//! ```
//!
//! ## Crates
//!
//! - [`fixline_core`]: errors, fields, message and value types
//! - [`fixline_tagvalue`]: tag=value encoding and decoding
//! - [`fixline_transport`]: TCP connector and frame codec
//! - [`fixline_session`]: configuration, state machine, clock, initiator

pub use fixline_core::{
    CompId, DecodeError, Field, FieldMap, FixError, MsgType, Result, SeqNum, SessionError,
    Timestamp, tags,
};
pub use fixline_session::{Initiator, SequenceManager, SessionConfig, SessionStatus, StateMachine};
pub use fixline_tagvalue::{Encoder, calculate_checksum, decode_fields};
pub use fixline_transport::{FrameCodec, connect};
