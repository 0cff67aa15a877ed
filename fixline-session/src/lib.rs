/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! # FixLine Session
//!
//! Session layer for the FixLine initiator.
//!
//! This crate provides:
//! - **Configuration**: Explicit per-session connection parameters
//! - **State machine**: Runtime session FSM, one instance per connection
//! - **Sequence management**: Monotonic outbound sequence numbers
//! - **Session clock**: Periodic Heartbeat and TestRequest emission
//! - **Initiator**: The session engine driving handshake, liveness, and teardown

pub mod clock;
pub mod config;
pub mod initiator;
pub mod sequence;
pub mod state;

pub use config::SessionConfig;
pub use initiator::Initiator;
pub use sequence::SequenceManager;
pub use state::{SessionStatus, StateMachine};
