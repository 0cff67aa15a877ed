/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! # FixLine Transport
//!
//! TCP transport and frame codec for the FixLine session client.
//!
//! This crate provides:
//! - **Connector**: Outbound TCP connection with no-delay and keep-alive
//! - **Codec**: Tokio codec that frames messages on the declared BodyLength

pub mod codec;
pub mod connector;

pub use codec::FrameCodec;
pub use connector::connect;
