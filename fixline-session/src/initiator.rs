/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! The session initiator engine.
//!
//! [`Initiator::start`] connects the transport, sends Logon, arms the session
//! clock, and runs the inbound read loop until the session terminates on an
//! inbound Logout or a fatal I/O error. There is no reconnect and no resend:
//! any transport failure tears the session down immediately.
//!
//! Every outbound message goes through one critical section spanning compose,
//! write, and sequence increment, so concurrent senders (both timers plus
//! inbound-triggered replies) can never produce colliding or out-of-order
//! sequence numbers. The sequence is advanced only after a successful write.

use bytes::BytesMut;
use fixline_core::error::{Result, SessionError};
use fixline_core::field::tags;
use fixline_core::{FieldMap, MsgType, SeqNum, Timestamp};
use fixline_tagvalue::{Encoder, decode_fields};
use fixline_transport::{FrameCodec, connect};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::Mutex;
use tokio_util::codec::Decoder as _;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::clock::SessionClock;
use crate::config::SessionConfig;
use crate::sequence::SequenceManager;
use crate::state::{SessionStatus, StateMachine};

/// Shared session engine state.
pub(crate) struct SessionCore {
    pub(crate) config: SessionConfig,
    pub(crate) state: StateMachine,
    pub(crate) sequence: SequenceManager,
    /// Write side of the transport; `None` before connect and after teardown.
    outbound: Mutex<Option<OwnedWriteHalf>>,
    /// Cancels the clock tasks and wakes the read loop on teardown.
    pub(crate) cancel: CancellationToken,
    /// Cleared exactly once at teardown; checked by late timer firings.
    running: AtomicBool,
}

impl SessionCore {
    /// Returns true while the session has not started teardown.
    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Sends one session message through the guarded outbound path.
    ///
    /// The lock spans compose, write, and sequence increment. Callers racing
    /// past teardown get a connection error.
    pub(crate) async fn send_message(
        &self,
        msg_type: MsgType,
        extra: &[(u32, &str)],
    ) -> Result<()> {
        let mut guard = self.outbound.lock().await;
        let Some(writer) = guard.as_mut() else {
            return Err(SessionError::Connection("transport closed".to_string()).into());
        };

        let seq = self.sequence.peek();
        let frame = self.compose(msg_type, seq, extra);
        writer.write_all(&frame).await?;
        self.sequence.advance();

        trace!(%msg_type, seq = seq.value(), "message sent");
        Ok(())
    }

    /// Composes a full wire message with the standard header fields.
    fn compose(&self, msg_type: MsgType, seq: SeqNum, extra: &[(u32, &str)]) -> BytesMut {
        let mut encoder = Encoder::new(&self.config.begin_string);
        encoder.put_str(tags::MSG_TYPE, msg_type.as_str());
        encoder.put_str(tags::SENDER_COMP_ID, self.config.sender_comp_id.as_str());
        encoder.put_str(tags::TARGET_COMP_ID, self.config.target_comp_id.as_str());
        encoder.put_uint(tags::MSG_SEQ_NUM, seq.value());
        encoder.put_str(
            tags::SENDING_TIME,
            Timestamp::now().format_seconds().as_str(),
        );
        for (tag, value) in extra {
            encoder.put_str(*tag, value);
        }
        encoder.finish()
    }

    pub(crate) async fn send_logon(&self) -> Result<()> {
        let heartbeat_secs = self.config.heartbeat_interval_secs().to_string();
        self.send_message(
            MsgType::Logon,
            &[
                (tags::ENCRYPT_METHOD, "0"),
                (tags::HEART_BT_INT, &heartbeat_secs),
            ],
        )
        .await
    }

    pub(crate) async fn send_heartbeat(&self, test_req_id: Option<&str>) -> Result<()> {
        match test_req_id {
            Some(id) => {
                self.send_message(MsgType::Heartbeat, &[(tags::TEST_REQ_ID, id)])
                    .await
            }
            None => self.send_message(MsgType::Heartbeat, &[]).await,
        }
    }

    pub(crate) async fn send_test_request(&self, test_req_id: &str) -> Result<()> {
        self.send_message(MsgType::TestRequest, &[(tags::TEST_REQ_ID, test_req_id)])
            .await
    }

    /// Tears the session down exactly once: clears the running flag, cancels
    /// both clock tasks, and closes the transport. Later calls are no-ops.
    pub(crate) async fn shutdown(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        self.cancel.cancel();
        self.state.disconnect();

        if let Some(mut writer) = self.outbound.lock().await.take()
            && let Err(err) = writer.shutdown().await
        {
            debug!(%err, "transport close failed");
        }
        info!("session terminated");
    }
}

/// A single-session FIX initiator.
///
/// Cheap to clone; all clones share one session. A session runs once and is
/// never reused after termination.
#[derive(Clone)]
pub struct Initiator {
    core: Arc<SessionCore>,
}

impl Initiator {
    /// Creates a new initiator for the given configuration.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            core: Arc::new(SessionCore {
                config,
                state: StateMachine::new(),
                sequence: SequenceManager::new(),
                outbound: Mutex::new(None),
                cancel: CancellationToken::new(),
                running: AtomicBool::new(false),
            }),
        }
    }

    /// Runs the session until termination.
    ///
    /// Connects the transport, sends Logon, transitions to Active immediately
    /// (no acknowledgment wait), starts both timers, and processes inbound
    /// messages until an inbound Logout, peer close, or fatal I/O error.
    ///
    /// # Errors
    /// Returns the connect, decode, or I/O error that terminated the session.
    /// An orderly Logout returns `Ok(())`.
    pub async fn start(&self) -> Result<()> {
        let core = &self.core;
        core.state.begin_logon()?;
        core.running.store(true, Ordering::SeqCst);

        let stream = match connect(&core.config.host, core.config.port).await {
            Ok(stream) => stream,
            Err(err) => {
                core.shutdown().await;
                return Err(err.into());
            }
        };
        let (reader, writer) = stream.into_split();
        *core.outbound.lock().await = Some(writer);

        if let Err(err) = core.send_logon().await {
            warn!(%err, "logon send failed");
            core.shutdown().await;
            return Err(err);
        }
        core.state.activate()?;
        info!(
            sender = %core.config.sender_comp_id,
            target = %core.config.target_comp_id,
            heartbeat_secs = core.config.heartbeat_interval_secs(),
            "logon sent, session active"
        );

        let clock = SessionClock::start(core);

        let result = self.read_loop(reader).await;
        core.shutdown().await;
        if !clock.is_stopped() {
            trace!("clock tasks draining after cancellation");
        }
        result
    }

    /// Reads and dispatches inbound frames until the session ends.
    async fn read_loop(&self, mut reader: OwnedReadHalf) -> Result<()> {
        let core = &self.core;
        let mut codec = FrameCodec::new()
            .with_max_frame_size(core.config.max_frame_size)
            .with_checksum_validation(core.config.validate_checksum);
        let mut buf = BytesMut::with_capacity(4096);

        loop {
            while let Some(frame) = codec.decode(&mut buf)? {
                let fields = decode_fields(&frame);
                if !self.dispatch(&fields).await? {
                    return Ok(());
                }
            }

            tokio::select! {
                _ = core.cancel.cancelled() => return Ok(()),
                read = reader.read_buf(&mut buf) => {
                    if read? == 0 {
                        debug!("peer closed connection");
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Handles one inbound message. Returns `Ok(false)` when the session
    /// should stop.
    async fn dispatch(&self, fields: &FieldMap) -> Result<bool> {
        let core = &self.core;
        let Some(msg_type) = fields.msg_type() else {
            debug!(
                msg_type = fields.get(tags::MSG_TYPE).unwrap_or("<missing>"),
                "ignoring message with unhandled type"
            );
            return Ok(true);
        };

        match msg_type {
            MsgType::Heartbeat => {
                trace!(seq = fields.seq_num(), "heartbeat received");
            }
            MsgType::TestRequest => {
                // Reply immediately, echoing the request identifier.
                core.send_heartbeat(fields.test_req_id()).await?;
            }
            MsgType::Logout => {
                info!(seq = fields.seq_num(), "logout received");
                core.state.begin_logout()?;
                return Ok(false);
            }
            MsgType::ResendRequest | MsgType::Reject => {
                // Recovery handling is out of scope; observed only.
                debug!(%msg_type, seq = fields.seq_num(), "recovery message observed");
            }
            MsgType::Logon => {
                debug!(seq = fields.seq_num(), "counterparty logon observed");
            }
        }
        Ok(true)
    }

    /// Sends a Heartbeat outside the timer schedule, optionally carrying a
    /// TestReqID. Shares the guarded outbound path with the timers.
    ///
    /// # Errors
    /// Returns a connection error after teardown, or the write error.
    pub async fn send_heartbeat(&self, test_req_id: Option<&str>) -> Result<()> {
        self.core.send_heartbeat(test_req_id).await
    }

    /// Returns the current session status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.core.state.status()
    }

    /// Returns true while the session has not started teardown.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.core.is_running()
    }

    /// Returns the next outbound sequence number.
    #[must_use]
    pub fn next_seq(&self) -> SeqNum {
        self.core.sequence.peek()
    }
}

impl std::fmt::Debug for Initiator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Initiator")
            .field("status", &self.core.state.status())
            .field("running", &self.core.is_running())
            .field("next_seq", &self.core.sequence.peek())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixline_core::CompId;

    fn test_config() -> SessionConfig {
        SessionConfig::new(
            "127.0.0.1",
            0,
            CompId::new("CLIENT").unwrap(),
            CompId::new("SERVER").unwrap(),
        )
    }

    #[test]
    fn test_new_initiator_is_idle() {
        let initiator = Initiator::new(test_config());
        assert_eq!(initiator.status(), SessionStatus::Disconnected);
        assert!(!initiator.is_running());
        assert_eq!(initiator.next_seq().value(), 1);
    }

    #[tokio::test]
    async fn test_send_before_start_fails() {
        let initiator = Initiator::new(test_config());
        assert!(initiator.send_heartbeat(None).await.is_err());
    }

    #[tokio::test]
    async fn test_start_connect_failure_terminates() {
        // Port 0 is not connectable; start must fail and mark the
        // session terminated.
        let initiator = Initiator::new(test_config());
        assert!(initiator.start().await.is_err());
        assert!(!initiator.is_running());
        assert_eq!(initiator.status(), SessionStatus::Disconnected);

        // Terminal: a second start is rejected.
        assert!(initiator.start().await.is_err());
    }
}
