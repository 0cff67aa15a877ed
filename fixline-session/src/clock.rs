/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! The session clock.
//!
//! Two independent periodic tasks, armed only after Logon is sent: a
//! Heartbeat every heartbeat interval and a TestRequest with a fresh
//! identifier every half interval. TestRequests are emitted on schedule
//! whether or not the counterparty ever answers; the clock does not itself
//! detect an unresponsive peer.
//!
//! Both tasks stop on the session's cancellation token. A firing that races
//! past cancellation checks the running flag and becomes a no-op. A write
//! failure inside either task tears the session down.

use crate::initiator::SessionCore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::warn;

/// Handle to the two periodic session tasks.
///
/// The tasks are owned by the runtime and exit on cancellation; the handles
/// are kept only so the clock can report whether it has wound down.
#[derive(Debug)]
pub(crate) struct SessionClock {
    heartbeat: JoinHandle<()>,
    test_request: JoinHandle<()>,
}

impl SessionClock {
    /// Arms both timers against the session core.
    pub(crate) fn start(core: &Arc<SessionCore>) -> Self {
        let heartbeat_period = core.config.heartbeat_interval;
        let test_request_period = core.config.test_request_interval();

        let heartbeat = {
            let core = Arc::clone(core);
            tokio::spawn(async move {
                run_timer(&core, heartbeat_period, |core| async move {
                    core.send_heartbeat(None).await
                })
                .await;
            })
        };

        let test_request = {
            let core = Arc::clone(core);
            tokio::spawn(async move {
                run_timer(&core, test_request_period, |core| async move {
                    core.send_test_request(&generate_test_req_id()).await
                })
                .await;
            })
        };

        Self {
            heartbeat,
            test_request,
        }
    }

    /// Returns true once both timer tasks have exited.
    pub(crate) fn is_stopped(&self) -> bool {
        self.heartbeat.is_finished() && self.test_request.is_finished()
    }
}

/// Drives one periodic send until cancellation or send failure.
async fn run_timer<F, Fut>(core: &Arc<SessionCore>, period: Duration, send: F)
where
    F: Fn(Arc<SessionCore>) -> Fut,
    Fut: Future<Output = fixline_core::Result<()>>,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; the schedule starts one
    // period after logon.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = core.cancel.cancelled() => return,
            _ = ticker.tick() => {
                if !core.is_running() {
                    return;
                }
                if let Err(err) = send(Arc::clone(core)).await {
                    warn!(%err, period_ms = period.as_millis() as u64, "periodic send failed");
                    core.shutdown().await;
                    return;
                }
            }
        }
    }
}

/// Generates a unique TestReqID from the current timestamp in nanoseconds.
#[must_use]
pub fn generate_test_req_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();

    format!("TEST{nanos}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_test_req_id_format() {
        let id = generate_test_req_id();
        assert!(id.starts_with("TEST"));
        assert!(id.len() > 4);
        assert!(id[4..].bytes().all(|b| b.is_ascii_digit()));
    }
}
