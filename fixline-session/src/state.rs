/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! Session state machine.
//!
//! One instance per connection, never reused. The lifecycle is
//! `Disconnected → LogonSent → Active → LogoutPending → Disconnected`;
//! once a session has disconnected it is terminal and cannot be restarted.
//!
//! Inbound dispatch selects transitions at runtime, so the states are a
//! runtime enum rather than typestates; invalid transitions surface as
//! [`SessionError::InvalidState`].

use fixline_core::error::SessionError;
use parking_lot::Mutex;
use std::fmt;

/// Runtime session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No connection established.
    Disconnected,
    /// Logon message sent; the session turns Active without waiting for an
    /// acknowledgment.
    LogonSent,
    /// Session is established.
    Active,
    /// Logout received; teardown in progress.
    LogoutPending,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Disconnected => "Disconnected",
            Self::LogonSent => "LogonSent",
            Self::Active => "Active",
            Self::LogoutPending => "LogoutPending",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug)]
struct Inner {
    status: SessionStatus,
    terminated: bool,
}

/// Session state machine with runtime transition checking.
#[derive(Debug)]
pub struct StateMachine {
    inner: Mutex<Inner>,
}

impl StateMachine {
    /// Creates a new state machine in the Disconnected state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                status: SessionStatus::Disconnected,
                terminated: false,
            }),
        }
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.inner.lock().status
    }

    /// Returns true if the session has completed its lifecycle.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.inner.lock().terminated
    }

    /// Disconnected → LogonSent. Fails on a terminated or already-started
    /// session.
    ///
    /// # Errors
    /// Returns `SessionError::InvalidState` if the session is not a fresh
    /// Disconnected instance.
    pub fn begin_logon(&self) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        if inner.terminated || inner.status != SessionStatus::Disconnected {
            return Err(invalid(SessionStatus::Disconnected, inner.status));
        }
        inner.status = SessionStatus::LogonSent;
        Ok(())
    }

    /// LogonSent → Active, immediately after the Logon write completes.
    ///
    /// # Errors
    /// Returns `SessionError::InvalidState` if Logon was not sent first.
    pub fn activate(&self) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        if inner.status != SessionStatus::LogonSent {
            return Err(invalid(SessionStatus::LogonSent, inner.status));
        }
        inner.status = SessionStatus::Active;
        Ok(())
    }

    /// Active → LogoutPending, on an inbound Logout.
    ///
    /// # Errors
    /// Returns `SessionError::InvalidState` if the session is not Active.
    pub fn begin_logout(&self) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        if inner.status != SessionStatus::Active {
            return Err(invalid(SessionStatus::Active, inner.status));
        }
        inner.status = SessionStatus::LogoutPending;
        Ok(())
    }

    /// Any state → Disconnected, marking the session terminated.
    ///
    /// Used for both orderly teardown and transport failure; calling it on an
    /// already-disconnected session is a no-op.
    pub fn disconnect(&self) {
        let mut inner = self.inner.lock();
        inner.status = SessionStatus::Disconnected;
        inner.terminated = true;
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(expected: SessionStatus, current: SessionStatus) -> SessionError {
    SessionError::InvalidState {
        expected: expected.to_string(),
        current: current.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_lifecycle() {
        let sm = StateMachine::new();
        assert_eq!(sm.status(), SessionStatus::Disconnected);

        sm.begin_logon().unwrap();
        assert_eq!(sm.status(), SessionStatus::LogonSent);

        sm.activate().unwrap();
        assert_eq!(sm.status(), SessionStatus::Active);

        sm.begin_logout().unwrap();
        assert_eq!(sm.status(), SessionStatus::LogoutPending);

        sm.disconnect();
        assert_eq!(sm.status(), SessionStatus::Disconnected);
        assert!(sm.is_terminated());
    }

    #[test]
    fn test_session_not_reusable() {
        let sm = StateMachine::new();
        sm.begin_logon().unwrap();
        sm.disconnect();

        assert!(sm.begin_logon().is_err());
    }

    #[test]
    fn test_invalid_transitions() {
        let sm = StateMachine::new();
        assert!(sm.activate().is_err());
        assert!(sm.begin_logout().is_err());

        sm.begin_logon().unwrap();
        assert!(sm.begin_logon().is_err());
        assert!(sm.begin_logout().is_err());
    }

    #[test]
    fn test_disconnect_idempotent() {
        let sm = StateMachine::new();
        sm.begin_logon().unwrap();
        sm.disconnect();
        sm.disconnect();
        assert_eq!(sm.status(), SessionStatus::Disconnected);
        assert!(sm.is_terminated());
    }

    #[test]
    fn test_transport_failure_while_active() {
        let sm = StateMachine::new();
        sm.begin_logon().unwrap();
        sm.activate().unwrap();

        // Fatal write error skips LogoutPending entirely.
        sm.disconnect();
        assert_eq!(sm.status(), SessionStatus::Disconnected);
        assert!(sm.is_terminated());
    }
}
