/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! Session configuration.
//!
//! Connection parameters, participant identifiers, and the heartbeat interval
//! are fixed at construction; a session is configured once and never
//! reconfigured.

use fixline_core::CompId;
use std::time::Duration;

/// Configuration for one initiating FIX session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Counterparty host name or address.
    pub host: String,
    /// Counterparty TCP port.
    pub port: u16,
    /// SenderCompID (tag 49).
    pub sender_comp_id: CompId,
    /// TargetCompID (tag 56).
    pub target_comp_id: CompId,
    /// Protocol version BeginString (e.g., "FIX.4.2").
    pub begin_string: String,
    /// Heartbeat interval (tag 108); TestRequests are emitted at half this.
    pub heartbeat_interval: Duration,
    /// Maximum inbound frame size in bytes.
    pub max_frame_size: usize,
    /// Whether to verify inbound frame checksums.
    pub validate_checksum: bool,
}

impl SessionConfig {
    /// Creates a new session configuration with required fields.
    ///
    /// # Arguments
    /// * `host` - Counterparty host
    /// * `port` - Counterparty port
    /// * `sender_comp_id` - The sender CompID
    /// * `target_comp_id` - The target CompID
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        port: u16,
        sender_comp_id: CompId,
        target_comp_id: CompId,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            sender_comp_id,
            target_comp_id,
            begin_string: "FIX.4.2".to_string(),
            heartbeat_interval: Duration::from_secs(30),
            max_frame_size: 64 * 1024,
            validate_checksum: true,
        }
    }

    /// Sets the BeginString.
    #[must_use]
    pub fn with_begin_string(mut self, begin_string: impl Into<String>) -> Self {
        self.begin_string = begin_string.into();
        self
    }

    /// Sets the heartbeat interval.
    #[must_use]
    pub const fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// Sets the maximum inbound frame size.
    #[must_use]
    pub const fn with_max_frame_size(mut self, size: usize) -> Self {
        self.max_frame_size = size;
        self
    }

    /// Sets whether to verify inbound frame checksums.
    #[must_use]
    pub const fn with_checksum_validation(mut self, validate: bool) -> Self {
        self.validate_checksum = validate;
        self
    }

    /// Returns the heartbeat interval in whole seconds, as carried in tag 108.
    #[must_use]
    pub fn heartbeat_interval_secs(&self) -> u64 {
        self.heartbeat_interval.as_secs()
    }

    /// Returns the TestRequest emission period (half the heartbeat interval).
    #[must_use]
    pub fn test_request_interval(&self) -> Duration {
        self.heartbeat_interval / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_new() {
        let config = SessionConfig::new(
            "127.0.0.1",
            5000,
            CompId::new("CLIENT").unwrap(),
            CompId::new("SERVER").unwrap(),
        );

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.sender_comp_id.as_str(), "CLIENT");
        assert_eq!(config.target_comp_id.as_str(), "SERVER");
        assert_eq!(config.begin_string, "FIX.4.2");
        assert_eq!(config.heartbeat_interval, Duration::from_secs(30));
        assert!(config.validate_checksum);
    }

    #[test]
    fn test_session_config_setters() {
        let config = SessionConfig::new(
            "fix.example.com",
            9876,
            CompId::new("CLIENT").unwrap(),
            CompId::new("SERVER").unwrap(),
        )
        .with_begin_string("FIX.4.4")
        .with_heartbeat_interval(Duration::from_secs(10))
        .with_max_frame_size(4096)
        .with_checksum_validation(false);

        assert_eq!(config.begin_string, "FIX.4.4");
        assert_eq!(config.heartbeat_interval_secs(), 10);
        assert_eq!(config.max_frame_size, 4096);
        assert!(!config.validate_checksum);
    }

    #[test]
    fn test_test_request_interval_is_half() {
        let config = SessionConfig::new(
            "127.0.0.1",
            5000,
            CompId::new("A").unwrap(),
            CompId::new("B").unwrap(),
        )
        .with_heartbeat_interval(Duration::from_secs(30));

        assert_eq!(config.test_request_interval(), Duration::from_secs(15));
    }
}
