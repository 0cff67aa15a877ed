/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! Session-level message types.
//!
//! FixLine only models the administrative messages a session initiator
//! exchanges. Anything else arriving on the wire is observed and ignored.

use crate::field::{FieldMap, tags};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Session-level FIX message types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MsgType {
    /// Heartbeat (0).
    Heartbeat,
    /// Test Request (1).
    TestRequest,
    /// Resend Request (2).
    ResendRequest,
    /// Reject (3).
    Reject,
    /// Logout (5).
    Logout,
    /// Logon (A).
    Logon,
}

impl MsgType {
    /// Returns the wire representation of this message type (tag 35 value).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heartbeat => "0",
            Self::TestRequest => "1",
            Self::ResendRequest => "2",
            Self::Reject => "3",
            Self::Logout => "5",
            Self::Logon => "A",
        }
    }

    /// Parses a tag 35 value into a message type.
    ///
    /// # Returns
    /// `None` for any type outside the session-level set.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "0" => Some(Self::Heartbeat),
            "1" => Some(Self::TestRequest),
            "2" => Some(Self::ResendRequest),
            "3" => Some(Self::Reject),
            "5" => Some(Self::Logout),
            "A" => Some(Self::Logon),
            _ => None,
        }
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FieldMap {
    /// Returns the message type (tag 35), if present and session-level.
    #[must_use]
    pub fn msg_type(&self) -> Option<MsgType> {
        self.get(tags::MSG_TYPE).and_then(MsgType::from_wire)
    }

    /// Returns the message sequence number (tag 34), if present.
    #[must_use]
    pub fn seq_num(&self) -> Option<u64> {
        self.get_u64(tags::MSG_SEQ_NUM)
    }

    /// Returns the test request identifier (tag 112), if present.
    #[must_use]
    pub fn test_req_id(&self) -> Option<&str> {
        self.get(tags::TEST_REQ_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msg_type_roundtrip() {
        for mt in [
            MsgType::Heartbeat,
            MsgType::TestRequest,
            MsgType::ResendRequest,
            MsgType::Reject,
            MsgType::Logout,
            MsgType::Logon,
        ] {
            assert_eq!(MsgType::from_wire(mt.as_str()), Some(mt));
        }
    }

    #[test]
    fn test_msg_type_unknown() {
        assert_eq!(MsgType::from_wire("D"), None);
        assert_eq!(MsgType::from_wire(""), None);
    }

    #[test]
    fn test_field_map_accessors() {
        let mut map = FieldMap::new();
        map.push(tags::MSG_TYPE, "1");
        map.push(tags::MSG_SEQ_NUM, "3");
        map.push(tags::TEST_REQ_ID, "X123");

        assert_eq!(map.msg_type(), Some(MsgType::TestRequest));
        assert_eq!(map.seq_num(), Some(3));
        assert_eq!(map.test_req_id(), Some("X123"));
    }

    #[test]
    fn test_field_map_missing_msg_type() {
        let map = FieldMap::new();
        assert_eq!(map.msg_type(), None);
        assert_eq!(map.seq_num(), None);
    }
}
