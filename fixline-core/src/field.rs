/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! Field types for FIX tag=value messages.
//!
//! This module provides:
//! - [`tags`]: Standard tag numbers used by the session layer
//! - [`Field`]: A single tag=value pair
//! - [`FieldMap`]: Insertion-ordered collection of fields for one message

use smallvec::SmallVec;
use std::fmt;

/// Standard FIX tag numbers used by the session layer.
pub mod tags {
    /// BeginString (8).
    pub const BEGIN_STRING: u32 = 8;
    /// BodyLength (9).
    pub const BODY_LENGTH: u32 = 9;
    /// CheckSum (10).
    pub const CHECK_SUM: u32 = 10;
    /// MsgSeqNum (34).
    pub const MSG_SEQ_NUM: u32 = 34;
    /// MsgType (35).
    pub const MSG_TYPE: u32 = 35;
    /// SenderCompID (49).
    pub const SENDER_COMP_ID: u32 = 49;
    /// SendingTime (52).
    pub const SENDING_TIME: u32 = 52;
    /// TargetCompID (56).
    pub const TARGET_COMP_ID: u32 = 56;
    /// EncryptMethod (98).
    pub const ENCRYPT_METHOD: u32 = 98;
    /// HeartBtInt (108).
    pub const HEART_BT_INT: u32 = 108;
    /// TestReqID (112).
    pub const TEST_REQ_ID: u32 = 112;
}

/// A single tag=value pair within a FIX message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// The field tag number.
    pub tag: u32,
    /// The field value.
    pub value: String,
}

impl Field {
    /// Creates a new field.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `value` - The field value
    #[must_use]
    pub fn new(tag: u32, value: impl Into<String>) -> Self {
        Self {
            tag,
            value: value.into(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag, self.value)
    }
}

/// Insertion-ordered tag=value collection for one message.
///
/// A `FieldMap` is built per outbound message and produced per inbound
/// message. It carries no identity beyond the message instance. Lookup scans
/// in insertion order; session messages hold a handful of fields, so the
/// smallvec stays inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    fields: SmallVec<[Field; 16]>,
}

impl FieldMap {
    /// Creates an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: SmallVec::new(),
        }
    }

    /// Appends a field, preserving insertion order.
    ///
    /// Duplicate tags are kept; [`FieldMap::get`] returns the first match.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `value` - The field value
    pub fn push(&mut self, tag: u32, value: impl Into<String>) {
        self.fields.push(Field::new(tag, value));
    }

    /// Returns the value of the first field with the given tag.
    #[must_use]
    pub fn get(&self, tag: u32) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.tag == tag)
            .map(|f| f.value.as_str())
    }

    /// Returns the value of the first field with the given tag, parsed as u64.
    #[must_use]
    pub fn get_u64(&self, tag: u32) -> Option<u64> {
        self.get(tag).and_then(|v| v.parse().ok())
    }

    /// Returns true if a field with the given tag is present.
    #[must_use]
    pub fn contains(&self, tag: u32) -> bool {
        self.fields.iter().any(|f| f.tag == tag)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the map holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }
}

impl FromIterator<(u32, String)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(tag, value)| Field { tag, value })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
