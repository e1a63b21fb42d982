//! BGP messages and relevant structs.

pub mod attributes;
pub mod community;
pub mod error;

pub use attributes::*;
pub use community::*;
pub use error::*;

use crate::models::network::*;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Length of the fixed BGP message header: 16-byte marker, 2-byte length and 1-byte type.
pub const BGP_HEADER_LEN: usize = 19;

#[derive(Debug, TryFromPrimitive, IntoPrimitive, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BgpMessageType {
    Open = 1,
    Update = 2,
    Notification = 3,
    KeepAlive = 4,
}

/// BGP UPDATE message body (everything after the 19-byte header).
///
/// ```text
/// +-----------------------------------------------------+
/// |   Withdrawn Routes Length (2 octets)                |
/// +-----------------------------------------------------+
/// |   Withdrawn Routes (variable)                       |
/// +-----------------------------------------------------+
/// |   Total Path Attribute Length (2 octets)            |
/// +-----------------------------------------------------+
/// |   Path Attributes (variable)                        |
/// +-----------------------------------------------------+
/// |   Network Layer Reachability Information (variable) |
/// +-----------------------------------------------------+
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpUpdateMessage {
    pub withdrawn_prefixes: Vec<NetworkPrefix>,
    pub attributes: Vec<Attribute>,
    pub announced_prefixes: Vec<NetworkPrefix>,
}

impl BgpUpdateMessage {
    /// Find the first attribute of the given type.
    pub fn get_attr(&self, attr_type: AttrType) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .map(|attr| &attr.value)
            .find(|value| value.attr_type() == attr_type)
    }

    /// AS path of the update, with AS4_PATH merged in when both are present.
    pub fn as_path(&self) -> Option<AsPath> {
        let path = match self.get_attr(AttrType::AS_PATH) {
            Some(AttributeValue::AsPath { path, .. }) => path,
            _ => return None,
        };
        match self.get_attr(AttrType::AS4_PATH) {
            Some(AttributeValue::AsPath { path: as4_path, .. }) => {
                Some(AsPath::merge_aspath_as4path(path, as4_path))
            }
            _ => Some(path.clone()),
        }
    }

    /// Returns true if the update neither announces nor withdraws anything (End-of-RIB marker).
    pub fn is_end_of_rib(&self) -> bool {
        self.withdrawn_prefixes.is_empty()
            && self.announced_prefixes.is_empty()
            && self.attributes.is_empty()
    }
}

/// BGP NOTIFICATION message body.
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// | Error code    | Error subcode |   Data (variable)             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpNotificationMessage {
    pub error_code: u8,
    pub error_subcode: u8,
    pub error: BgpError,
    pub data: Vec<u8>,
}
