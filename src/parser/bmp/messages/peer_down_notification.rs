use crate::models::BgpNotificationMessage;
use crate::parser::bmp::error::ParserBmpError;
use crate::parser::ReadUtils;
use bytes::Bytes;
use num_enum::{FromPrimitive, IntoPrimitive};
use std::fmt::{Display, Formatter};

/// Bytes of the BGP NOTIFICATION (error code and subcode) following reasons 1 and 3.
pub const PEER_DOWN_NOTIFICATION_LEN: usize = 2;

/// Peer down reason codes.
#[derive(Debug, FromPrimitive, IntoPrimitive, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PeerDownReason {
    LocalNotification = 1,
    LocalNoNotification = 2,
    RemoteNotification = 3,
    RemoteNoNotification = 4,
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl PeerDownReason {
    /// Reasons 1 and 3 are followed by the BGP NOTIFICATION that closed the session.
    pub const fn has_notification(&self) -> bool {
        matches!(
            self,
            PeerDownReason::LocalNotification | PeerDownReason::RemoteNotification
        )
    }

    pub const fn description(&self) -> &'static str {
        match self {
            PeerDownReason::LocalNotification => {
                "Local system closed session, notification sent"
            }
            PeerDownReason::LocalNoNotification => "Local system closed session, no notification",
            PeerDownReason::RemoteNotification => {
                "Remote system closed session, notification sent"
            }
            PeerDownReason::RemoteNoNotification => {
                "Remote system closed session, no notification"
            }
            PeerDownReason::Unknown(_) => "Unknown reason",
        }
    }
}

impl Display for PeerDownReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeerDownNotification {
    pub reason: PeerDownReason,
    pub notification: Option<BgpNotificationMessage>,
}

pub fn parse_peer_down_reason(mut data: Bytes) -> Result<PeerDownReason, ParserBmpError> {
    Ok(PeerDownReason::from(data.read_u8()?))
}
