//! BMP message parsing.
//!
//! Message layouts follow the BMP version 1 draft (draft-ietf-grow-bmp-01): a fixed 44-byte
//! common header followed by a type-specific body.

pub use headers::*;
pub use peer_down_notification::*;
pub use route_monitoring::*;
pub use stats_report::*;

pub(crate) mod headers;
pub(crate) mod peer_down_notification;
pub(crate) mod route_monitoring;
pub(crate) mod stats_report;

/// Decoded body of a completed BMP message.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageBody {
    RouteMonitoring(RouteMonitoring),
    StatsReport(StatsReport),
    PeerDownNotification(PeerDownNotification),
}

impl MessageBody {
    pub fn msg_type(&self) -> BmpMsgType {
        match self {
            MessageBody::RouteMonitoring(_) => BmpMsgType::RouteMonitoring,
            MessageBody::StatsReport(_) => BmpMsgType::StatisticsReport,
            MessageBody::PeerDownNotification(_) => BmpMsgType::PeerDownNotification,
        }
    }
}
